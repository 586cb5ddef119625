use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Negate`: numeric negation, elementwise on vectors and matrices.
    /// - `Not`: boolean negation.
    /// - `Factorial`: the factorial of a non-negative integer, checked for
    ///   overflow.
    ///
    /// # Parameters
    /// - `op`: Negation, `not` or factorial.
    /// - `value`: The evaluated operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The computed value.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, &Value::from(5), 1).unwrap();
    /// assert_eq!(v, Value::from(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, &Value::Bool(false), 1).unwrap();
    /// assert_eq!(v, Value::Bool(true));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Factorial, &Value::from(4), 1).unwrap();
    /// assert_eq!(v, Value::from(24));
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: &Value, line: usize) -> EvalResult<Value> {
        match op {
            UnaryOperator::Negate => Self::map_array(value, &|item| match item {
                                       Value::Number(n) => Ok(Value::Number(n.neg(line)?)),
                                       other => Err(unknown_use(op, other, line)),
                                   }),
            UnaryOperator::Not => Ok(Value::Bool(!value.as_bool(line)?)),
            UnaryOperator::Factorial => match value {
                Value::Number(n) => Ok(Value::Number(n.factorial(line)?)),
                other => Err(unknown_use(op, other, line)),
            },
        }
    }
}

fn unknown_use(op: UnaryOperator, value: &Value, line: usize) -> RuntimeError {
    RuntimeError::type_error(format!("Unknown use of operator {op} on a {}.", value.type_name()),
                             line)
}
