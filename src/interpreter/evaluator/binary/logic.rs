use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a logical connective between two boolean values.
    ///
    /// Both operands are already evaluated; there is no short-circuiting.
    /// Non-boolean operands are type errors.
    ///
    /// # Parameters
    /// - `op`: A connective such as `and` or `nor`.
    /// - `left`, `right`: Boolean operands.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_logic(BinaryOperator::Xor, &Value::Bool(true), &Value::Bool(false), 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    ///
    /// let result = Context::eval_logic(BinaryOperator::Nand, &Value::Bool(true), &Value::Bool(true), 1);
    /// assert_eq!(result.unwrap(), Value::Bool(false));
    /// ```
    pub fn eval_logic(op: BinaryOperator,
                      left: &Value,
                      right: &Value,
                      line: usize)
                      -> EvalResult<Value> {
        use BinaryOperator::{And, Nand, Nor, Or, Xnor, Xor};

        let a = left.as_bool(line)?;
        let b = right.as_bool(line)?;

        Ok(Value::Bool(match op {
                           And => a && b,
                           Or => a || b,
                           Xor => a ^ b,
                           Xnor => a == b,
                           Nand => !(a && b),
                           Nor => !(a || b),
                           _ => {
                               return Err(RuntimeError::UnknownOperatorUse { operator:
                                                                                 op.symbol(),
                                                                             line });
                           },
                       }))
    }
}
