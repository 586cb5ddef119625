use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{core::Value, number::Number},
    },
};

impl Context {
    /// Evaluates an arithmetic operation on two scalars.
    ///
    /// Numbers go through the numeric tower, which promotes mixed operands
    /// and checks for overflow and division by zero. `+` also joins two
    /// strings. Anything else is an unknown use of the operator.
    ///
    /// # Parameters
    /// - `op`: An arithmetic operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A number of the wider operand's kind, or the joined string.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Mul, &Value::from(1.5), &Value::from(2), 1);
    /// assert_eq!(result.unwrap(), Value::from(3.0));
    ///
    /// let result = Context::eval_scalar_op(BinaryOperator::Sub, &Value::from("a"), &Value::from(1), 1);
    /// assert!(result.is_err());
    /// ```
    pub fn eval_scalar_op(op: BinaryOperator,
                          left: &Value,
                          right: &Value,
                          line: usize)
                          -> EvalResult<Value> {
        match (left, right) {
            (Value::Number(a), Value::Number(b)) => {
                Ok(Value::Number(Self::eval_number_op(op, *a, *b, line)?))
            },
            (Value::String(a), Value::String(b)) if op == BinaryOperator::Add => {
                Ok(Value::String(Rc::from(format!("{a}{b}"))))
            },
            _ => Err(RuntimeError::UnknownOperatorUse { operator: op.symbol(),
                                                        line }),
        }
    }

    /// Applies an arithmetic operator to two numbers.
    pub(crate) fn eval_number_op(op: BinaryOperator,
                                 a: Number,
                                 b: Number,
                                 line: usize)
                                 -> EvalResult<Number> {
        use BinaryOperator::{Add, Div, FloorDiv, Mod, Mul, Pow, Rem, Sub};

        match op {
            Add => a.add(b, line),
            Sub => a.sub(b, line),
            Mul => a.mul(b, line),
            Div => a.div(b, line),
            FloorDiv => a.floor_div(b, line),
            Mod => a.modulo(b, line),
            Rem => a.remainder(b, line),
            Pow => a.pow(b, line),
            _ => Err(RuntimeError::UnknownOperatorUse { operator: op.symbol(),
                                                        line }),
        }
    }
}
