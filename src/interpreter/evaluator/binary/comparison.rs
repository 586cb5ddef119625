use std::cmp::Ordering;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates `==` or `!=`.
    ///
    /// Numbers are compared by value across the tower, so `1 == 1.0` and
    /// `1/2 == 0.5`. Other values compare structurally; values of different
    /// types are never equal.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let equal = Context::eval_equality(BinaryOperator::Equal, &Value::from(1), &Value::from(1.0), 1);
    /// assert_eq!(equal.unwrap(), Value::Bool(true));
    ///
    /// let equal = Context::eval_equality(BinaryOperator::NotEqual, &Value::from("a"), &Value::Null, 1);
    /// assert_eq!(equal.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_equality(op: BinaryOperator,
                         left: &Value,
                         right: &Value,
                         line: usize)
                         -> EvalResult<Value> {
        let equal = match (left, right) {
            (Value::Number(a), Value::Number(b)) => a.equals(*b, line)?,
            _ => left == right,
        };
        Ok(Value::Bool(if op == BinaryOperator::NotEqual { !equal } else { equal }))
    }

    /// Evaluates `<`, `<=`, `>` or `>=`.
    ///
    /// Real numbers are ordered by value; any comparison involving NaN is
    /// false. Strings are ordered lexicographically. Complex numbers and
    /// every other type are rejected.
    ///
    /// # Returns
    /// `Value::Bool` with the outcome.
    pub fn eval_ordering(op: BinaryOperator,
                         left: &Value,
                         right: &Value,
                         line: usize)
                         -> EvalResult<Value> {
        let ordering = match (left, right) {
            (Value::Number(a), Value::Number(b)) => a.compare(*b, line)?,
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => {
                return Err(RuntimeError::type_error(format!("Cannot compare a {} with a {} using {op}.",
                                                            left.type_name(),
                                                            right.type_name()),
                                                    line));
            },
        };

        let holds = ordering.is_some_and(|ordering| match op {
                                BinaryOperator::Less => ordering == Ordering::Less,
                                BinaryOperator::LessEqual => ordering != Ordering::Greater,
                                BinaryOperator::Greater => ordering == Ordering::Greater,
                                BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                                _ => false,
                            });
        Ok(Value::Bool(holds))
    }

    /// Evaluates a comparison chain over its evaluated operands.
    ///
    /// `a < b <= c` holds when every adjacent pair satisfies the operator
    /// between them. Every link is compared, so a type error later in the
    /// chain surfaces even after a link that is false.
    ///
    /// # Parameters
    /// - `operators`: the comparison between each operand and the next.
    /// - `operands`: one more value than there are operators.
    /// - `line`: the line reported by errors.
    ///
    /// # Returns
    /// `true` when every link holds, `false` otherwise.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::BinaryOperator::{Less, LessEqual},
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let values = [Value::from(1), Value::from(2), Value::from(2)];
    /// let result = Context::eval_chain(&[Less, LessEqual], &values, 1);
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_chain(operators: &[BinaryOperator],
                      operands: &[Value],
                      line: usize)
                      -> EvalResult<Value> {
        let mut holds = true;
        for (op, pair) in operators.iter().zip(operands.windows(2)) {
            holds &= Self::eval_binary(*op, &pair[0], &pair[1], line)?.as_bool(line)?;
        }
        Ok(Value::Bool(holds))
    }
}
