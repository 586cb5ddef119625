use std::rc::Rc;

use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates arithmetic with a vector or matrix operand.
    ///
    /// Supported forms:
    /// - `+` and `-` between two vectors of equal length or two matrices of
    ///   equal shape, elementwise;
    /// - `*` between an array and a number on either side;
    /// - `/` of an array by a number.
    ///
    /// # Parameters
    /// - `op`: An arithmetic operator.
    /// - `left`, `right`: Operands, at least one of them a vector or matrix.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// A vector or matrix shaped like the array operand.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let v = Value::Vector(vec![Value::from(1), Value::from(2)].into());
    /// let w = Value::Vector(vec![Value::from(10), Value::from(20)].into());
    ///
    /// let sum = Context::eval_array_op(BinaryOperator::Add, &v, &w, 1).unwrap();
    /// assert_eq!(sum.to_string(), "[11, 22]");
    ///
    /// let scaled = Context::eval_array_op(BinaryOperator::Mul, &Value::from(3), &v, 1).unwrap();
    /// assert_eq!(scaled.to_string(), "[3, 6]");
    /// ```
    pub fn eval_array_op(op: BinaryOperator,
                         left: &Value,
                         right: &Value,
                         line: usize)
                         -> EvalResult<Value> {
        use BinaryOperator::{Add, Div, Mul, Sub};

        match (op, left, right) {
            (Add | Sub, Value::Vector(a), Value::Vector(b)) => {
                Ok(Value::Vector(Rc::new(Self::zip_row(op, a, b, line)?)))
            },
            (Add | Sub, Value::Matrix(a), Value::Matrix(b)) => {
                if a.len() != b.len() {
                    return Err(shape_mismatch(op, a.len(), b.len(), line));
                }
                let rows = a.iter()
                            .zip(b.iter())
                            .map(|(x, y)| Self::zip_row(op, x, y, line))
                            .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Matrix(Rc::new(rows)))
            },
            (Mul | Div, array, scalar @ Value::Number(_)) => {
                Self::map_array(array, &|x| Self::eval_scalar_op(op, x, scalar, line))
            },
            (Mul, scalar @ Value::Number(_), array) => {
                Self::map_array(array, &|x| Self::eval_scalar_op(op, scalar, x, line))
            },
            _ => Err(RuntimeError::UnknownOperatorUse { operator: op.symbol(),
                                                        line }),
        }
    }

    fn zip_row(op: BinaryOperator, a: &[Value], b: &[Value], line: usize) -> EvalResult<Vec<Value>> {
        if a.len() != b.len() {
            return Err(shape_mismatch(op, a.len(), b.len(), line));
        }
        a.iter()
         .zip(b)
         .map(|(x, y)| Self::eval_scalar_op(op, x, y, line))
         .collect()
    }

    /// Applies `f` to every element of a vector or matrix.
    pub(crate) fn map_array<F>(array: &Value, f: &F) -> EvalResult<Value>
        where F: Fn(&Value) -> EvalResult<Value>
    {
        match array {
            Value::Vector(items) => {
                Ok(Value::Vector(Rc::new(items.iter().map(f).collect::<EvalResult<_>>()?)))
            },
            Value::Matrix(rows) => {
                let rows = rows.iter()
                               .map(|row| row.iter().map(f).collect::<EvalResult<Vec<_>>>())
                               .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Matrix(Rc::new(rows)))
            },
            other => f(other),
        }
    }
}

fn shape_mismatch(op: BinaryOperator, left: usize, right: usize, line: usize) -> RuntimeError {
    RuntimeError::type_error(format!("Cannot apply {op} to arrays of different lengths: {left} vs {right}."),
                             line)
}
