use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::core::Value,
    },
};

impl Context {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes the operation by operator and operand types:
    /// - `++` builds or extends tuples and accepts anything;
    /// - every other operator rejects tuple operands;
    /// - connectives need booleans, equality works on any pair, ordering on
    ///   numbers and strings;
    /// - arithmetic goes elementwise when a vector or matrix is involved and
    ///   to the numeric tower otherwise.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand, already evaluated.
    /// - `right`: Right operand, already evaluated.
    /// - `line`: Line number for error reporting.
    ///
    /// # Returns
    /// The result of applying `op`.
    ///
    /// # Example
    /// ```
    /// use algom::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::core::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, &Value::from(3), &Value::from(4), 1);
    /// assert_eq!(sum.unwrap(), Value::from(7));
    ///
    /// let pair = Context::eval_binary(BinaryOperator::Concat, &Value::from(1), &Value::from(2), 1);
    /// assert_eq!(pair.unwrap().to_string(), "(1, 2)");
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: &Value,
                       right: &Value,
                       line: usize)
                       -> EvalResult<Value> {
        use BinaryOperator::{
            Add, And, Concat, Div, Equal, FloorDiv, Greater, GreaterEqual, Less, LessEqual, Mod,
            Mul, Nand, Nor, NotEqual, Or, Pow, Rem, Sub, Xnor, Xor,
        };

        match (op, left, right) {
            (Concat, ..) => Ok(Self::eval_concat(left, right)),
            (_, Value::Tuple(_), _) | (_, _, Value::Tuple(_)) => {
                Err(RuntimeError::TupleOperand { operator: op.symbol(),
                                                 line })
            },
            (And | Or | Xor | Xnor | Nand | Nor, ..) => Self::eval_logic(op, left, right, line),
            (Equal | NotEqual, ..) => Self::eval_equality(op, left, right, line),
            (Less | LessEqual | Greater | GreaterEqual, ..) => {
                Self::eval_ordering(op, left, right, line)
            },
            (Add | Sub | Mul | Div | FloorDiv | Mod | Rem | Pow,
             Value::Vector(_) | Value::Matrix(_),
             _)
            | (Add | Sub | Mul | Div | FloorDiv | Mod | Rem | Pow,
               _,
               Value::Vector(_) | Value::Matrix(_)) => Self::eval_array_op(op, left, right, line),
            (Add | Sub | Mul | Div | FloorDiv | Mod | Rem | Pow, ..) => {
                Self::eval_scalar_op(op, left, right, line)
            },
        }
    }
}
