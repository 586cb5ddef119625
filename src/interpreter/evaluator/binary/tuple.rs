use std::rc::Rc;

use crate::interpreter::{evaluator::core::Context, value::core::Value};

impl Context {
    /// Evaluates `++`.
    ///
    /// Two tuples are joined, a tuple and another value are extended on the
    /// matching side, and two non-tuples form a pair.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::{evaluator::core::Context, value::core::Value};
    ///
    /// let pair = Context::eval_concat(&Value::from(1), &Value::from(2));
    /// let triple = Context::eval_concat(&pair, &Value::from(3));
    /// assert_eq!(triple.to_string(), "(1, 2, 3)");
    ///
    /// let joined = Context::eval_concat(&triple, &pair);
    /// assert_eq!(joined.to_string(), "(1, 2, 3, 1, 2)");
    /// ```
    #[must_use]
    pub fn eval_concat(left: &Value, right: &Value) -> Value {
        let items = match (left, right) {
            (Value::Tuple(a), Value::Tuple(b)) => a.iter().chain(b.iter()).cloned().collect(),
            (Value::Tuple(a), b) => a.iter().cloned().chain([b.clone()]).collect(),
            (a, Value::Tuple(b)) => [a.clone()].into_iter().chain(b.iter().cloned()).collect(),
            (a, b) => vec![a.clone(), b.clone()],
        };
        Value::Tuple(Rc::new(items))
    }
}
