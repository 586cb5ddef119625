use std::{fmt, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        evaluator::core::EvalResult,
        library::NativeFunction,
        value::{complex::ComplexNumber, function::Closure, number::Number, rational::Rational},
    },
};

/// Represents a runtime value in the interpreter.
///
/// Composite values share their storage through `Rc`, so copying a vector or
/// passing a closure around never duplicates the underlying data.
#[derive(Debug, Clone)]
pub enum Value {
    /// The absence of a value. Produced by `null`, by `let x;`, and by an
    /// `if` without `else` whose condition is false.
    Null,
    /// A boolean value (`true` or `false`).
    ///
    /// Produced by comparison operators and logical connectives. Conditions
    /// of `if` and `while` only count `true` as taken.
    Bool(bool),
    /// A member of the numeric tower.
    Number(Number),
    /// A string literal.
    String(Rc<str>),
    /// An ordered, fixed collection of arbitrary values: `(1, true, "a")`.
    Tuple(Rc<Vec<Self>>),
    /// A row of values: `[1, 2, 3]`.
    Vector(Rc<Vec<Self>>),
    /// Rows of equal length: `[[1, 2], [3, 4]]`.
    Matrix(Rc<Vec<Vec<Self>>>),
    /// A user-defined function together with its captured environment.
    Function(Rc<Closure>),
    /// A function provided by the host.
    Native(Rc<NativeFunction>),
}

impl PartialEq for Value {
    /// Data compares structurally; functions compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Tuple(a), Self::Tuple(b)) | (Self::Vector(a), Self::Vector(b)) => a == b,
            (Self::Matrix(a), Self::Matrix(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            (Self::Native(a), Self::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::Integer(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::Float(v))
    }
}

impl From<Rational> for Value {
    fn from(r: Rational) -> Self {
        Self::Number(Number::Rational(r))
    }
}

impl From<ComplexNumber> for Value {
    fn from(c: ComplexNumber) -> Self {
        Self::Number(Number::Complex(c))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s}"),
            Self::Tuple(items) => {
                write!(f, "(")?;
                write_list(f, items)?;
                write!(f, ")")
            },
            Self::Vector(items) => {
                write!(f, "[")?;
                write_list(f, items)?;
                write!(f, "]")
            },
            Self::Matrix(rows) => {
                write!(f, "[")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "[")?;
                    write_list(f, row)?;
                    write!(f, "]")?;
                }
                write!(f, "]")
            },
            Self::Function(closure) => {
                write!(f, "<fn {}({})>", closure.name, closure.params.join(", "))
            },
            Self::Native(native) => write!(f, "<native fn {}>", native.name),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Value {
    /// A short name for the kind of value, used in type errors.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::Tuple(_) => "tuple",
            Self::Vector(_) => "vector",
            Self::Matrix(_) => "matrix",
            Self::Function(_) | Self::Native(_) => "function",
        }
    }

    /// Returns the number inside, or a type error.
    ///
    /// # Example
    /// ```
    /// use algom::interpreter::value::{core::Value, number::Number};
    ///
    /// assert_eq!(Value::from(3).as_number(1).unwrap(), Number::Integer(3));
    /// assert!(Value::Bool(true).as_number(1).is_err());
    /// ```
    pub fn as_number(&self, line: usize) -> EvalResult<Number> {
        match self {
            Self::Number(n) => Ok(*n),
            other => Err(RuntimeError::type_error(format!("Expected a number, found a {}.",
                                                          other.type_name()),
                                                  line)),
        }
    }

    /// Converts a real number to `f64`, or returns a type error.
    pub fn as_f64(&self, line: usize) -> EvalResult<f64> {
        self.as_number(line)?.to_f64(line)
    }

    /// Returns the boolean inside, or a type error.
    ///
    /// Used by the logical connectives, which reject non-boolean operands.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            other => Err(RuntimeError::type_error(format!("Expected a boolean, found a {}.",
                                                          other.type_name()),
                                                  line)),
        }
    }

    /// Whether a condition holds: only `true` counts.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}
