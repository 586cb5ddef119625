use thiserror::Error;

use crate::{error::ErrorCategory, interpreter::library::Arity};

/// Represents all errors that can occur during evaluation and runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read or assign an undefined variable.
    #[error("Error on line {line}: [Resolver]: No variable named {name} exists.")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that is neither declared nor native.
    #[error("Error on line {line}: [Resolver]: No function named {name} exists.")]
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name twice in the same scope.
    #[error("Error on line {line}: [Resolver]: Name “{name}” has been declared in the same scope, redeclaration prohibited.")]
    Redeclaration {
        /// The name that was declared again.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function was called with the wrong number of arguments.
    #[error("Error on line {line}: Function “{name}” requires {expected}, but {actual} were passed.")]
    ArgumentCount {
        /// The name of the function.
        name:     String,
        /// The arity the function declares.
        expected: Arity,
        /// The number of arguments supplied.
        actual:   usize,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Called something that is not a function.
    #[error("Error on line {line}: [Typechecker]: “{value}” is not a function.")]
    NotCallable {
        /// Rendering of the value that was called.
        value: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A value had an unexpected or incompatible type.
    #[error("Error on line {line}: [Typechecker]: {details}")]
    TypeError {
        /// Details about the type mismatch.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// A tuple operand used with anything but concatenation.
    #[error("Error on line {line}: [Typechecker]: Operator {operator} doesn't work with tuples.")]
    TupleOperand {
        /// The operator symbol.
        operator: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// An operator applied to operands it has no meaning for.
    #[error("Error on line {line}: [Typechecker]: Unknown use of operator {operator}")]
    UnknownOperatorUse {
        /// The operator symbol.
        operator: &'static str,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Attempted division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// Integer arithmetic overflowed.
    #[error("Error on line {line}: Integer overflow while trying to compute result.")]
    Overflow {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer too large to convert to a float without losing precision.
    #[error("Error on line {line}: Number is too large to convert exactly.")]
    NumberTooLarge {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A numeric combination the tower does not support.
    #[error("Error on line {line}: {details} is unimplemented.")]
    Unimplemented {
        /// The unsupported operation.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The interpreted call stack exceeded the configured depth.
    #[error("Error on line {line}: Maximum call depth of {limit} exceeded.")]
    RecursionLimit {
        /// The configured maximum depth.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A range would produce more elements than a single vector may hold.
    #[error("Error on line {line}: Range would produce more than {limit} elements.")]
    RangeTooLong {
        /// The largest allowed length.
        limit: usize,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Evaluation exceeded the configured step budget.
    #[error("Error on line {line}: Evaluation exceeded the budget of {limit} steps.")]
    StepLimit {
        /// The configured budget.
        limit: u64,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl RuntimeError {
    /// Returns the coarse category used by hosts to group failures.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownVariable { .. } | Self::UnknownFunction { .. } | Self::Redeclaration { .. } => {
                ErrorCategory::Resolver
            },
            Self::ArgumentCount { .. } => ErrorCategory::Arguments,
            Self::NotCallable { .. }
            | Self::TypeError { .. }
            | Self::TupleOperand { .. }
            | Self::UnknownOperatorUse { .. } => ErrorCategory::Type,
            Self::DivisionByZero { .. } | Self::Overflow { .. } | Self::NumberTooLarge { .. } => {
                ErrorCategory::Arithmetic
            },
            Self::Unimplemented { .. } => ErrorCategory::Unimplemented,
            Self::RecursionLimit { .. } | Self::StepLimit { .. } | Self::RangeTooLong { .. } => {
                ErrorCategory::Limit
            },
        }
    }

    /// Shorthand for a [`RuntimeError::TypeError`].
    pub(crate) fn type_error(details: impl Into<String>, line: usize) -> Self {
        Self::TypeError { details: details.into(),
                          line }
    }
}
