use thiserror::Error;

/// Represents errors found by the static resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// A local variable was read inside its own initializer, as in
    /// `{ let x = x + 1; }`.
    #[error("Error on line {line}: [Resolver]: Cannot read local variable “{name}” in its own initializer.")]
    SelfReference {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}
