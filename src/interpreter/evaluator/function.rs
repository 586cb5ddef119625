/// Calls of natives and user-defined closures.
pub mod core;
