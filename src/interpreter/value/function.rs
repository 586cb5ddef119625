use std::{fmt, rc::Rc};

use crate::{
    ast::Node,
    interpreter::{environment::Environment, resolver::Resolution},
};

/// A user-defined function paired with the environment it was declared in.
///
/// The environment is shared, not copied: assignments a closure makes to
/// captured variables are seen by every other closure over the same scope.
/// A closure stored in the scope it captures forms a reference cycle and is
/// only freed with the process.
#[derive(Clone)]
pub struct Closure {
    /// The declared name.
    pub name:        String,
    /// Parameter names in order; their count is the arity.
    pub params:      Vec<String>,
    /// The function body.
    pub body:        Rc<Node>,
    /// The scope active where the function was declared.
    pub environment: Environment,
    /// Hop counts for the program the function was declared in.
    pub resolution:  Rc<Resolution>,
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Closure")
         .field("name", &self.name)
         .field("params", &self.params)
         .finish_non_exhaustive()
    }
}

impl Closure {
    /// The number of parameters.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.params.len()
    }
}
