use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

#[derive(Debug, Default)]
struct Scope {
    values: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A lexical scope: name bindings plus a link to the enclosing scope.
///
/// Cloning an `Environment` clones the handle, not the bindings. Scopes live
/// as long as any closure, active call or child scope refers to them.
///
/// # Example
/// ```
/// use algom::interpreter::{environment::Environment, value::core::Value};
///
/// let global = Environment::new();
/// global.define("x", Value::from(1), 1).unwrap();
///
/// let local = global.child();
/// local.assign("x", Value::from(2), 1).unwrap();
/// assert_eq!(global.read("x", 1).unwrap(), Value::from(2));
/// assert!(local.define("x", Value::from(3), 1).is_ok());
/// assert!(local.define("x", Value::from(4), 1).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment(Rc<RefCell<Scope>>);

impl Environment {
    /// Creates a root scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Self(Rc::new(RefCell::new(Scope { values: HashMap::new(),
                                          parent: Some(self.clone()), })))
    }

    /// Binds `name` in this scope.
    ///
    /// # Errors
    /// `Redeclaration` if this very scope already binds `name`; shadowing an
    /// outer binding is fine.
    pub fn define(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut scope = self.0.borrow_mut();
        if scope.values.contains_key(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     line });
        }
        scope.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Rebinds `name` in the nearest scope that binds it.
    ///
    /// # Errors
    /// `UnknownVariable` if no enclosing scope binds `name`.
    pub fn assign(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let mut current = self.clone();
        loop {
            let parent = {
                let mut scope = current.0.borrow_mut();
                if let Some(slot) = scope.values.get_mut(name) {
                    *slot = value;
                    return Ok(());
                }
                scope.parent.clone()
            };
            match parent {
                Some(parent) => current = parent,
                None => return Err(unknown_variable(name, line)),
            }
        }
    }

    /// Reads `name` from the nearest scope that binds it.
    ///
    /// # Errors
    /// `UnknownVariable` if no enclosing scope binds `name`.
    pub fn read(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.lookup(name).ok_or_else(|| unknown_variable(name, line))
    }

    /// Reads `name` from the nearest scope that binds it, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            let parent = {
                let scope = current.0.borrow();
                if let Some(value) = scope.values.get(name) {
                    return Some(value.clone());
                }
                scope.parent.clone()
            };
            current = parent?;
        }
    }

    /// Reads `name` from the scope exactly `hops` parents up.
    pub fn read_at(&self, hops: usize, name: &str, line: usize) -> EvalResult<Value> {
        self.ancestor(hops)
            .and_then(|scope| scope.0.borrow().values.get(name).cloned())
            .ok_or_else(|| unknown_variable(name, line))
    }

    /// Rebinds `name` in the scope exactly `hops` parents up.
    pub fn assign_at(&self, hops: usize, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let scope = self.ancestor(hops).ok_or_else(|| unknown_variable(name, line))?;
        let mut scope = scope.0.borrow_mut();
        match scope.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            },
            None => Err(unknown_variable(name, line)),
        }
    }

    /// Installs bindings into this scope, replacing existing ones.
    pub fn record(&self, bindings: impl IntoIterator<Item = (String, Value)>) {
        self.0.borrow_mut().values.extend(bindings);
    }

    /// Whether this scope itself binds `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.borrow().values.contains_key(name)
    }

    fn ancestor(&self, hops: usize) -> Option<Self> {
        let mut current = self.clone();
        for _ in 0..hops {
            let parent = current.0.borrow().parent.clone()?;
            current = parent;
        }
        Some(current)
    }
}

fn unknown_variable(name: &str, line: usize) -> RuntimeError {
    RuntimeError::UnknownVariable { name: name.to_string(),
                                    line }
}
