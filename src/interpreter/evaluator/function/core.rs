use std::{mem, rc::Rc};

use tracing::trace;

use crate::{
    ast::Node,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        library::Arity,
        value::{core::Value, function::Closure},
    },
};

impl Context {
    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    /// A callee naming nothing at all reports an unknown function rather than
    /// an unknown variable.
    pub(crate) fn eval_call(&mut self,
                            callee: &Node,
                            arguments: &[Node],
                            line: usize)
                            -> EvalResult<Value> {
        let function = match (callee, self.eval(callee)) {
            (Node::Symbol { name, .. }, Err(RuntimeError::UnknownVariable { .. })) => {
                return Err(RuntimeError::UnknownFunction { name: name.clone(),
                                                           line });
            },
            (_, result) => result?,
        };
        let args = self.eval_all(arguments)?;
        self.call_value(&function, &args, line)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// A native that builds a vector or matrix, such as `range`, is charged
    /// one step per element it returns.
    ///
    /// # Parameters
    /// - `function`: the callee, a native or a closure.
    /// - `args`: the evaluated arguments, in order.
    /// - `line`: the line of the call.
    ///
    /// # Returns
    /// Whatever the function returns.
    ///
    /// # Errors
    /// `NotCallable` for anything but a native or a closure, `StepLimit` when
    /// the elements a native built exhaust the budget, and whatever the call
    /// itself reports.
    pub fn call_value(&mut self, function: &Value, args: &[Value], line: usize) -> EvalResult<Value> {
        match function {
            Value::Native(native) => {
                let value = native.invoke(args, line)?;
                let built = match &value {
                    Value::Vector(items) => items.len(),
                    Value::Matrix(rows) => rows.iter().map(Vec::len).sum(),
                    _ => 0,
                };
                self.charge(u64::try_from(built).unwrap_or(u64::MAX), line)?;
                Ok(value)
            },
            Value::Function(closure) => self.call_closure(closure, args, line),
            other => Err(RuntimeError::NotCallable { value: other.to_string(),
                                                     line }),
        }
    }

    /// Runs a closure body in a fresh scope whose parent is the captured
    /// environment.
    ///
    /// Parameters are bound in that scope. While the body runs the context
    /// uses the closure's resolution table, so a closure created by one
    /// program can be called from another. Scope, table and depth are restored
    /// afterwards even when the body fails.
    pub(crate) fn call_closure(&mut self,
                               closure: &Rc<Closure>,
                               args: &[Value],
                               line: usize)
                               -> EvalResult<Value> {
        if args.len() != closure.arity() {
            return Err(RuntimeError::ArgumentCount { name: closure.name.clone(),
                                                     expected: Arity::Exact(closure.arity()),
                                                     actual: args.len(),
                                                     line });
        }
        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::RecursionLimit { limit: self.config.max_call_depth,
                                                      line });
        }

        let scope = closure.environment.child();
        for (param, arg) in closure.params.iter().zip(args) {
            scope.define(param, arg.clone(), line)?;
        }

        trace!(name = %closure.name, depth = self.depth, "calling closure");
        let resolution = mem::replace(&mut self.resolution, Rc::clone(&closure.resolution));
        self.depth += 1;
        let result = self.within(scope, |context| context.eval(&closure.body));
        self.depth -= 1;
        self.resolution = resolution;
        result
    }
}
