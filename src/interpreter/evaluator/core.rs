use std::{mem, rc::Rc};

use tracing::trace;

use crate::{
    ast::{Node, NodeId},
    engine::EngineConfig,
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        library::Library,
        resolver::Resolution,
        value::{core::Value, function::Closure},
    },
    util::stack::ensure_sufficient_stack,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the runtime evaluation context.
///
/// A context walks one resolved program. It holds the scope currently in
/// effect, the hop counts of the code being run (swapped when a closure from
/// another program is called), the library for constant lookup and the
/// limits guarding runaway evaluation.
pub struct Context {
    pub(crate) environment: Environment,
    pub(crate) resolution:  Rc<Resolution>,
    pub(crate) library:     Rc<Library>,
    pub(crate) config:      EngineConfig,
    pub(crate) depth:       usize,
    steps:                  u64,
}

impl Context {
    /// Creates a context evaluating in `environment`.
    ///
    /// # Parameters
    /// - `environment`: The scope top-level statements run in.
    /// - `resolution`: Hop counts for the program being run.
    /// - `library`: Natives and constants visible to the program.
    /// - `config`: Call depth and step limits.
    #[must_use]
    pub fn new(environment: Environment,
               resolution: Rc<Resolution>,
               library: Rc<Library>,
               config: EngineConfig)
               -> Self {
        Self { environment,
               resolution,
               library,
               config,
               depth: 0,
               steps: 0 }
    }

    /// Evaluates the statements of a program in order.
    ///
    /// Returns the value of the last statement, or `null` for an empty
    /// program.
    pub fn run(&mut self, statements: &[Node]) -> EvalResult<Value> {
        let mut last = Value::Null;
        for statement in statements {
            last = self.eval(statement)?;
        }
        Ok(last)
    }

    /// Evaluates a node and returns the resulting value.
    ///
    /// This is the main entry point for evaluation. Every node counts one step
    /// towards the configured budget, and deep trees grow the native stack
    /// instead of overflowing it.
    ///
    /// # Returns
    /// The value of the node. Declarations, assignments and loops have
    /// values too.
    pub fn eval(&mut self, node: &Node) -> EvalResult<Value> {
        self.tick(node.line())?;
        ensure_sufficient_stack(|| self.dispatch(node))
    }

    fn dispatch(&mut self, node: &Node) -> EvalResult<Value> {
        match node {
            Node::Null { .. } => Ok(Value::Null),
            Node::Bool { value, .. } => Ok(Value::Bool(*value)),
            Node::Number { value, .. } => Ok(Value::Number(*value)),
            Node::String { value, .. } => Ok(Value::String(Rc::from(value.as_str()))),
            Node::Symbol { name, id, line } => self.read_symbol(name, *id, *line),
            Node::Group { expr, .. } => self.eval(expr),
            Node::Tuple { elements, .. } => Ok(Value::Tuple(Rc::new(self.eval_all(elements)?))),
            Node::Vector { elements, .. } => Ok(Value::Vector(Rc::new(self.eval_all(elements)?))),
            Node::Matrix { rows, .. } => {
                let rows = rows.iter()
                               .map(|row| self.eval_all(row))
                               .collect::<EvalResult<Vec<_>>>()?;
                Ok(Value::Matrix(Rc::new(rows)))
            },
            Node::Unary { op, operand, line } => {
                let value = self.eval(operand)?;
                Self::eval_unary(*op, &value, *line)
            },
            Node::Binary { left, op, right, line } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Node::Chain { operands,
                          operators,
                          line, } => {
                let operands = self.eval_all(operands)?;
                Self::eval_chain(operators, &operands, *line)
            },
            Node::Call { callee,
                         arguments,
                         line, } => self.eval_call(callee, arguments, *line),
            Node::Assignment { name, id, value, line } => {
                let value = self.eval(value)?;
                match self.resolution.get(id) {
                    Some(&hops) => self.environment.assign_at(hops, name, value.clone(), *line)?,
                    None => self.environment.assign(name, value.clone(), *line)?,
                }
                Ok(value)
            },
            Node::VarDecl { name,
                            initializer,
                            line, } => {
                let value = match initializer {
                    Some(initializer) => self.eval(initializer)?,
                    None => Value::Null,
                };
                self.environment.define(name, value.clone(), *line)?;
                Ok(value)
            },
            Node::FunDecl { name,
                            params,
                            body,
                            line, } => {
                let closure = Closure { name:        name.clone(),
                                        params:      params.clone(),
                                        body:        Rc::clone(body),
                                        environment: self.environment.clone(),
                                        resolution:  Rc::clone(&self.resolution), };
                let value = Value::Function(Rc::new(closure));
                self.environment.define(name, value.clone(), *line)?;
                Ok(value)
            },
            Node::Block { statements, .. } => {
                let scope = self.environment.child();
                self.within(scope, |context| context.run(statements))
            },
            Node::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                if self.eval(condition)?.is_true() {
                    self.eval(then_branch)
                } else if let Some(branch) = else_branch {
                    self.eval(branch)
                } else {
                    Ok(Value::Null)
                }
            },
            Node::While { condition, body, .. } => {
                let mut last = Value::Null;
                while self.eval(condition)?.is_true() {
                    last = self.eval(body)?;
                }
                Ok(last)
            },
            Node::Root { statements } => self.run(statements),
            Node::Error(error) => {
                Err(RuntimeError::type_error(format!("Cannot evaluate a syntax error: {error}"),
                                             error.line))
            },
        }
    }

    /// Reads a name: through its resolved scope if it is a local, else by
    /// walking the scope chain, else from the library's constants.
    fn read_symbol(&self, name: &str, id: NodeId, line: usize) -> EvalResult<Value> {
        if let Some(&hops) = self.resolution.get(&id) {
            trace!(name, hops, "local read");
            return self.environment.read_at(hops, name, line);
        }
        self.environment
            .lookup(name)
            .or_else(|| self.library.constant(name))
            .ok_or_else(|| RuntimeError::UnknownVariable { name: name.to_string(),
                                                           line })
    }

    pub(crate) fn eval_all(&mut self, nodes: &[Node]) -> EvalResult<Vec<Value>> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    /// Runs `f` with `scope` as the current environment, restoring the
    /// previous one afterwards whether or not `f` fails.
    pub(crate) fn within<T>(&mut self,
                            scope: Environment,
                            f: impl FnOnce(&mut Self) -> EvalResult<T>)
                            -> EvalResult<T> {
        let previous = mem::replace(&mut self.environment, scope);
        let result = f(self);
        self.environment = previous;
        result
    }

    fn tick(&mut self, line: usize) -> EvalResult<()> {
        self.charge(1, line)
    }

    /// Counts `steps` towards the budget, failing once it is exceeded.
    pub(crate) fn charge(&mut self, steps: u64, line: usize) -> EvalResult<()> {
        self.steps = self.steps.saturating_add(steps);
        match self.config.max_steps {
            Some(limit) if self.steps > limit => Err(RuntimeError::StepLimit { limit, line }),
            _ => Ok(()),
        }
    }
}
