use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::{Node, NodeId},
    error::ResolveError,
};

/// Hop counts from a reference node to the scope that declares its name.
///
/// Names missing from the table are globals, looked up dynamically.
pub type Resolution = HashMap<NodeId, usize>;

/// Static pass computing how many scopes each local reference crosses.
///
/// Scopes mirror the environments the evaluator creates: one per block, and
/// one per function call holding the parameters. Top-level declarations are
/// not tracked, so they resolve dynamically.
#[derive(Debug, Default)]
struct Resolver {
    /// Innermost last. `false` marks a name declared but not yet initialized.
    scopes:     Vec<HashMap<String, bool>>,
    resolution: Resolution,
}

/// Resolves the statements of a program.
///
/// # Errors
/// `SelfReference` when a local variable is read in its own initializer.
///
/// # Example
/// ```
/// use algom::interpreter::resolver::resolve;
///
/// let program = algom::parse("let f(a) = { let b = a; b };");
/// let resolution = resolve(program.statements()).unwrap();
/// assert_eq!(resolution.len(), 2);
///
/// let program = algom::parse("{ let x = x + 1; };");
/// assert!(resolve(program.statements()).is_err());
/// ```
pub fn resolve(statements: &[Node]) -> Result<Resolution, ResolveError> {
    let mut resolver = Resolver::default();
    for statement in statements {
        resolver.node(statement)?;
    }
    debug!(locals = resolver.resolution.len(), "resolved program");
    Ok(resolver.resolution)
}

/// Resolves a function body over `params` as if it were declared at top
/// level.
pub fn resolve_function(params: &[String], body: &Node) -> Result<Resolution, ResolveError> {
    let mut resolver = Resolver::default();
    resolver.function(params, body)?;
    Ok(resolver.resolution)
}

impl Resolver {
    fn node(&mut self, node: &Node) -> Result<(), ResolveError> {
        match node {
            Node::Null { .. }
            | Node::Bool { .. }
            | Node::Number { .. }
            | Node::String { .. }
            | Node::Error(_) => Ok(()),
            Node::Symbol { name, id, line } => {
                if self.scopes.last().and_then(|scope| scope.get(name)) == Some(&false) {
                    return Err(ResolveError::SelfReference { name: name.clone(),
                                                             line: *line });
                }
                self.local(*id, name);
                Ok(())
            },
            Node::Group { expr, .. } => self.node(expr),
            Node::Tuple { elements, .. } | Node::Vector { elements, .. } => self.nodes(elements),
            Node::Matrix { rows, .. } => rows.iter().try_for_each(|row| self.nodes(row)),
            Node::Unary { operand, .. } => self.node(operand),
            Node::Chain { operands, .. } => self.nodes(operands),
            Node::Binary { left, right, .. } => {
                self.node(left)?;
                self.node(right)
            },
            Node::Call { callee, arguments, .. } => {
                self.node(callee)?;
                self.nodes(arguments)
            },
            Node::Assignment { name, id, value, .. } => {
                self.node(value)?;
                self.local(*id, name);
                Ok(())
            },
            Node::VarDecl { name, initializer, .. } => {
                self.declare(name);
                if let Some(value) = initializer {
                    self.node(value)?;
                }
                self.define(name);
                Ok(())
            },
            Node::FunDecl { name, params, body, .. } => {
                self.declare(name);
                self.define(name);
                self.function(params, body)
            },
            Node::Block { statements, .. } => {
                self.scopes.push(HashMap::new());
                let result = self.nodes(statements);
                self.scopes.pop();
                result
            },
            Node::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                self.node(condition)?;
                self.node(then_branch)?;
                else_branch.as_deref().map_or(Ok(()), |branch| self.node(branch))
            },
            Node::While { condition, body, .. } => {
                self.node(condition)?;
                self.node(body)
            },
            Node::Root { statements } => self.nodes(statements),
        }
    }

    fn nodes(&mut self, nodes: &[Node]) -> Result<(), ResolveError> {
        nodes.iter().try_for_each(|node| self.node(node))
    }

    fn function(&mut self, params: &[String], body: &Node) -> Result<(), ResolveError> {
        self.scopes
            .push(params.iter().map(|param| (param.clone(), true)).collect());
        let result = self.node(body);
        self.scopes.pop();
        result
    }

    fn declare(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), false);
        }
    }

    fn define(&mut self, name: &str) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), true);
        }
    }

    fn local(&mut self, id: NodeId, name: &str) {
        if let Some(hops) = self.scopes.iter().rev().position(|scope| scope.contains_key(name)) {
            trace!(name, ?id, hops, "resolved local");
            self.resolution.insert(id, hops);
        }
    }
}
