use std::fmt::{self, Display, Formatter};

use crate::{
    ast::{Node, Program, UnaryOperator},
    interpreter::value::number::Number,
};

/// Renders the tree as source text that parses back to the same tree.
///
/// Binary operators are spaced, groups keep their parentheses and a block
/// prints on one line with every statement followed by `;`.
///
/// # Example
/// ```
/// let program = algom::parse("let f(x) = {x^2 + 1};");
/// assert_eq!(program.to_string(), "let f(x) = { x ^ 2 + 1; };");
/// ```
impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null { .. } => write!(f, "null"),
            Self::Bool { value, .. } => write!(f, "{value}"),
            Self::Number { value, .. } => write_number(f, *value),
            Self::String { value, .. } => write!(f, "\"{value}\""),
            Self::Symbol { name, .. } => write!(f, "{name}"),
            Self::Group { expr, .. } => write!(f, "({expr})"),
            Self::Tuple { elements, .. } => {
                write!(f, "(")?;
                write_list(f, elements)?;
                write!(f, ")")
            },
            Self::Vector { elements, .. } => {
                write!(f, "[")?;
                write_list(f, elements)?;
                write!(f, "]")
            },
            Self::Matrix { rows, .. } => {
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
            Self::Unary { op, operand, .. } => match op {
                // `- 5` must not collapse into the literal `-5`.
                UnaryOperator::Negate if matches!(**operand, Self::Number { .. }) => {
                    write!(f, "- {operand}")
                },
                UnaryOperator::Negate => write!(f, "-{operand}"),
                UnaryOperator::Not => write!(f, "not {operand}"),
                UnaryOperator::Factorial => write!(f, "{operand}!"),
            },
            Self::Binary { left, op, right, .. } => write!(f, "{left} {op} {right}"),
            Self::Chain { operands, operators, .. } => {
                for (i, operand) in operands.iter().enumerate() {
                    if let Some(op) = i.checked_sub(1).and_then(|i| operators.get(i)) {
                        write!(f, " {op} ")?;
                    }
                    write!(f, "{operand}")?;
                }
                Ok(())
            },
            Self::Call { callee, arguments, .. } => {
                write!(f, "{callee}(")?;
                write_list(f, arguments)?;
                write!(f, ")")
            },
            Self::Assignment { name, value, .. } => write!(f, "{name} = {value}"),
            Self::VarDecl { name,
                            initializer: Some(value),
                            .. } => write!(f, "let {name} = {value}"),
            Self::VarDecl { name, .. } => write!(f, "let {name}"),
            Self::FunDecl { name, params, body, .. } => {
                write!(f, "let {name}({}) = {body}", params.join(", "))
            },
            Self::Block { statements, .. } => {
                write!(f, "{{ ")?;
                for statement in statements {
                    write!(f, "{statement}; ")?;
                }
                write!(f, "}}")
            },
            Self::Conditional { condition,
                                then_branch,
                                else_branch,
                                .. } => {
                write!(f, "if ({condition}) {then_branch}")?;
                if let Some(otherwise) = else_branch {
                    write!(f, " else {otherwise}")?;
                }
                Ok(())
            },
            Self::While { condition, body, .. } => write!(f, "while ({condition}) {body}"),
            Self::Root { statements } => {
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{statement};")?;
                }
                Ok(())
            },
            Self::Error(error) => write!(f, "{}", error.kind),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root())
    }
}

fn write_list(f: &mut Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{node}")?;
    }
    Ok(())
}

/// Writes a literal in a form the lexer reads back as the same variant.
fn write_number(f: &mut Formatter<'_>, value: Number) -> fmt::Result {
    match value {
        Number::Integer(n) => write!(f, "{n}"),
        Number::Float(x) if x.is_nan() => write!(f, "NaN"),
        Number::Float(x) if x.is_infinite() => {
            write!(f, "{}Inf", if x < 0.0 { "-" } else { "" })
        },
        Number::Float(x) => write!(f, "{x:?}"),
        Number::Rational(r) => write!(f, "{}/{}", r.numerator, r.denominator),
        Number::Complex(c) if c.real == 0.0 => write!(f, "{:?}i", c.imaginary),
        Number::Complex(c) => write!(f, "({c})"),
    }
}
