use std::rc::Rc;

use crate::{
    error::ParseError,
    interpreter::{token::TokenKind, value::number::Number},
};

/// Canonical source rendering of the tree.
pub mod display;

/// Identity of a reference node, the key of the resolver's hop-count table.
///
/// Ids are handed out in parse order, so parsing the same source twice gives
/// equal trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// An abstract syntax tree node.
///
/// Every construct of the language, statements included, is an expression
/// node: declarations, blocks, conditionals and loops all produce a value.
/// Consumers walk the tree with an exhaustive `match`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `null`
    Null {
        /// Line number in the source code.
        line: usize,
    },
    /// `true` or `false`.
    Bool {
        /// The literal value.
        value: bool,
        /// Line number in the source code.
        line:  usize,
    },
    /// A numeric literal, kept in the variant it was written as.
    Number {
        /// The literal value.
        value: Number,
        /// Line number in the source code.
        line:  usize,
    },
    /// A string literal.
    String {
        /// The text between the quotes.
        value: String,
        /// Line number in the source code.
        line:  usize,
    },
    /// A reference to a variable or function by name.
    Symbol {
        /// The name being read.
        name: String,
        /// Key into the resolution table.
        id:   NodeId,
        /// Line number in the source code.
        line: usize,
    },
    /// A parenthesized expression.
    Group {
        /// The inner expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// `(a, b, ...)` and the empty tuple `()`.
    Tuple {
        /// The elements.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `[a, b, ...]`
    Vector {
        /// The elements.
        elements: Vec<Self>,
        /// Line number in the source code.
        line:     usize,
    },
    /// `[[a, b], [c, d]]`; every row has the same length.
    Matrix {
        /// The rows.
        rows: Vec<Vec<Self>>,
        /// Line number in the source code.
        line: usize,
    },
    /// A prefix or postfix operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand.
        operand: Box<Self>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Two or more comparisons in a row, `a < b <= c`.
    ///
    /// Holds one more operand than operators. Every operand is evaluated
    /// once, so `0 < f() < 5` calls `f` a single time.
    Chain {
        /// The compared operands, left to right.
        operands:  Vec<Self>,
        /// The comparison between each operand and the next.
        operators: Vec<BinaryOperator>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A call. The callee is a symbol or, for `f(x)(y)`, another call.
    Call {
        /// The expression producing the function.
        callee:    Box<Self>,
        /// Arguments in order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// `name = value`
    Assignment {
        /// The variable being assigned.
        name:  String,
        /// Key into the resolution table.
        id:    NodeId,
        /// The new value.
        value: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `let name = value` or `let name`.
    VarDecl {
        /// The declared name.
        name:        String,
        /// The initial value; `null` when absent.
        initializer: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `let name(params) = body`
    FunDecl {
        /// The declared name.
        name:   String,
        /// Parameter names in order.
        params: Vec<String>,
        /// The body, shared with every closure created from it.
        body:   Rc<Self>,
        /// Line number in the source code.
        line:   usize,
    },
    /// `{ statements }`
    Block {
        /// Statements inside the block.
        statements: Vec<Self>,
        /// Line number in the source code.
        line:       usize,
    },
    /// `if (condition) then else otherwise`
    Conditional {
        /// The condition.
        condition:   Box<Self>,
        /// Taken when the condition is `true`.
        then_branch: Box<Self>,
        /// Taken otherwise, if present.
        else_branch: Option<Box<Self>>,
        /// Line number in the source code.
        line:        usize,
    },
    /// `while (condition) body`
    While {
        /// Re-evaluated before every iteration.
        condition: Box<Self>,
        /// The loop body.
        body:      Box<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// The program: top-level statements in order.
    Root {
        /// The statements.
        statements: Vec<Self>,
    },
    /// A syntax error. Only ever appears as the single statement of a root.
    Error(ParseError),
}

impl Node {
    /// Gets the line number from `self`.
    ///
    /// The root reports line 1.
    ///
    /// # Example
    /// ```
    /// use algom::ast::Node;
    ///
    /// let node = Node::Null { line: 5 };
    /// assert_eq!(node.line(), 5);
    /// ```
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Null { line }
            | Self::Bool { line, .. }
            | Self::Number { line, .. }
            | Self::String { line, .. }
            | Self::Symbol { line, .. }
            | Self::Group { line, .. }
            | Self::Tuple { line, .. }
            | Self::Vector { line, .. }
            | Self::Matrix { line, .. }
            | Self::Unary { line, .. }
            | Self::Binary { line, .. }
            | Self::Chain { line, .. }
            | Self::Call { line, .. }
            | Self::Assignment { line, .. }
            | Self::VarDecl { line, .. }
            | Self::FunDecl { line, .. }
            | Self::Block { line, .. }
            | Self::Conditional { line, .. }
            | Self::While { line, .. } => *line,
            Self::Root { .. } => 1,
            Self::Error(error) => error.line,
        }
    }

    /// The name of the variant, as reported in parse errors.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null { .. } => "Null",
            Self::Bool { .. } => "Bool",
            Self::Number { .. } => "Number",
            Self::String { .. } => "String",
            Self::Symbol { .. } => "Symbol",
            Self::Group { .. } => "Group",
            Self::Tuple { .. } => "Tuple",
            Self::Vector { .. } => "Vector",
            Self::Matrix { .. } => "Matrix",
            Self::Unary { .. } => "UnaryExpr",
            Self::Binary { .. } => "BinaryExpr",
            Self::Chain { .. } => "ComparisonChain",
            Self::Call { .. } => "CallExpr",
            Self::Assignment { .. } => "Assignment",
            Self::VarDecl { .. } => "VarDecl",
            Self::FunDecl { .. } => "FunDecl",
            Self::Block { .. } => "Block",
            Self::Conditional { .. } => "Conditional",
            Self::While { .. } => "WhileLoop",
            Self::Root { .. } => "Root",
            Self::Error(_) => "Error",
        }
    }
}

/// A parsed program.
///
/// Parsing never fails outright: a syntax error yields a program whose only
/// statement is [`Node::Error`].
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    root: Node,
}

impl Program {
    /// Wraps parsed statements into a program.
    #[must_use]
    pub const fn new(statements: Vec<Node>) -> Self {
        Self { root: Node::Root { statements } }
    }

    /// A program made of a single syntax error.
    #[must_use]
    pub fn failed(error: ParseError) -> Self {
        Self::new(vec![Node::Error(error)])
    }

    /// The root node.
    #[must_use]
    pub const fn root(&self) -> &Node {
        &self.root
    }

    /// The top-level statements.
    #[must_use]
    pub fn statements(&self) -> &[Node] {
        match &self.root {
            Node::Root { statements } => statements,
            _ => &[],
        }
    }

    /// The syntax error, if parsing failed.
    ///
    /// # Example
    /// ```
    /// let program = algom::parse("let = 4;");
    /// assert!(program.error().is_some());
    ///
    /// let program = algom::parse("let x = 4;");
    /// assert!(program.error().is_none());
    /// ```
    #[must_use]
    pub fn error(&self) -> Option<&ParseError> {
        match self.statements() {
            [Node::Error(error)] => Some(error),
            _ => None,
        }
    }
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Floored division (`//`)
    FloorDiv,
    /// Euclidean modulo (`mod`)
    Mod,
    /// Truncated remainder (`rem`, `%`)
    Rem,
    /// Exponentiation (`^`)
    Pow,
    /// Tuple concatenation (`++`)
    Concat,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
    /// Logical exclusive or (`xor`)
    Xor,
    /// Logical equivalence (`xnor`)
    Xnor,
    /// Negated and (`nand`)
    Nand,
    /// Negated or (`nor`)
    Nor,
}

impl BinaryOperator {
    /// Maps an infix token onto its operator.
    #[must_use]
    pub const fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => Self::Add,
            TokenKind::Minus | TokenKind::Negate => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::SlashSlash => Self::FloorDiv,
            TokenKind::Mod => Self::Mod,
            TokenKind::Rem | TokenKind::Percent => Self::Rem,
            TokenKind::Caret => Self::Pow,
            TokenKind::PlusPlus => Self::Concat,
            TokenKind::EqualEqual => Self::Equal,
            TokenKind::BangEqual => Self::NotEqual,
            TokenKind::Less => Self::Less,
            TokenKind::LessEqual => Self::LessEqual,
            TokenKind::Greater => Self::Greater,
            TokenKind::GreaterEqual => Self::GreaterEqual,
            TokenKind::And => Self::And,
            TokenKind::Or => Self::Or,
            TokenKind::Xor => Self::Xor,
            TokenKind::Xnor => Self::Xnor,
            TokenKind::Nand => Self::Nand,
            TokenKind::Nor => Self::Nor,
            _ => return None,
        };
        Some(op)
    }

    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::FloorDiv => "//",
            Self::Mod => "mod",
            Self::Rem => "rem",
            Self::Pow => "^",
            Self::Concat => "++",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Xnor => "xnor",
            Self::Nand => "nand",
            Self::Nor => "nor",
        }
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical negation (`not x`).
    Not,
    /// Factorial (`x!`).
    Factorial,
}

impl UnaryOperator {
    /// The operator as written in source.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Negate => "-",
            Self::Not => "not",
            Self::Factorial => "!",
        }
    }
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
