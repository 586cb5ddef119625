use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::Node,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Precedence, TokenKind},
    },
};

impl Parser {
    /// Parses statements until the end of input.
    ///
    /// Grammar: `program := statement* EOF`
    pub(in crate::interpreter::parser) fn program(&mut self) -> ParseResult<Vec<Node>> {
        let mut statements = Vec::new();

        loop {
            self.skip_semicolons();
            if self.check(TokenKind::Eof) {
                break;
            }
            let statement = self.statement()?;
            trace!(kind = statement.kind_name(), line = statement.line(), "statement");
            statements.push(statement);
        }

        Ok(statements)
    }

    /// Parses a single statement and its terminator.
    ///
    /// Grammar: `statement := (declaration | expression) ";"`
    ///
    /// The `;` may be left out before `}` or the end of input, and after a
    /// statement that itself ends with a `}`.
    pub(in crate::interpreter::parser) fn statement(&mut self) -> ParseResult<Node> {
        let node = if self.check(TokenKind::Let) {
            self.declaration()?
        } else {
            self.expression(Precedence::Nil)?
        };

        let closed_by_brace = self.previous_kind() == Some(TokenKind::RightBrace);
        if self.matches(TokenKind::Semicolon)
           || closed_by_brace
           || self.check(TokenKind::RightBrace)
           || self.check(TokenKind::Eof)
        {
            return Ok(node);
        }

        Err(self.expected("“;” after statement"))
    }

    /// Parses a variable or function declaration.
    ///
    /// Grammar:
    /// ```text
    ///     let name
    ///     let name = expression
    ///     let name(p1, ..., pn) = expression
    /// ```
    /// A function name is recorded before its body is parsed, so the body can
    /// call itself.
    pub(in crate::interpreter::parser) fn declaration(&mut self) -> ParseResult<Node> {
        let line = self.advance().line;
        let name = self.expect(TokenKind::Symbol, "a name after “let”")?.lexeme;

        if self.matches(TokenKind::LeftParen) {
            let params = self.parameters()?;
            self.expect(TokenKind::Assign, "“=” after the parameter list")?;
            self.functions.insert(name.clone());

            let body = self.expression(Precedence::Nil)?;
            let node = Node::FunDecl { name,
                                       params,
                                       body: Rc::new(body),
                                       line };
            return Ok(self.built(node));
        }

        let initializer = if self.matches(TokenKind::Assign) {
            Some(Box::new(self.expression(Precedence::Nil)?))
        } else {
            None
        };

        let node = Node::VarDecl { name,
                                   initializer,
                                   line };
        Ok(self.built(node))
    }

    /// Parses the parameter names of a function declaration, after the `(`.
    fn parameters(&mut self) -> ParseResult<Vec<String>> {
        let mut params = Vec::new();
        if self.matches(TokenKind::RightParen) {
            return Ok(params);
        }

        loop {
            params.push(self.expect(TokenKind::Symbol, "a parameter name")?.lexeme);
            if self.matches(TokenKind::RightParen) {
                return Ok(params);
            }
            self.expect(TokenKind::Comma, "“,” or “)” in the parameter list")?;
        }
    }
}
