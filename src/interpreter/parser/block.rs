use crate::{
    ast::Node,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Precedence, TokenKind},
    },
};

impl Parser {
    /// Parses a block delimited by braces.
    ///
    /// Grammar: `block := "{" statement* "}"`
    ///
    /// Stray `;` inside the block are skipped, and the last statement may omit
    /// its own.
    pub(in crate::interpreter::parser) fn block(&mut self) -> ParseResult<Node> {
        let line = self.advance().line;
        let mut statements = Vec::new();

        loop {
            self.skip_semicolons();
            if self.matches(TokenKind::RightBrace) {
                break;
            }
            if self.check(TokenKind::Eof) {
                return Err(self.unexpected());
            }
            statements.push(self.statement()?);
        }

        let node = Node::Block { statements, line };
        Ok(self.built(node))
    }

    /// Parses a conditional.
    ///
    /// Grammar: `conditional := "if" "(" expression ")" branch (";"? "else" branch)?`
    ///
    /// An `else` binds to the nearest `if`. The `;` ending the first branch
    /// belongs to the conditional when an `else` follows it, so
    /// `if (c) y = 1; else y = 2;` is a single statement.
    pub(in crate::interpreter::parser) fn conditional(&mut self) -> ParseResult<Node> {
        let line = self.advance().line;
        let condition = self.condition()?;
        let then_branch = self.branch()?;

        if self.check(TokenKind::Semicolon) && self.peek_nth(1) == TokenKind::Else {
            self.advance();
        }

        let else_branch = if self.matches(TokenKind::Else) {
            Some(Box::new(self.branch()?))
        } else {
            None
        };

        let node = Node::Conditional { condition: Box::new(condition),
                                       then_branch: Box::new(then_branch),
                                       else_branch,
                                       line };
        Ok(self.built(node))
    }

    /// Parses a while loop.
    ///
    /// Grammar: `while := "while" "(" expression ")" branch`
    pub(in crate::interpreter::parser) fn while_loop(&mut self) -> ParseResult<Node> {
        let line = self.advance().line;
        let condition = self.condition()?;
        let body = self.branch()?;

        let node = Node::While { condition: Box::new(condition),
                                 body: Box::new(body),
                                 line };
        Ok(self.built(node))
    }

    /// Parses the body of `if`, `else` or `while`: a declaration or an
    /// expression, without its terminator.
    ///
    /// Grammar: `branch := declaration | expression`
    fn branch(&mut self) -> ParseResult<Node> {
        if self.check(TokenKind::Let) {
            self.declaration()
        } else {
            self.expression(Precedence::Nil)
        }
    }

    /// Parses the parenthesized condition of `if` and `while`.
    fn condition(&mut self) -> ParseResult<Node> {
        self.expect(TokenKind::LeftParen, "“(” before the condition")?;
        let condition = self.expression(Precedence::Nil)?;
        self.expect(TokenKind::RightParen, "“)” after the condition")?;
        Ok(condition)
    }
}
