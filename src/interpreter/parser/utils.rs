use crate::{
    ast::{Node, NodeId},
    error::ParseErrorKind,
    interpreter::{
        parser::core::{ParseResult, Parser},
        token::{Precedence, TokenKind},
        value::number::Number,
    },
};

impl Parser {
    /// Parses a comma-separated list of expressions up to `closing`.
    ///
    /// The cursor sits after the opening delimiter. An immediately
    /// encountered closing token produces an empty list.
    ///
    /// Grammar (simplified): `list := (expression ("," expression)*)? closing`
    ///
    /// # Errors
    /// `Expected` naming `expected` when an element is followed by anything
    /// but a comma or the closing token.
    pub(in crate::interpreter::parser) fn comma_list(&mut self,
                                                     closing: TokenKind,
                                                     expected: &'static str)
                                                     -> ParseResult<Vec<Node>> {
        let mut items = Vec::new();
        if self.matches(closing) {
            return Ok(items);
        }

        loop {
            items.push(self.expression(Precedence::Nil)?);
            if self.matches(closing) {
                return Ok(items);
            }
            self.expect(TokenKind::Comma, expected)?;
        }
    }

    /// Parses a bracketed literal: a vector, a matrix or a range.
    ///
    /// - `[a, b, ...]` is a vector, or a matrix when any element is itself a
    ///   vector. Every element of a matrix must then be a vector, and all rows
    ///   the same length.
    /// - `[a:b]` and `[a:b:step]` are shorthand for `range(a, b, step)`, the
    ///   step defaulting to `1`.
    pub(in crate::interpreter::parser) fn array(&mut self) -> ParseResult<Node> {
        // Reserved up front so a range's `range` symbol gets the id it would
        // get when written out as a call.
        let id = self.fresh_id();
        let line = self.advance().line;

        if self.matches(TokenKind::RightBracket) {
            return Ok(Node::Vector { elements: Vec::new(),
                                     line });
        }

        let first = self.expression(Precedence::Nil)?;
        if self.matches(TokenKind::Colon) {
            return self.range(first, id, line);
        }

        let mut elements = vec![first];
        if !self.matches(TokenKind::RightBracket) {
            self.expect(TokenKind::Comma, "“,” or “]” in the array")?;
            elements.extend(self.comma_list(TokenKind::RightBracket, "“,” or “]” in the array")?);
        }

        if !elements.iter().any(|element| matches!(element, Node::Vector { .. })) {
            return Ok(Node::Vector { elements, line });
        }

        let mut rows = Vec::with_capacity(elements.len());
        for element in elements {
            match element {
                Node::Vector { elements, .. } => rows.push(elements),
                _ => return Err(self.error(ParseErrorKind::MixedMatrix)),
            }
        }
        if rows.windows(2).any(|pair| pair[0].len() != pair[1].len()) {
            return Err(self.error(ParseErrorKind::JaggedArray));
        }

        Ok(Node::Matrix { rows, line })
    }

    /// Finishes `[start:end]` or `[start:end:step]`, after the first colon.
    fn range(&mut self, start: Node, id: NodeId, line: usize) -> ParseResult<Node> {
        let end = self.expression(Precedence::Nil)?;
        let step = if self.matches(TokenKind::Colon) {
            self.expression(Precedence::Nil)?
        } else {
            Node::Number { value: Number::Integer(1),
                           line }
        };
        self.expect(TokenKind::RightBracket, "“]” after the range")?;

        let callee = Node::Symbol { name: "range".to_string(),
                                    id,
                                    line };
        Ok(Node::Call { callee: Box::new(callee),
                        arguments: vec![start, end, step],
                        line })
    }
}
