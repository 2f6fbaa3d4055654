use std::ops::Range;

use crate::{ParseError, Token};

use super::MAX_DEPTH;

/// Token stream with single-token lookahead.
///
/// Each token is paired with its byte span in the formula source so errors
/// can point at the offending text.
pub(super) struct TokenStream<'a, 'src> {
    tokens: &'a [(Token<'src>, Range<usize>)],
    pos: usize,
    depth: usize,
}

impl<'a, 'src> TokenStream<'a, 'src> {
    pub(super) fn new(tokens: &'a [(Token<'src>, Range<usize>)]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Enters one level of nesting, failing past [`MAX_DEPTH`].
    pub(super) fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_DEPTH,
                span: self.current_span(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Descends one level and returns the depth to restore with [`Self::leave`].
    pub(super) fn enter(&mut self) -> Result<usize, ParseError> {
        let depth = self.depth;
        self.descend()?;
        Ok(depth)
    }

    pub(super) fn leave(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Peeks at the current token without consuming it.
    pub(super) fn peek(&self) -> Option<Token<'src>> {
        self.tokens.get(self.pos).map(|(token, _)| *token)
    }

    /// Consumes and returns the current token.
    pub(super) fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Consumes the current token if it equals `expected`.
    pub(super) fn eat(&mut self, expected: Token<'src>) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consumes `expected` or fails with a positioned error.
    pub(super) fn expect(
        &mut self,
        expected: Token<'src>,
        context: &'static str,
    ) -> Result<(), ParseError> {
        if self.eat(expected) {
            Ok(())
        } else {
            Err(self.unexpected(context))
        }
    }

    /// Span of the current token, or an empty span at the end of input.
    pub(super) fn current_span(&self) -> Range<usize> {
        match self.tokens.get(self.pos) {
            Some((_, span)) => span.clone(),
            None => {
                let end = self.tokens.last().map_or(0, |(_, span)| span.end);
                end..end
            }
        }
    }

    /// Span of the most recently consumed token.
    pub(super) fn previous_span(&self) -> Range<usize> {
        self.pos
            .checked_sub(1)
            .and_then(|prev| self.tokens.get(prev))
            .map_or(0..0, |(_, span)| span.clone())
    }

    /// Builds the error for whatever token sits at the current position.
    pub(super) fn unexpected(&self, context: &'static str) -> ParseError {
        match self.peek() {
            Some(token) => ParseError::UnexpectedToken {
                found: token.to_string(),
                context,
                span: self.current_span(),
            },
            None => ParseError::UnexpectedEnd { context },
        }
    }
}
