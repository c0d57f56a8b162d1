//! Core parser infrastructure: token cursor, expect helpers, program entry.

use slope_lexer::token::{Token, TokenKind};
use slope_types::ast::{Literal, Program};
use slope_types::Span;

use crate::error::{ParseError, ParseResult};

/// Maximum expression nesting (parentheses, unary chains, array literals).
pub const MAX_NESTING: u32 = 200;

/// Maximum height of one expression tree, counting operator chains.
pub const MAX_EXPR_DEPTH: u32 = 1000;

/// Parse a complete `summit ... lodge` program.
pub fn parse(tokens: Vec<Token>) -> ParseResult<Program> {
    Parser::new(tokens).parse()
}

/// The SlopeScript parser.
///
/// Recursive descent over a token vector. Stops at the first error.
pub struct Parser {
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Current expression nesting depth.
    pub(crate) depth: u32,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    pub(crate) fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.peek().map(|t| t.kind)
    }

    /// Kind of the token `n` places after the current one.
    pub(crate) fn look_ahead(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    pub(crate) fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(crate) fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(kind)
    }

    /// Span of the current token, or of the last token at end of input.
    pub(crate) fn current_span(&self) -> Span {
        self.peek()
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or_default()
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    pub(crate) fn expect(&mut self, expected: TokenKind) -> ParseResult<Token> {
        if self.check(expected) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(ParseError::Expected {
            expected,
            found: self.peek().cloned(),
        })
    }

    /// Expect an identifier and return its name.
    pub(crate) fn expect_identifier(&mut self) -> ParseResult<String> {
        let token = self.expect(TokenKind::Identifier)?;
        match token.value {
            Literal::Str(name) => Ok(name),
            other => Ok(other.to_string()),
        }
    }

    pub(crate) fn unexpected(&self) -> ParseError {
        ParseError::Unexpected {
            found: self.peek().cloned(),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a [`Program`].
    ///
    /// `summit` must come first and `lodge` last; anything after the closing
    /// `lodge` is rejected.
    pub fn parse(mut self) -> ParseResult<Program> {
        self.expect(TokenKind::Summit)?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::Lodge) && !self.at_end() {
            stmts.push(self.parse_statement()?);
        }
        self.expect(TokenKind::Lodge)?;
        if let Some(found) = self.advance() {
            return Err(ParseError::TrailingInput { found });
        }
        Ok(Program { stmts })
    }
}
