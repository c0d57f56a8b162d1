//! Core SlopeScript lexer: converts source text to a token stream.
//!
//! The lexer is deliberately lenient:
//! - Unrecognised characters are dropped without a diagnostic
//! - Unterminated block comments and strings run to end of input
//! - Strings have no escape sequences; a `"` always closes the literal
//!
//! The only hard failure is a numeric lexeme the number parser rejects.

use slope_types::ast::Literal;
use slope_types::{ErrorCategory, Span};
use thiserror::Error;

use crate::token::{Token, TokenKind};

/// A numeric lexeme that could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    /// More than one `.` or similar, e.g. `1.2.3`.
    #[error("could not convert '{text}' to a number")]
    InvalidNumber { text: String, span: Span },
    /// Integer literal outside the 64-bit range.
    #[error("integer literal '{text}' is too large")]
    IntegerTooLarge { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            Self::InvalidNumber { span, .. } | Self::IntegerTooLarge { span, .. } => *span,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidNumber { .. } | Self::IntegerTooLarge { .. } => ErrorCategory::Value,
        }
    }
}

/// Lex `source` into tokens in source order.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).lex()
}

/// The SlopeScript lexer.
pub struct Lexer {
    /// The source as characters, so identifiers may use any alphabetic script.
    chars: Vec<char>,
    /// Index into `chars`.
    pos: usize,
    /// Current line (1-based).
    line: u32,
    /// Current column (1-based).
    col: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let Some(ch) = self.peek() else {
                break;
            };

            if ch == '/' && self.peek_at(1) == Some('/') {
                self.skip_line_comment();
                continue;
            }
            if ch == '/' && self.peek_at(1) == Some('*') {
                self.skip_block_comment();
                continue;
            }

            let start = self.current_span();
            if ch.is_alphabetic() || ch == '_' {
                tokens.push(self.scan_identifier(start));
            } else if ch.is_ascii_digit() {
                tokens.push(self.scan_number(start)?);
            } else if ch == '"' {
                tokens.push(self.scan_string(start));
            } else if let Some(token) = self.scan_operator(start) {
                tokens.push(token);
            }
        }

        Ok(tokens)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Consume one character, counting lines on every `\n`.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn current_span(&self) -> Span {
        Span::new(self.line, self.col)
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(' ' | '\t' | '\r' | '\n')) {
            self.advance();
        }
    }

    /// `// ...` up to, not including, the newline.
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    /// `/* ... */`, not nested. Unterminated comments swallow the rest.
    fn skip_block_comment(&mut self) {
        self.advance();
        self.advance();
        loop {
            match self.peek() {
                None => break,
                Some('*') if self.peek_at(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanners
    // ─────────────────────────────────────────────────────────────

    fn scan_identifier(&mut self, span: Span) -> Token {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                self.advance();
            } else {
                break;
            }
        }

        let text = self.text_from(start);
        match TokenKind::from_keyword(&text) {
            Some(TokenKind::True) => Token::new(TokenKind::True, Literal::Bool(true), span),
            Some(TokenKind::False) => Token::new(TokenKind::False, Literal::Bool(false), span),
            Some(kind) => Token::new(kind, Literal::Str(text), span),
            None => Token::new(TokenKind::Identifier, Literal::Str(text), span),
        }
    }

    /// ASCII digits and dots, contiguous. A dot anywhere selects a float.
    /// Other Unicode digits never start a number.
    fn scan_number(&mut self, span: Span) -> Result<Token, LexError> {
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch.is_ascii_digit() || ch == '.') {
            self.advance();
        }

        let text = self.text_from(start);
        let value = if text.contains('.') {
            match text.parse::<f64>() {
                Ok(n) => Literal::Float(n),
                Err(_) => return Err(LexError::InvalidNumber { text, span }),
            }
        } else {
            match text.parse::<i64>() {
                Ok(n) => Literal::Int(n),
                Err(_) => return Err(LexError::IntegerTooLarge { text, span }),
            }
        };

        Ok(Token::new(TokenKind::Number, value, span))
    }

    /// Everything up to the next `"` verbatim, newlines included.
    fn scan_string(&mut self, span: Span) -> Token {
        self.advance(); // opening quote
        let start = self.pos;
        while matches!(self.peek(), Some(ch) if ch != '"') {
            self.advance();
        }
        let text = self.text_from(start);
        self.advance(); // closing quote, if any
        Token::new(TokenKind::String, Literal::Str(text), span)
    }

    /// Two-character operators first, then single characters. Anything
    /// else is consumed and dropped.
    fn scan_operator(&mut self, span: Span) -> Option<Token> {
        if let (Some(a), Some(b)) = (self.peek(), self.peek_at(1)) {
            let pair: String = [a, b].iter().collect();
            if let Some(kind) = TokenKind::from_two_char_op(&pair) {
                self.advance();
                self.advance();
                return Some(Token::new(kind, Literal::Str(pair), span));
            }
        }

        let ch = self.advance()?;
        TokenKind::from_single_char_op(ch)
            .map(|kind| Token::new(kind, Literal::Str(ch.to_string()), span))
    }
}
