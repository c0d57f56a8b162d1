//! Parse error types.

use slope_lexer::{Token, TokenKind};
use slope_types::{ErrorCategory, Span};
use thiserror::Error;

/// A fatal syntax error. Parsing stops at the first one.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A specific token was required; `found` is `None` at end of input.
    #[error("expected {expected} but got {}", describe(.found))]
    Expected {
        expected: TokenKind,
        found: Option<Token>,
    },

    /// No expression can start with `found`.
    #[error("unexpected {}", describe(.found))]
    Unexpected { found: Option<Token> },

    /// Tokens remain after the program's closing `lodge`.
    #[error("unexpected {found} after the closing 'lodge'")]
    TrailingInput { found: Token },

    /// Expressions nested deeper than [`crate::MAX_NESTING`], or a tree
    /// taller than [`crate::MAX_EXPR_DEPTH`].
    #[error("expression nested more than {limit} levels deep")]
    NestingTooDeep { limit: u32, span: Span },
}

fn describe(found: &Option<Token>) -> String {
    match found {
        Some(token) => token.to_string(),
        None => "end of input".to_string(),
    }
}

impl ParseError {
    /// Where the error was detected; `None` when input ran out.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Expected { found, .. } | Self::Unexpected { found } => {
                found.as_ref().map(|t| t.span)
            }
            Self::TrailingInput { found } => Some(found.span),
            Self::NestingTooDeep { span, .. } => Some(*span),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Syntax
    }
}

/// Result alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;
