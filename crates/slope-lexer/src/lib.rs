//! SlopeScript lexer: converts source text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, LexError, Lexer};
pub use token::{reconstruct, Token, TokenKind, KEYWORDS};
