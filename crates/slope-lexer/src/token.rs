//! Token types for the SlopeScript lexer.
//!
//! Defines [`TokenKind`], the closed set of lexeme classes, and [`Token`],
//! which pairs a kind with its literal value and source [`Span`].

use slope_types::ast::Literal;
use slope_types::Span;
use std::fmt;

/// All 17 reserved words of SlopeScript.
///
/// The lexer emits a keyword token for each of these instead of
/// [`TokenKind::Identifier`].
pub const KEYWORDS: &[&str] = &[
    // Program structure (4)
    "summit", "lodge", "pack", "carve",
    // Expressions (1)
    "chairlift",
    // Branches (3)
    "greenCircle", "blueSquare", "blackDiamond",
    // Loops (5)
    "gondola", "liftline", "in", "bail", "sendIt",
    // Reserved, unused (2)
    "trick", "nail",
    // Booleans (2)
    "powder", "ice",
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the lexer.
///
/// `value` holds the parsed literal for numbers, strings and booleans, and
/// the lexeme text for everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: Literal,
    /// Where the token starts.
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, value: Literal, span: Span) -> Self {
        Self { kind, value, span }
    }

    /// Line on which the token starts.
    pub fn line(&self) -> u32 {
        self.span.line
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    /// Source text that lexes back to this token (kind and value).
    pub fn to_source(&self) -> String {
        match (&self.kind, &self.value) {
            (TokenKind::String, Literal::Str(s)) => format!("\"{s}\""),
            (_, value) => value.to_string(),
        }
    }

    /// Compare kind and value, ignoring the source position.
    pub fn same_lexeme(&self, other: &Token) -> bool {
        self.kind == other.kind && self.value == other.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::String => {
                write!(f, "{} '{}' at line {}", self.kind, self.value, self.line())
            }
            _ => write!(f, "{} at line {}", self.kind, self.line()),
        }
    }
}

/// Render a token sequence back to source text, one space between tokens.
pub fn reconstruct(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(Token::to_source)
        .collect::<Vec<_>>()
        .join(" ")
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// `42`, `3.14`
    Number,
    /// `"text"`
    String,
    /// `powder`
    True,
    /// `ice`
    False,

    /// User-defined name.
    Identifier,

    // ── Keywords ──────────────────────────────────────────────
    /// `summit`
    Summit,
    /// `lodge`
    Lodge,
    /// `pack`
    Pack,
    /// `carve`
    Carve,
    /// `chairlift`
    Chairlift,
    /// `greenCircle`
    GreenCircle,
    /// `blueSquare`
    BlueSquare,
    /// `blackDiamond`
    BlackDiamond,
    /// `gondola`
    Gondola,
    /// `liftline`
    Liftline,
    /// `in`
    In,
    /// `bail`
    Break,
    /// `sendIt`
    Continue,
    /// `trick`
    Trick,
    /// `nail`
    Nail,

    // ── Operators ─────────────────────────────────────────────
    EqEq,
    BangEq,
    LessEq,
    GreaterEq,
    AndAnd,
    OrOr,
    Plus,
    Minus,
    Star,
    Slash,
    Eq,
    Less,
    Greater,
    Bang,

    // ── Punctuation ───────────────────────────────────────────
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
}

impl TokenKind {
    /// Look up a reserved word. Returns `None` for user identifiers.
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "summit" => TokenKind::Summit,
            "lodge" => TokenKind::Lodge,
            "pack" => TokenKind::Pack,
            "carve" => TokenKind::Carve,
            "chairlift" => TokenKind::Chairlift,
            "greenCircle" => TokenKind::GreenCircle,
            "blueSquare" => TokenKind::BlueSquare,
            "blackDiamond" => TokenKind::BlackDiamond,
            "gondola" => TokenKind::Gondola,
            "liftline" => TokenKind::Liftline,
            "in" => TokenKind::In,
            "bail" => TokenKind::Break,
            "sendIt" => TokenKind::Continue,
            "trick" => TokenKind::Trick,
            "nail" => TokenKind::Nail,
            "powder" => TokenKind::True,
            "ice" => TokenKind::False,
            _ => return None,
        })
    }

    /// Two-character operators, matched before single characters.
    pub fn from_two_char_op(s: &str) -> Option<TokenKind> {
        Some(match s {
            "==" => TokenKind::EqEq,
            "!=" => TokenKind::BangEq,
            "<=" => TokenKind::LessEq,
            ">=" => TokenKind::GreaterEq,
            "&&" => TokenKind::AndAnd,
            "||" => TokenKind::OrOr,
            _ => return None,
        })
    }

    pub fn from_single_char_op(ch: char) -> Option<TokenKind> {
        Some(match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '=' => TokenKind::Eq,
            '<' => TokenKind::Less,
            '>' => TokenKind::Greater,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            '!' => TokenKind::Bang,
            _ => return None,
        })
    }

    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Summit
                | TokenKind::Lodge
                | TokenKind::Pack
                | TokenKind::Carve
                | TokenKind::Chairlift
                | TokenKind::GreenCircle
                | TokenKind::BlueSquare
                | TokenKind::BlackDiamond
                | TokenKind::Gondola
                | TokenKind::Liftline
                | TokenKind::In
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Trick
                | TokenKind::Nail
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// Keywords that open a conditional branch.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            TokenKind::GreenCircle | TokenKind::BlueSquare | TokenKind::BlackDiamond
        )
    }

    /// Keywords that end an implicit block body.
    pub fn ends_block(self) -> bool {
        self.is_branch() || matches!(self, TokenKind::Gondola | TokenKind::Liftline | TokenKind::Lodge)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::Number => return f.write_str("number"),
            TokenKind::String => return f.write_str("string"),
            TokenKind::Identifier => return f.write_str("identifier"),
            TokenKind::True => "powder",
            TokenKind::False => "ice",
            TokenKind::Summit => "summit",
            TokenKind::Lodge => "lodge",
            TokenKind::Pack => "pack",
            TokenKind::Carve => "carve",
            TokenKind::Chairlift => "chairlift",
            TokenKind::GreenCircle => "greenCircle",
            TokenKind::BlueSquare => "blueSquare",
            TokenKind::BlackDiamond => "blackDiamond",
            TokenKind::Gondola => "gondola",
            TokenKind::Liftline => "liftline",
            TokenKind::In => "in",
            TokenKind::Break => "bail",
            TokenKind::Continue => "sendIt",
            TokenKind::Trick => "trick",
            TokenKind::Nail => "nail",
            TokenKind::EqEq => "==",
            TokenKind::BangEq => "!=",
            TokenKind::LessEq => "<=",
            TokenKind::GreaterEq => ">=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Eq => "=",
            TokenKind::Less => "<",
            TokenKind::Greater => ">",
            TokenKind::Bang => "!",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Comma => ",",
        };
        write!(f, "'{text}'")
    }
}

// ─────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────
