//! AST node types for SlopeScript.
//!
//! Statements and expressions are closed enums so the evaluator can match
//! them exhaustively. Every node carries the [`Span`] of its first token.

use crate::Span;
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Program
// ══════════════════════════════════════════════════════════════════════════════

/// `summit statement* lodge`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

// ══════════════════════════════════════════════════════════════════════════════
// Literals
// ══════════════════════════════════════════════════════════════════════════════

/// A literal value as written in source. Also used as the payload of tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(n) => {
                let text = n.to_string();
                if text.contains(['.', 'e', 'i', 'N']) {
                    f.write_str(&text)
                } else {
                    write!(f, "{text}.0")
                }
            }
            Literal::Str(s) => f.write_str(s),
            Literal::Bool(true) => f.write_str("powder"),
            Literal::Bool(false) => f.write_str("ice"),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `pack name = expr`
    Assign(AssignStmt),
    /// `carve expr`
    Print(PrintStmt),
    /// `greenCircle (c) ... blueSquare (c) ... blackDiamond ...`
    Conditional(ConditionalStmt),
    /// `gondola (c) body`
    While(WhileStmt),
    /// `liftline name in expr body`
    ForEach(ForEachStmt),
    /// `bail`
    Break(Span),
    /// `sendIt`
    Continue(Span),
    /// A bare expression, evaluated for its side effects.
    Expr(ExprStmt),
}

impl Stmt {
    pub fn span(&self) -> Span {
        match self {
            Stmt::Assign(s) => s.span,
            Stmt::Print(s) => s.span,
            Stmt::Conditional(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::ForEach(s) => s.span,
            Stmt::Break(span) | Stmt::Continue(span) => *span,
            Stmt::Expr(s) => s.span,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssignStmt {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub value: Expr,
    pub span: Span,
}

/// Branches are tried in declaration order; the first one whose condition
/// holds (or which has no condition) runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalStmt {
    pub branches: Vec<Branch>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// `None` for `blackDiamond`.
    pub condition: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStmt {
    pub var: String,
    pub iterable: Expr,
    pub body: Vec<Stmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    /// `name`
    Var(String),
    /// `[e1, e2, ...]`
    Array(Vec<Expr>),
    /// `name[index]`, a single subscript on a variable.
    Index { name: String, index: Box<Expr> },
    /// `chairlift(prompt)`
    Prompt(Box<Expr>),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary { op: UnaryOp, operand: Box<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    And,
    Or,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::Greater => ">",
            BinOp::LessEq => "<=",
            BinOp::GreaterEq => ">=",
            BinOp::And => "&&",
            BinOp::Or => "||",
        }
    }
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `!`
    Not,
    /// `-`
    Neg,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => f.write_str("!"),
            UnaryOp::Neg => f.write_str("-"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_literal_keeps_fraction() {
        assert_eq!(Literal::Float(2.0).to_string(), "2.0");
        assert_eq!(Literal::Float(0.25).to_string(), "0.25");
        assert_eq!(Literal::Float(1e20).to_string(), "100000000000000000000.0");
    }

    #[test]
    fn test_bool_literal_uses_keywords() {
        assert_eq!(Literal::Bool(true).to_string(), "powder");
        assert_eq!(Literal::Bool(false).to_string(), "ice");
    }

    #[test]
    fn test_stmt_span() {
        let span = Span::new(2, 3);
        let stmt = Stmt::Print(PrintStmt {
            value: Expr::new(ExprKind::Literal(Literal::Int(1)), Span::new(2, 9)),
            span,
        });
        assert_eq!(stmt.span(), span);
        assert_eq!(Stmt::Break(span).span(), span);
    }
}
