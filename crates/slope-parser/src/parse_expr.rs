//! Expression parsing with operator precedence.
//!
//! Precedence (lowest → highest):
//! 7. `||`
//! 6. `&&`
//! 5. `==`, `!=`
//! 4. `<`, `>`, `<=`, `>=`
//! 3. `+`, `-`
//! 2. `*`, `/`
//! 1. unary `!`, `-` (right-associative)
//!
//! Every binary level is left-associative.

use slope_lexer::token::TokenKind;
use slope_types::ast::*;
use slope_types::Span;

use crate::error::{ParseError, ParseResult};
use crate::parser::{Parser, MAX_EXPR_DEPTH, MAX_NESTING};

/// An expression and the height of its tree (a leaf has height 1).
type Parsed = (Expr, u32);

type Level = fn(&mut Parser) -> ParseResult<Parsed>;

impl Parser {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_nested().map(|(expr, _)| expr)
    }

    /// A full expression one syntactic level deeper than the caller.
    fn parse_nested(&mut self) -> ParseResult<Parsed> {
        self.enter()?;
        let result = self.parse_or();
        self.depth -= 1;
        result
    }

    fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_NESTING,
                span: self.current_span(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Build a node, rejecting trees taller than [`MAX_EXPR_DEPTH`].
    ///
    /// Long operator chains fold into left-deep trees without any syntactic
    /// nesting, so this is what bounds them.
    fn node(kind: ExprKind, span: Span, height: u32) -> ParseResult<Parsed> {
        if height > MAX_EXPR_DEPTH {
            return Err(ParseError::NestingTooDeep {
                limit: MAX_EXPR_DEPTH,
                span,
            });
        }
        Ok((Expr::new(kind, span), height))
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `operand { op operand }` for one precedence level.
    fn parse_binary_level(
        &mut self,
        operand: Level,
        op_for: fn(TokenKind) -> Option<BinOp>,
    ) -> ParseResult<Parsed> {
        let (mut left, mut height) = operand(self)?;
        while let Some(op) = self.peek_kind().and_then(op_for) {
            self.advance();
            let (right, right_height) = operand(self)?;
            let span = left.span;
            (left, height) = Parser::node(
                ExprKind::Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
                height.max(right_height) + 1,
            )?;
        }
        Ok((left, height))
    }

    fn parse_or(&mut self) -> ParseResult<Parsed> {
        self.parse_binary_level(Parser::parse_and, |kind| match kind {
            TokenKind::OrOr => Some(BinOp::Or),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> ParseResult<Parsed> {
        self.parse_binary_level(Parser::parse_equality, |kind| match kind {
            TokenKind::AndAnd => Some(BinOp::And),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> ParseResult<Parsed> {
        self.parse_binary_level(Parser::parse_comparison, |kind| match kind {
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::BangEq => Some(BinOp::NotEq),
            _ => None,
        })
    }

    fn parse_comparison(&mut self) -> ParseResult<Parsed> {
        self.parse_binary_level(Parser::parse_additive, |kind| match kind {
            TokenKind::Less => Some(BinOp::Less),
            TokenKind::Greater => Some(BinOp::Greater),
            TokenKind::LessEq => Some(BinOp::LessEq),
            TokenKind::GreaterEq => Some(BinOp::GreaterEq),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> ParseResult<Parsed> {
        self.parse_binary_level(Parser::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Parsed> {
        self.parse_binary_level(Parser::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            _ => None,
        })
    }

    /// `("!" | "-") UnaryExpr | PrimaryExpr`
    fn parse_unary(&mut self) -> ParseResult<Parsed> {
        let op = match self.peek_kind() {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Minus) => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        let span = self.current_span();
        self.advance();
        self.enter()?;
        let operand = self.parse_unary();
        self.depth -= 1;
        let (operand, height) = operand?;
        Parser::node(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            span,
            height + 1,
        )
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Primary Expressions
    // ══════════════════════════════════════════════════════════════════════════

    fn parse_primary(&mut self) -> ParseResult<Parsed> {
        let span = self.current_span();
        match self.peek_kind() {
            Some(TokenKind::Number | TokenKind::String | TokenKind::True | TokenKind::False) => {
                let token = self.advance().ok_or_else(|| self.unexpected())?;
                Ok((Expr::new(ExprKind::Literal(token.value), span), 1))
            }
            Some(TokenKind::Identifier) => {
                let name = self.expect_identifier()?;
                if self.check(TokenKind::LBracket) {
                    self.advance();
                    let (index, height) = self.parse_nested()?;
                    self.expect(TokenKind::RBracket)?;
                    Parser::node(
                        ExprKind::Index {
                            name,
                            index: Box::new(index),
                        },
                        span,
                        height + 1,
                    )
                } else {
                    Ok((Expr::new(ExprKind::Var(name), span), 1))
                }
            }
            Some(TokenKind::LParen) => {
                self.advance();
                let inner = self.parse_nested()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            Some(TokenKind::LBracket) => self.parse_array_literal(),
            Some(TokenKind::Chairlift) => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let (prompt, height) = self.parse_nested()?;
                self.expect(TokenKind::RParen)?;
                Parser::node(ExprKind::Prompt(Box::new(prompt)), span, height + 1)
            }
            _ => Err(self.unexpected()),
        }
    }

    /// `[ e1, e2, ... ]`: commas between elements are optional and a
    /// trailing comma is allowed.
    fn parse_array_literal(&mut self) -> ParseResult<Parsed> {
        let span = self.expect(TokenKind::LBracket)?.span;
        let mut elements = Vec::new();
        let mut tallest = 0;
        while !self.check(TokenKind::RBracket) {
            let (element, height) = self.parse_nested()?;
            tallest = tallest.max(height);
            elements.push(element);
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }
        self.expect(TokenKind::RBracket)?;
        Parser::node(ExprKind::Array(elements), span, tallest + 1)
    }
}
