//! Statement parsing.
//!
//! There is no block delimiter token. A body runs until the next control
//! keyword (`greenCircle`, `blueSquare`, `blackDiamond`, `gondola`,
//! `liftline`), a `lodge`, or end of input. A `lodge` with more input after
//! it belongs to the body and closes it; the last `lodge` always belongs to
//! the program.

use slope_lexer::token::TokenKind;
use slope_types::ast::*;

use crate::error::ParseResult;
use crate::parser::Parser;

impl Parser {
    /// Parse a single statement, dispatching on the lookahead token.
    pub(crate) fn parse_statement(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        match self.peek_kind() {
            Some(TokenKind::Pack) => self.parse_assign(),
            Some(TokenKind::Carve) => self.parse_print(),
            Some(kind) if kind.is_branch() => self.parse_conditional(),
            Some(TokenKind::Gondola) => self.parse_while(),
            Some(TokenKind::Liftline) => self.parse_for_each(),
            Some(TokenKind::Break) => {
                self.advance();
                Ok(Stmt::Break(span))
            }
            Some(TokenKind::Continue) => {
                self.advance();
                Ok(Stmt::Continue(span))
            }
            _ => {
                let expr = self.parse_expression()?;
                Ok(Stmt::Expr(ExprStmt { expr, span }))
            }
        }
    }

    /// Statements up to the end of an implicit block.
    ///
    /// Returns the body and whether a closing `lodge` was consumed.
    pub(crate) fn parse_body(&mut self) -> ParseResult<(Vec<Stmt>, bool)> {
        let mut body = Vec::new();
        while let Some(kind) = self.peek_kind() {
            if kind.ends_block() {
                break;
            }
            body.push(self.parse_statement()?);
        }
        let closed = self.check(TokenKind::Lodge) && self.look_ahead(1).is_some();
        if closed {
            self.advance();
        }
        Ok((body, closed))
    }

    /// `pack name = expr`
    fn parse_assign(&mut self) -> ParseResult<Stmt> {
        let span = self.expect(TokenKind::Pack)?.span;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Eq)?;
        let value = self.parse_expression()?;
        Ok(Stmt::Assign(AssignStmt { name, value, span }))
    }

    /// `carve expr`
    fn parse_print(&mut self) -> ParseResult<Stmt> {
        let span = self.expect(TokenKind::Carve)?.span;
        let value = self.parse_expression()?;
        Ok(Stmt::Print(PrintStmt { value, span }))
    }

    /// A run of branches. `greenCircle` and `blueSquare` take a parenthesised
    /// condition, `blackDiamond` takes none. Any kind may appear in any
    /// order and repeat.
    fn parse_conditional(&mut self) -> ParseResult<Stmt> {
        let span = self.current_span();
        let mut branches = Vec::new();
        while let Some(kind) = self.peek_kind().filter(|k| k.is_branch()) {
            let branch_span = self.current_span();
            self.advance();
            let condition = if kind == TokenKind::BlackDiamond {
                None
            } else {
                Some(self.parse_paren_condition()?)
            };
            let (body, closed) = self.parse_body()?;
            branches.push(Branch {
                condition,
                body,
                span: branch_span,
            });
            if closed {
                break;
            }
        }
        Ok(Stmt::Conditional(ConditionalStmt { branches, span }))
    }

    /// `gondola (cond) body`
    fn parse_while(&mut self) -> ParseResult<Stmt> {
        let span = self.expect(TokenKind::Gondola)?.span;
        let condition = self.parse_paren_condition()?;
        let (body, _) = self.parse_body()?;
        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            span,
        }))
    }

    /// `liftline name in expr body`
    fn parse_for_each(&mut self) -> ParseResult<Stmt> {
        let span = self.expect(TokenKind::Liftline)?.span;
        let var = self.expect_identifier()?;
        self.expect(TokenKind::In)?;
        let iterable = self.parse_expression()?;
        let (body, _) = self.parse_body()?;
        Ok(Stmt::ForEach(ForEachStmt {
            var,
            iterable,
            body,
            span,
        }))
    }

    fn parse_paren_condition(&mut self) -> ParseResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        Ok(condition)
    }
}
