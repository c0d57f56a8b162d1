//! Parser tests for SlopeScript.
//!
//! Covers: program framing, every statement form, implicit block
//! termination, operator precedence and associativity, primary
//! expressions, error reporting, and determinism.

use slope_lexer::{tokenize, TokenKind};
use slope_parser::{parse, ParseError, MAX_EXPR_DEPTH, MAX_NESTING};
use slope_types::ast::*;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse_src(source: &str) -> Result<Program, ParseError> {
    parse(tokenize(source).expect("source should lex"))
}

fn parse_ok(source: &str) -> Program {
    match parse_src(source) {
        Ok(program) => program,
        Err(e) => panic!("unexpected parse error: {e}"),
    }
}

fn parse_err(source: &str) -> ParseError {
    match parse_src(source) {
        Ok(program) => panic!("expected a parse error, got {program:?}"),
        Err(e) => e,
    }
}

/// Parse `summit carve <expr> lodge` and return the expression.
fn expr(source: &str) -> Expr {
    let program = parse_ok(&format!("summit carve {source} lodge"));
    match program.stmts.into_iter().next() {
        Some(Stmt::Print(p)) => p.value,
        other => panic!("expected print statement, got {other:?}"),
    }
}

/// Render an expression as a fully parenthesised string.
fn sexpr(e: &Expr) -> String {
    match &e.kind {
        ExprKind::Literal(lit) => lit.to_string(),
        ExprKind::Var(name) => name.clone(),
        ExprKind::Array(items) => {
            let inner: Vec<_> = items.iter().map(sexpr).collect();
            format!("[{}]", inner.join(" "))
        }
        ExprKind::Index { name, index } => format!("{name}[{}]", sexpr(index)),
        ExprKind::Prompt(p) => format!("(prompt {})", sexpr(p)),
        ExprKind::Binary { op, left, right } => {
            format!("({op} {} {})", sexpr(left), sexpr(right))
        }
        ExprKind::Unary { op, operand } => format!("({op} {})", sexpr(operand)),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Program framing
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_program() {
    assert!(parse_ok("summit lodge").stmts.is_empty());
}

#[test]
fn test_missing_summit() {
    let err = parse_err("pack x = 1 lodge");
    match err {
        ParseError::Expected { expected, found } => {
            assert_eq!(expected, TokenKind::Summit);
            assert_eq!(found.map(|t| t.kind), Some(TokenKind::Pack));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_missing_lodge_is_error() {
    let err = parse_err("summit pack x = 1 carve x");
    assert_eq!(
        err,
        ParseError::Expected {
            expected: TokenKind::Lodge,
            found: None
        }
    );
    assert_eq!(err.span(), None);
    assert_eq!(err.to_string(), "expected 'lodge' but got end of input");
}

#[test]
fn test_empty_input() {
    assert!(matches!(
        parse_err(""),
        ParseError::Expected {
            expected: TokenKind::Summit,
            found: None
        }
    ));
}

#[test]
fn test_trailing_tokens_rejected() {
    let err = parse_err("summit carve 1 lodge carve 2");
    assert!(matches!(err, ParseError::TrailingInput { ref found } if found.kind == TokenKind::Carve));
}

// ─────────────────────────────────────────────────────────────────────
// Simple statements
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_assignment() {
    let program = parse_ok("summit pack x = 5 lodge");
    match &program.stmts[0] {
        Stmt::Assign(a) => {
            assert_eq!(a.name, "x");
            assert_eq!(a.value.kind, ExprKind::Literal(Literal::Int(5)));
        }
        other => panic!("expected assignment, got {other:?}"),
    }
}

#[test]
fn test_assignment_requires_identifier() {
    let err = parse_err("summit pack 5 = 5 lodge");
    assert!(matches!(
        err,
        ParseError::Expected {
            expected: TokenKind::Identifier,
            ..
        }
    ));
}

#[test]
fn test_assignment_requires_equals() {
    let err = parse_err("summit pack x 5 lodge");
    assert!(matches!(
        err,
        ParseError::Expected {
            expected: TokenKind::Eq,
            ..
        }
    ));
}

#[test]
fn test_print_and_expression_statement() {
    let program = parse_ok("summit carve x chairlift(\"name?\") lodge");
    assert_eq!(program.stmts.len(), 2);
    assert!(matches!(program.stmts[0], Stmt::Print(_)));
    match &program.stmts[1] {
        Stmt::Expr(e) => assert!(matches!(e.expr.kind, ExprKind::Prompt(_))),
        other => panic!("expected expression statement, got {other:?}"),
    }
}

#[test]
fn test_break_and_continue() {
    let program = parse_ok("summit gondola (powder) sendIt bail lodge");
    match &program.stmts[0] {
        Stmt::While(w) => {
            assert!(matches!(w.body[0], Stmt::Continue(_)));
            assert!(matches!(w.body[1], Stmt::Break(_)));
        }
        other => panic!("expected while, got {other:?}"),
    }
}

#[test]
fn test_reserved_words_are_not_statements() {
    assert!(matches!(
        parse_err("summit trick lodge"),
        ParseError::Unexpected { found: Some(ref t) } if t.kind == TokenKind::Trick
    ));
    assert!(matches!(
        parse_err("summit nail lodge"),
        ParseError::Unexpected { .. }
    ));
}

#[test]
fn test_statement_spans() {
    let program = parse_ok("summit\npack x = 1\n  carve x\nlodge");
    assert_eq!(program.stmts[0].span().line, 2);
    assert_eq!(program.stmts[1].span().line, 3);
    assert_eq!(program.stmts[1].span().col, 3);
}

// ─────────────────────────────────────────────────────────────────────
// Control flow & block termination
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_conditional_branches() {
    let program = parse_ok(
        "summit greenCircle (x > 1) carve 1 blueSquare (x > 0) carve 2 blackDiamond carve 3 lodge",
    );
    assert_eq!(program.stmts.len(), 1);
    match &program.stmts[0] {
        Stmt::Conditional(c) => {
            assert_eq!(c.branches.len(), 3);
            assert!(c.branches[0].condition.is_some());
            assert!(c.branches[1].condition.is_some());
            assert!(c.branches[2].condition.is_none());
            assert!(c.branches.iter().all(|b| b.body.len() == 1));
        }
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn test_conditional_branches_repeat_in_any_order() {
    let program = parse_ok(
        "summit blackDiamond carve 0 greenCircle (a) carve 1 greenCircle (b) carve 2 lodge",
    );
    match &program.stmts[0] {
        Stmt::Conditional(c) => {
            let conds: Vec<bool> = c.branches.iter().map(|b| b.condition.is_some()).collect();
            assert_eq!(conds, vec![false, true, true]);
        }
        other => panic!("expected conditional, got {other:?}"),
    }
}

#[test]
fn test_branch_condition_needs_parens() {
    assert!(matches!(
        parse_err("summit greenCircle x carve 1 lodge"),
        ParseError::Expected {
            expected: TokenKind::LParen,
            ..
        }
    ));
    assert!(matches!(
        parse_err("summit gondola (x carve 1 lodge"),
        ParseError::Expected {
            expected: TokenKind::RParen,
            ..
        }
    ));
}

#[test]
fn test_loop_body_ends_at_control_keyword() {
    let program = parse_ok("summit gondola (x) carve 1 liftline i in xs carve i lodge");
    assert_eq!(program.stmts.len(), 2);
    match (&program.stmts[0], &program.stmts[1]) {
        (Stmt::While(w), Stmt::ForEach(f)) => {
            assert_eq!(w.body.len(), 1);
            assert_eq!(f.var, "i");
            assert_eq!(f.body.len(), 1);
        }
        other => panic!("expected while then for-each, got {other:?}"),
    }
}

#[test]
fn test_branch_keyword_ends_loop_body() {
    let program = parse_ok("summit liftline i in xs carve i greenCircle (i) carve 0 lodge");
    assert_eq!(program.stmts.len(), 2);
    assert!(matches!(program.stmts[1], Stmt::Conditional(_)));
}

#[test]
fn test_inner_lodge_closes_loop() {
    let program =
        parse_ok("summit pack total = 0 liftline i in [1,2,3] pack total = total + i lodge carve total lodge");
    assert_eq!(program.stmts.len(), 3);
    match &program.stmts[1] {
        Stmt::ForEach(f) => assert_eq!(f.body.len(), 1),
        other => panic!("expected for-each, got {other:?}"),
    }
    assert!(matches!(program.stmts[2], Stmt::Print(_)));
}

#[test]
fn test_final_lodge_belongs_to_program() {
    let program = parse_ok(
        "summit pack x = 3 greenCircle (x > 1) carve \"big\" blackDiamond carve \"small\" lodge",
    );
    assert_eq!(program.stmts.len(), 2);
}

#[test]
fn test_inner_lodge_closes_conditional() {
    let program = parse_ok(
        "summit greenCircle (a) carve 1 lodge blueSquare (b) carve 2 lodge",
    );
    // The second branch starts a new conditional.
    assert_eq!(program.stmts.len(), 2);
    for stmt in &program.stmts {
        match stmt {
            Stmt::Conditional(c) => assert_eq!(c.branches.len(), 1),
            other => panic!("expected conditional, got {other:?}"),
        }
    }
}

#[test]
fn test_for_each_requires_in() {
    assert!(matches!(
        parse_err("summit liftline i xs carve i lodge"),
        ParseError::Expected {
            expected: TokenKind::In,
            ..
        }
    ));
}

#[test]
fn test_empty_loop_body() {
    let program = parse_ok("summit gondola (ice) lodge");
    match &program.stmts[0] {
        Stmt::While(w) => assert!(w.body.is_empty()),
        other => panic!("expected while, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Expressions
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_precedence_ladder() {
    assert_eq!(sexpr(&expr("1 + 2 * 3")), "(+ 1 (* 2 3))");
    assert_eq!(sexpr(&expr("1 < 2 == 3 > 4")), "(== (< 1 2) (> 3 4))");
    assert_eq!(sexpr(&expr("a || b && c")), "(|| a (&& b c))");
    assert_eq!(sexpr(&expr("a == b && c != d")), "(&& (== a b) (!= c d))");
    assert_eq!(sexpr(&expr("-a * b")), "(* (- a) b)");
}

#[test]
fn test_left_associativity() {
    assert_eq!(sexpr(&expr("10 - 4 - 3")), "(- (- 10 4) 3)");
    assert_eq!(sexpr(&expr("8 / 4 / 2")), "(/ (/ 8 4) 2)");
    assert_eq!(sexpr(&expr("a < b < c")), "(< (< a b) c)");
}

#[test]
fn test_unary_right_associative() {
    assert_eq!(sexpr(&expr("!!a")), "(! (! a))");
    assert_eq!(sexpr(&expr("- -3")), "(- (- 3))");
    assert_eq!(sexpr(&expr("!a == b")), "(== (! a) b)");
}

#[test]
fn test_parentheses_override_precedence() {
    assert_eq!(sexpr(&expr("(1 + 2) * 3")), "(* (+ 1 2) 3)");
}

#[test]
fn test_literals() {
    assert_eq!(expr("2.5").kind, ExprKind::Literal(Literal::Float(2.5)));
    assert_eq!(
        expr("\"hi\"").kind,
        ExprKind::Literal(Literal::Str("hi".into()))
    );
    assert_eq!(expr("powder").kind, ExprKind::Literal(Literal::Bool(true)));
    assert_eq!(expr("ice").kind, ExprKind::Literal(Literal::Bool(false)));
}

#[test]
fn test_array_literals() {
    assert_eq!(sexpr(&expr("[]")), "[]");
    assert_eq!(sexpr(&expr("[1, 2, 3]")), "[1 2 3]");
    assert_eq!(sexpr(&expr("[1, \"a\", [2],]")), "[1 a [2]]");
    assert_eq!(sexpr(&expr("[1 2]")), "[1 2]");
}

#[test]
fn test_unterminated_array() {
    assert!(matches!(
        parse_err("summit carve [1, 2"),
        ParseError::Unexpected { .. }
    ));
}

#[test]
fn test_index_access() {
    assert_eq!(sexpr(&expr("xs[i + 1]")), "xs[(+ i 1)]");
}

#[test]
fn test_index_is_not_chained() {
    // The second subscript is an array literal statement of its own.
    let program = parse_ok("summit carve xs[0][1] lodge");
    assert_eq!(program.stmts.len(), 2);
    assert!(matches!(program.stmts[1], Stmt::Expr(_)));
}

#[test]
fn test_prompt_expression() {
    assert_eq!(
        sexpr(&expr("chairlift(\"Name:\")")),
        "(prompt Name:)"
    );
    assert!(matches!(
        parse_err("summit chairlift \"x\" lodge"),
        ParseError::Expected {
            expected: TokenKind::LParen,
            ..
        }
    ));
}

#[test]
fn test_unexpected_token_in_expression() {
    let err = parse_err("summit carve ) lodge");
    assert!(matches!(err, ParseError::Unexpected { found: Some(ref t) } if t.kind == TokenKind::RParen));
    assert_eq!(err.to_string(), "unexpected ')' at line 1");
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING as usize + 5;
    let src = format!("summit carve {}1{} lodge", "(".repeat(depth), ")".repeat(depth));
    assert!(matches!(
        parse_err(&src),
        ParseError::NestingTooDeep { .. }
    ));
}

/// `summit carve 1 + 1 + ... lodge` with `terms` operands.
fn long_sum(terms: usize) -> String {
    format!("summit carve {} lodge", vec!["1"; terms].join(" + "))
}

#[test]
fn test_long_operator_chain_is_rejected() {
    let err = parse_err(&long_sum(100_000));
    assert!(matches!(
        err,
        ParseError::NestingTooDeep { limit, .. } if limit == MAX_EXPR_DEPTH
    ));
    assert!(err.span().is_some());
}

#[test]
fn test_operator_chain_at_depth_limit() {
    parse_ok(&long_sum(MAX_EXPR_DEPTH as usize));
    assert!(matches!(
        parse_err(&long_sum(MAX_EXPR_DEPTH as usize + 1)),
        ParseError::NestingTooDeep { .. }
    ));
}

#[test]
fn test_logical_chain_counts_every_level() {
    let terms = vec!["x"; MAX_EXPR_DEPTH as usize].join(" && ");
    let src = format!("summit carve powder && {terms} lodge");
    assert!(matches!(parse_err(&src), ParseError::NestingTooDeep { .. }));
}

#[test]
fn test_moderate_nesting_is_fine() {
    let src = format!("summit carve {}1{} lodge", "(".repeat(50), ")".repeat(50));
    parse_ok(&src);
}

#[test]
fn test_parser_determinism_100_iterations() {
    let src = "summit pack xs = [1, 2] liftline x in xs greenCircle (x == 2) carve x lodge";
    let first = parse_ok(src);
    for i in 0..100 {
        assert_eq!(first, parse_ok(src), "determinism failure at iteration {i}");
    }
}
