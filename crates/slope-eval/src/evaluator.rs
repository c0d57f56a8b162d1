//! Statement execution and expression evaluation.

use crate::console::Console;
use crate::env::Environment;
use crate::error::{EvalError, RuntimeError};
use crate::ops;
use crate::value::Value;
use slope_types::ast::*;
use slope_types::Span;

/// How a statement sequence finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlSignal {
    /// Ran to the end.
    None,
    /// A `bail` is unwinding to the nearest loop.
    Break,
    /// A `sendIt` is unwinding to the nearest loop.
    Continue,
}

type ExecResult<T> = Result<T, RuntimeError>;

/// Walks a [`Program`] against one flat [`Environment`].
pub struct Evaluator<C: Console> {
    /// All program variables.
    pub env: Environment,
    console: C,
    /// Statements and loop iterations executed so far.
    steps: u64,
    step_limit: Option<u64>,
}

impl<C: Console> Evaluator<C> {
    pub fn new(console: C) -> Self {
        Self {
            env: Environment::new(),
            console,
            steps: 0,
            step_limit: None,
        }
    }

    /// Abort with [`EvalError::StepLimitExceeded`] once more than `limit`
    /// steps have run.
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = Some(limit);
        self
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_console(self) -> C {
        self.console
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    fn tick(&mut self, span: Span) -> ExecResult<()> {
        self.steps += 1;
        match self.step_limit {
            Some(limit) if self.steps > limit => {
                Err(EvalError::StepLimitExceeded(limit).at(span))
            }
            _ => Ok(()),
        }
    }

    /// Run a whole program. A stray `bail` or `sendIt` at top level ends it
    /// normally.
    pub fn run(&mut self, program: &Program) -> ExecResult<()> {
        self.execute(&program.stmts).map(|_| ())
    }

    // ── Statements ───────────────────────────────────────────────────────

    /// Execute statements in order, stopping at the first pending signal.
    pub fn execute(&mut self, stmts: &[Stmt]) -> ExecResult<ControlSignal> {
        for stmt in stmts {
            let signal = self.exec_stmt(stmt)?;
            if signal != ControlSignal::None {
                return Ok(signal);
            }
        }
        Ok(ControlSignal::None)
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> ExecResult<ControlSignal> {
        self.tick(stmt.span())?;
        match stmt {
            Stmt::Assign(assign) => {
                let value = self.eval_expr(&assign.value)?;
                self.env.set(&assign.name, value);
                Ok(ControlSignal::None)
            }
            Stmt::Print(print) => {
                let text = self
                    .eval_expr(&print.value)?
                    .render()
                    .map_err(|e| e.at(print.span))?;
                self.console
                    .print_line(&text)
                    .map_err(|e| EvalError::Io(e.to_string()).at(print.span))?;
                Ok(ControlSignal::None)
            }
            Stmt::Conditional(cond) => self.exec_conditional(cond),
            Stmt::While(w) => self.exec_while(w),
            Stmt::ForEach(each) => self.exec_for_each(each),
            Stmt::Break(_) => Ok(ControlSignal::Break),
            Stmt::Continue(_) => Ok(ControlSignal::Continue),
            Stmt::Expr(expr_stmt) => {
                self.eval_expr(&expr_stmt.expr)?;
                Ok(ControlSignal::None)
            }
        }
    }

    fn exec_conditional(&mut self, cond: &ConditionalStmt) -> ExecResult<ControlSignal> {
        for branch in &cond.branches {
            let taken = match &branch.condition {
                Some(test) => self.eval_expr(test)?.is_truthy(),
                None => true,
            };
            if taken {
                return self.execute(&branch.body);
            }
        }
        Ok(ControlSignal::None)
    }

    fn exec_while(&mut self, w: &WhileStmt) -> ExecResult<ControlSignal> {
        loop {
            if !self.eval_expr(&w.condition)?.is_truthy() {
                break;
            }
            self.tick(w.span)?;
            if self.execute(&w.body)? == ControlSignal::Break {
                break;
            }
        }
        Ok(ControlSignal::None)
    }

    fn exec_for_each(&mut self, each: &ForEachStmt) -> ExecResult<ControlSignal> {
        let iterable = self.eval_expr(&each.iterable)?;
        let items = ops::iterate(&iterable).map_err(|e| e.at(each.iterable.span))?;
        for item in items {
            self.tick(each.span)?;
            self.env.set(&each.var, item);
            if self.execute(&each.body)? == ControlSignal::Break {
                break;
            }
        }
        Ok(ControlSignal::None)
    }

    // ── Expressions ──────────────────────────────────────────────────────

    /// Evaluate an expression to a value.
    pub fn eval_expr(&mut self, expr: &Expr) -> ExecResult<Value> {
        match &expr.kind {
            ExprKind::Literal(lit) => Ok(Value::from(lit)),
            ExprKind::Var(name) => self.lookup(name, expr.span),
            ExprKind::Array(elems) => {
                let items = elems
                    .iter()
                    .map(|e| self.eval_expr(e))
                    .collect::<ExecResult<Vec<_>>>()?;
                Ok(Value::array(items))
            }
            ExprKind::Index { name, index } => {
                let target = self.lookup(name, expr.span)?;
                let idx = self.eval_expr(index)?;
                ops::index(&target, &idx).map_err(|e| e.at(expr.span))
            }
            ExprKind::Prompt(cue) => self.eval_prompt(cue, expr.span),
            ExprKind::Binary { .. } => self.eval_binary(expr),
            ExprKind::Unary { op, operand } => {
                let value = self.eval_expr(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    UnaryOp::Neg => ops::negate(&value).map_err(|e| e.at(expr.span)),
                }
            }
        }
    }

    fn lookup(&self, name: &str, span: Span) -> ExecResult<Value> {
        self.env
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UndefinedVariable(name.to_string()).at(span))
    }

    /// Evaluate a binary node and the whole left-deep chain beneath it.
    ///
    /// The left spine is walked with a loop, so `a + b + c + ...` costs no
    /// stack per operand. `&&` and `||` yield whichever operand decided the
    /// result and skip the right operand when short-circuited.
    fn eval_binary(&mut self, expr: &Expr) -> ExecResult<Value> {
        let mut spine = Vec::new();
        let mut leftmost = expr;
        while let ExprKind::Binary { op, left, right } = &leftmost.kind {
            spine.push((*op, right.as_ref(), leftmost.span));
            leftmost = left;
        }

        let mut acc = self.eval_expr(leftmost)?;
        for (op, right, span) in spine.into_iter().rev() {
            acc = match op {
                BinOp::And if !acc.is_truthy() => acc,
                BinOp::Or if acc.is_truthy() => acc,
                BinOp::And | BinOp::Or => self.eval_expr(right)?,
                _ => {
                    let rv = self.eval_expr(right)?;
                    ops::binary(op, &acc, &rv).map_err(|e| e.at(span))?
                }
            };
        }
        Ok(acc)
    }

    fn eval_prompt(&mut self, cue: &Expr, span: Span) -> ExecResult<Value> {
        let cue_text = self
            .eval_expr(cue)?
            .render()
            .map_err(|e| e.at(span))?;
        let text = format!("{cue_text} ");
        match self.console.prompt(&text) {
            Ok(Some(line)) => Ok(Value::Str(line)),
            Ok(None) => Err(EvalError::InputClosed.at(span)),
            Err(e) => Err(EvalError::Io(e.to_string()).at(span)),
        }
    }
}
