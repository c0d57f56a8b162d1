//! Runtime error types for the SlopeScript evaluator.

use slope_types::{ErrorCategory, Span};
use thiserror::Error;

/// A fatal runtime failure. Nothing is caught or retried; the first one
/// aborts the program.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("variable '{0}' is not defined")]
    UndefinedVariable(String),

    /// `target` is `"array"` or `"string"`.
    #[error("{target} index out of range")]
    IndexOutOfRange { target: &'static str },

    #[error("{0}")]
    TypeMismatch(String),

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow")]
    IntegerOverflow,

    /// A prompt found its input stream exhausted.
    #[error("EOF when reading a line")]
    InputClosed,

    #[error("console error: {0}")]
    Io(String),

    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),

    /// An array too deep to print or compare.
    #[error("maximum nesting depth of {0} exceeded")]
    NestingTooDeep(usize),
}

impl EvalError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable(_) => ErrorCategory::Name,
            Self::IndexOutOfRange { .. } => ErrorCategory::Index,
            Self::TypeMismatch(_) => ErrorCategory::Type,
            Self::DivisionByZero => ErrorCategory::ZeroDivision,
            Self::IntegerOverflow => ErrorCategory::Value,
            Self::InputClosed => ErrorCategory::Input,
            Self::Io(_) => ErrorCategory::Io,
            Self::StepLimitExceeded(_) | Self::NestingTooDeep(_) => ErrorCategory::Limit,
        }
    }

    /// Attach the location of the failing node.
    pub fn at(self, span: Span) -> RuntimeError {
        RuntimeError { error: self, span }
    }
}

/// An [`EvalError`] with the span of the node that raised it.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct RuntimeError {
    pub error: EvalError,
    pub span: Span,
}

impl RuntimeError {
    pub fn category(&self) -> ErrorCategory {
        self.error.category()
    }
}

/// Result alias for value-level operations.
pub type EvalResult<T> = Result<T, EvalError>;
