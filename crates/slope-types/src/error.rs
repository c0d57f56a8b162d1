use crate::{SourceFile, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure class, shared by every pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing or mismatched token while parsing.
    Syntax,
    /// Read of an undefined variable.
    Name,
    /// Out-of-range array or string access.
    Index,
    /// Operator applied to incompatible operand types.
    Type,
    /// Division by zero.
    ZeroDivision,
    /// A malformed number, or a value outside the representable range.
    Value,
    /// The prompt input stream was closed or unreadable.
    Input,
    /// The configured step limit was exhausted.
    Limit,
    /// The driver could not read the source file.
    Io,
}

impl ErrorCategory {
    /// The name a user sees in front of the message, e.g. `NameError`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Syntax => "SyntaxError",
            Self::Name => "NameError",
            Self::Index => "IndexError",
            Self::Type => "TypeError",
            Self::ZeroDivision => "ZeroDivisionError",
            Self::Value => "ValueError",
            Self::Input => "EOFError",
            Self::Limit => "LimitError",
            Self::Io => "IOError",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A structured, serializable report of a failed run.
///
/// Exactly one of these surfaces per failing program, regardless of the
/// stage that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source file name.
    pub file: String,
    pub category: ErrorCategory,
    /// Human-readable message, without the category label.
    pub message: String,
    /// Where the failing construct starts, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    /// The source line the span points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl Diagnostic {
    pub fn new(
        file: impl Into<String>,
        category: ErrorCategory,
        message: impl Into<String>,
        span: Option<Span>,
    ) -> Self {
        Self {
            file: file.into(),
            category,
            message: message.into(),
            span,
            source_line: None,
        }
    }

    /// Attach the text of the offending line from `source`.
    pub fn with_source(mut self, source: &SourceFile) -> Self {
        self.source_line = self
            .span
            .and_then(|span| source.line(span.line))
            .map(|line| line.trim().to_string());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category, self.message)?;
        if let Some(span) = self.span {
            write!(f, " (line {})", span.line)?;
        }
        Ok(())
    }
}

impl std::error::Error for Diagnostic {}
