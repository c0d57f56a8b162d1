//! SlopeScript driver: runs the whole pipeline over one source file.
//!
//! ```text
//! source → Lexer → Parser → Evaluator → console output
//! ```
//!
//! Every stage error is folded into [`SlopeError`], which renders as a
//! structured [`Diagnostic`] for reporting.

use std::io;
use std::path::Path;

use slope_eval::{Console, Evaluator, RuntimeError, StdConsole};
use slope_lexer::{tokenize, LexError, Token};
use slope_parser::{parse, ParseError};
use slope_types::ast::Program;
use slope_types::{Diagnostic, ErrorCategory, SourceFile, Span};
use thiserror::Error;

pub use slope_eval::BufferedConsole;

/// Any failure of a SlopeScript run.
#[derive(Debug, Error)]
pub enum SlopeError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SlopeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Lex(e) => e.category(),
            Self::Parse(e) => e.category(),
            Self::Runtime(e) => e.category(),
            Self::FileNotFound(_) | Self::Io { .. } => ErrorCategory::Io,
        }
    }

    /// Where in the source the failure happened, when it has a location.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Lex(e) => Some(e.span()),
            Self::Parse(e) => e.span(),
            Self::Runtime(e) => Some(e.span),
            Self::FileNotFound(_) | Self::Io { .. } => None,
        }
    }

    /// Structured form of this error against the file it came from.
    pub fn diagnostic(&self, file: &SourceFile) -> Diagnostic {
        Diagnostic::new(&file.name, self.category(), self.to_string(), self.span())
            .with_source(file)
    }
}

/// Knobs for a single run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Abort after this many evaluation steps. `None` runs unbounded.
    pub max_steps: Option<u64>,
}

/// Lex `source` into tokens.
pub fn lex_source(source: &str) -> Result<Vec<Token>, SlopeError> {
    Ok(tokenize(source)?)
}

/// Lex and parse `source`.
pub fn parse_source(source: &str) -> Result<Program, SlopeError> {
    let tokens = tokenize(source)?;
    Ok(parse(tokens)?)
}

/// Lex, parse and run `source`, sending output and prompts to `console`.
///
/// Nothing executes unless the whole program parses.
pub fn run_source<C: Console>(
    source: &str,
    console: &mut C,
    options: &RunOptions,
) -> Result<(), SlopeError> {
    let program = parse_source(source)?;
    let mut evaluator = Evaluator::new(console);
    if let Some(limit) = options.max_steps {
        evaluator = evaluator.with_step_limit(limit);
    }
    evaluator.run(&program)?;
    Ok(())
}

/// Read a file as text.
pub fn read_source(path: &Path) -> Result<String, SlopeError> {
    std::fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => SlopeError::FileNotFound(path.display().to_string()),
        _ => SlopeError::Io {
            path: path.display().to_string(),
            source,
        },
    })
}

/// Run a file against the process console.
pub fn run_file(path: &Path, options: &RunOptions) -> Result<(), SlopeError> {
    let source = read_source(path)?;
    run_source(&source, &mut StdConsole::new(), options)
}
