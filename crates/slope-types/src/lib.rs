//! Shared types for the SlopeScript interpreter.
//!
//! This crate defines the AST node types, source spans and the structured
//! diagnostic used by every stage of the pipeline.

mod error;
mod span;
pub mod ast;

pub use error::{Diagnostic, ErrorCategory};
pub use span::{SourceFile, Span};
