//! SlopeScript tree-walking evaluator.
//!
//! Executes a parsed [`slope_types::ast::Program`] directly, re-walking the
//! AST on every loop iteration. All variables live in one flat
//! [`Environment`]; program output and prompts go through a [`Console`].

pub mod console;
pub mod env;
pub mod error;
pub mod evaluator;
mod ops;
pub mod value;

pub use console::{BufferedConsole, Console, StdConsole};
pub use env::Environment;
pub use error::{EvalError, EvalResult, RuntimeError};
pub use evaluator::{ControlSignal, Evaluator};
pub use value::{Value, MAX_VALUE_DEPTH};
