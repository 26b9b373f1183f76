//! CLI support for morph-expr
//!
//! Library side of the `morph` binary, usable by other tools that want the
//! same evaluate-against-JSON behavior.

mod docs;
mod eval;

pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use eval::{EvalOptions, EvalOutcome, execute_eval, list_identifiers};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Syntax error: {0}")]
    Syntax(#[from] crate::SyntaxError),

    #[error("Evaluation error: {0}")]
    Eval(#[from] crate::EvalError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unknown category: '{0}'\nRun 'morph docs' to see available categories.")]
    UnknownCategory(String),
}
