//! Error types for every stage of the pipeline.

use thiserror::Error;

/// Lexical and syntax errors.
///
/// Compilation is all-or-nothing: the first error aborts it and no partial
/// expression is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A character that starts no token
    #[error("Unknown character '{0}'")]
    UnknownCharacter(char),

    /// A string literal missing its closing quote
    #[error("Unterminated quote {0}")]
    UnterminatedQuote(char),

    /// A run of digits and dots that is not exactly one number
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// Any structural violation: missing or stray parenthesis, incomplete
    /// argument list, empty input, trailing tokens
    #[error("Unexpected end of expression")]
    UnexpectedEnd,
}

/// Errors raised while evaluating a compiled expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The called function is not in the registry at evaluation time
    #[error("Function '{name}' isn't declared")]
    UndeclaredFunction { name: String },

    /// A host function reported a failure
    #[error("Function '{name}' failed: {message}")]
    FunctionFailed { name: String, message: String },

    /// A hand-built operator node with the wrong number of children
    #[error("Operator '{operator}' expects {expected} operands, got {got}")]
    OperandCount {
        operator: String,
        expected: usize,
        got: usize,
    },
}

/// Errors from registering host functions and computed properties.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Function '{0}' has already been declared")]
    FunctionDeclared(String),

    #[error("Property '{0}' has already been declared")]
    PropertyDeclared(String),
}

/// Any error produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
