//! Evaluate expressions against JSON input

use tracing::debug;

use super::CliError;
use crate::{Engine, Value};

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// JSON scope; an empty object when absent
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
    /// Only compile, print the referenced identifiers
    pub syntax_only: bool,
    /// Start from an empty registry instead of the standard functions
    pub no_stdlib: bool,
}

/// Result of an eval operation
#[derive(Debug, PartialEq)]
pub enum EvalOutcome {
    /// The expression compiled; these are the paths it reads
    SyntaxValid(Vec<String>),
    /// The expression evaluated to this value
    Success(serde_json::Value),
}

/// Compile and, unless `syntax_only` is set, evaluate an expression
pub fn execute_eval(options: &EvalOptions) -> Result<EvalOutcome, CliError> {
    let engine = if options.no_stdlib {
        Engine::new()
    } else {
        Engine::with_stdlib()
    };

    let expression = engine.parse(&options.expression)?;
    if options.syntax_only {
        return Ok(EvalOutcome::SyntaxValid(expression.identifiers().to_vec()));
    }

    let scope = match options.input.as_deref() {
        Some(json) if !json.trim().is_empty() => {
            Value::from(serde_json::from_str::<serde_json::Value>(json)?)
        }
        _ => Value::Object(Default::default()),
    };
    debug!(
        identifiers = ?expression.identifiers(),
        "evaluating against {} scope",
        scope.type_name()
    );

    let result = engine.evaluate(&expression, &scope)?;
    Ok(EvalOutcome::Success(result.to_json()))
}

/// Compile an expression and return the paths it reads
pub fn list_identifiers(expression: &str) -> Result<Vec<String>, CliError> {
    let engine = Engine::new();
    Ok(engine.parse(expression)?.identifiers().to_vec())
}
