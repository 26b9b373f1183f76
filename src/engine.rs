//! The embedding surface: register host functions, compile, evaluate.

use tracing::{debug, warn};

use crate::{
    ast::Expr,
    error::{EvalError, RegistryError, Result, SyntaxError},
    evaluator::Evaluator,
    lexer::Lexer,
    parser::Parser,
    registry::Registry,
    stdlib,
    trie::{self, LexemeTrie},
    value::Value,
};

/// A compiled expression.
///
/// Produced once by [`Engine::parse`] and evaluated any number of times.
/// It keeps no reference to the engine that compiled it: functions are
/// resolved by name in whatever registry is supplied at evaluation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Expr,
    identifiers: Vec<String>,
}

impl Expression {
    /// Compile `source` with the shared keyword table
    pub fn compile(source: &str) -> Result<Self, SyntaxError> {
        Self::compile_with(source, trie::keywords())
    }

    pub fn compile_with(source: &str, keywords: &LexemeTrie) -> Result<Self, SyntaxError> {
        let mut parser = Parser::new(Lexer::with_keywords(source, keywords))?;
        let root = parser.parse()?;
        let identifiers = parser.into_identifiers();

        debug!(source, identifiers = identifiers.len(), "compiled expression");
        Ok(Expression {
            source: source.to_string(),
            root,
            identifiers,
        })
    }

    /// Dotted paths read by the expression, in order of appearance.
    /// Function names are not included; repeated paths are.
    pub fn identifiers(&self) -> &[String] {
        &self.identifiers
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, scope: &Value, registry: &Registry) -> Result<Value, EvalError> {
        Evaluator::new(registry).eval_expr(&self.root, scope)
    }
}

/// Owns the host functions and computed properties and compiles
/// expressions against the shared keyword table.
///
/// # Examples
///
/// ```
/// use morph_expr::{Engine, Value};
/// use serde_json::json;
///
/// let mut engine = Engine::new();
/// engine
///     .register_function("sqr", |args| {
///         let x = args.first().map(Value::to_number).unwrap_or(f64::NAN);
///         Ok(Value::Float(x * x))
///     })
///     .unwrap();
///
/// let expr = engine.parse("sqr(side) + offset").unwrap();
/// assert_eq!(expr.identifiers(), ["side", "offset"]);
///
/// let scope = Value::from(json!({"side": 3, "offset": 1}));
/// assert_eq!(engine.evaluate(&expr, &scope).unwrap(), Value::Integer(10));
/// ```
#[derive(Debug, Default, Clone)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine with the standard functions already registered
    pub fn with_stdlib() -> Self {
        let mut engine = Self::new();
        // A fresh registry has no names to clash with
        if let Err(err) = stdlib::register_all(&mut engine.registry) {
            warn!(%err, "standard functions not registered");
        }
        engine
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn register_function<F>(&mut self, name: impl Into<String>, function: F) -> Result<(), RegistryError>
    where
        F: Fn(&[Value]) -> std::result::Result<Value, String> + Send + Sync + 'static,
    {
        self.registry.register_function(name, function)
    }

    pub fn unregister_function(&mut self, name: &str) -> bool {
        self.registry.unregister_function(name)
    }

    pub fn register_property<F>(&mut self, name: impl Into<String>, property: F) -> Result<(), RegistryError>
    where
        F: Fn(&Value) -> Value + Send + Sync + 'static,
    {
        self.registry.register_property(name, property)
    }

    pub fn unregister_property(&mut self, name: &str) -> bool {
        self.registry.unregister_property(name)
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.registry.has_function(name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.registry.has_property(name)
    }

    pub fn parse(&self, source: &str) -> Result<Expression, SyntaxError> {
        Expression::compile(source)
    }

    /// Evaluate against this engine's current functions and properties
    pub fn evaluate(&self, expression: &Expression, scope: &Value) -> Result<Value, EvalError> {
        expression.evaluate(scope, &self.registry)
    }

    /// Compile and evaluate in one step
    pub fn parse_and_eval(&self, source: &str, scope: &Value) -> Result<Value> {
        let expression = self.parse(source)?;
        Ok(self.evaluate(&expression, scope)?)
    }
}
