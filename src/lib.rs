//! # Morph Expressions
//!
//! A small expression language for host applications: compile a formula
//! or rule once, then evaluate it against as many scopes as needed.
//!
//! ```
//! use morph_expr::{Engine, Value};
//! use serde_json::json;
//!
//! let engine = Engine::with_stdlib();
//! let rule = engine.parse("order.total >= 100 && upper(order.country) == 'DE'").unwrap();
//!
//! let scope = Value::from(json!({"order": {"total": 120, "country": "de"}}));
//! assert_eq!(engine.evaluate(&rule, &scope).unwrap(), Value::Boolean(true));
//! assert_eq!(rule.identifiers(), ["order.total", "order.country"]);
//! ```
pub mod ast;
pub mod cli;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod registry;
pub mod stdlib;
pub mod trie;
pub mod value;

pub use ast::{BinOp, Expr, Operand, Token, TokenKind, UnaryOp};
pub use engine::{Engine, Expression};
pub use error::{Error, EvalError, RegistryError, Result, SyntaxError};
pub use evaluator::Evaluator;
pub use lexer::Lexer;
pub use parser::Parser;
pub use registry::Registry;
pub use trie::LexemeTrie;
pub use value::Value;
