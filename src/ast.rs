//! # Morph Expressions - Syntax Tree
//!
//! Tokens produced by the lexer and the tree the parser compiles them into.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens and their kinds
//! - **[operators]** - Built-in binary and prefix operators
//! - **[expressions]** - Compiled expression nodes
//!
//! ## Quick Start
//!
//! ```text
//! price * quantity >= minimum && customer.active
//! ```
//!
//! ## Core Concepts
//!
//! ### Three node shapes
//!
//! A compiled expression is a strict tree of:
//!
//! - **Constant** - a literal value
//! - **Identifier** - a dotted path looked up in the scope
//! - **Operator** - a built-in operator or a named host function applied to
//!   child nodes
//!
//! ### Precedence
//!
//! From loosest to tightest binding:
//!
//! ```text
//! ||
//! &&
//! == !=
//! > >= < <=
//! + -
//! * / %
//! prefix + - ! ++ --
//! identifiers, calls, literals, ( ... )
//! ```
//!
//! All binary levels are left-associative, and `||`/`&&` always evaluate
//! both sides.
pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Operand};
pub use operators::{BinOp, UnaryOp};
pub use tokens::{Token, TokenKind, TokenValue};
