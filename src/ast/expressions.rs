use crate::ast::{BinOp, UnaryOp};
use crate::value::Value;

/// A node of a compiled expression.
///
/// The tree is strict: every node owns its children and nothing is
/// shared, so a compiled expression can be evaluated from any number of
/// threads at once.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Literal value, returned as is
    ///
    /// # Examples
    /// ```text
    /// 42
    /// "hello"
    /// true
    /// ```
    Constant(Value),

    /// Dotted path resolved against the scope at evaluation time
    ///
    /// # Examples
    /// ```text
    /// price
    /// user.address.city
    /// ```
    Identifier(String),

    /// Operator application.
    ///
    /// Every argument is evaluated, left to right, before the operand is
    /// applied. This holds for `||` and `&&` as well.
    ///
    /// # Examples
    /// ```text
    /// 1 + 2
    /// -x
    /// sum(a, b, c)
    /// ```
    Operator { operand: Operand, args: Vec<Expr> },
}

/// What an operator node applies to its evaluated arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Prefix operator, bound at compile time
    Unary(UnaryOp),
    /// Binary operator, bound at compile time
    Binary(BinOp),
    /// Host function, looked up by name in the registry at evaluation
    /// time so it may be registered after the expression is compiled
    Function(String),
}

impl Expr {
    pub fn constant(value: impl Into<Value>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn identifier(path: impl Into<String>) -> Self {
        Expr::Identifier(path.into())
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Operator {
            operand: Operand::Unary(op),
            args: vec![operand],
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Operator {
            operand: Operand::Binary(op),
            args: vec![left, right],
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::Operator {
            operand: Operand::Function(name.into()),
            args,
        }
    }
}
