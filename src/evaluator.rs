use std::{borrow::Cow, cmp::Ordering};

use rust_decimal::{Decimal, prelude::FromPrimitive, prelude::ToPrimitive};
use tracing::trace;

use crate::{
    ast::{BinOp, Expr, Operand, UnaryOp},
    error::EvalError,
    registry::Registry,
    value::Value,
};

/// Tree-walking evaluator for compiled expressions.
///
/// Holds only a shared reference to the registry; evaluation allocates no
/// state that outlives the call, so one evaluator (or many) can run the
/// same expression against any number of scopes.
pub struct Evaluator<'r> {
    registry: &'r Registry,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Evaluator { registry }
    }

    /// Evaluates an expression against a scope.
    ///
    /// # Examples
    ///
    /// ```
    /// use morph_expr::{Evaluator, Expr, Registry, Value};
    /// use morph_expr::ast::BinOp;
    /// use serde_json::json;
    ///
    /// let registry = Registry::new();
    /// let expr = Expr::binary(BinOp::Add, Expr::identifier("a.b"), Expr::constant(1));
    /// let scope = Value::from(json!({"a": {"b": 41}}));
    ///
    /// let result = Evaluator::new(&registry).eval_expr(&expr, &scope).unwrap();
    /// assert_eq!(result, Value::Integer(42));
    /// ```
    pub fn eval_expr(&self, expr: &Expr, scope: &Value) -> Result<Value, EvalError> {
        match expr {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Identifier(path) => Ok(self.resolve_path(path, scope).unwrap_or_default()),
            Expr::Operator { operand, args } => {
                let values = args
                    .iter()
                    .map(|arg| self.eval_expr(arg, scope))
                    .collect::<Result<Vec<_>, _>>()?;

                match (operand, values.as_slice()) {
                    (Operand::Unary(op), [value]) => Ok(apply_unary(*op, value)),
                    (Operand::Binary(op), [left, right]) => Ok(apply_binop(*op, left, right)),
                    (Operand::Function(name), _) => self.call_function(name, &values),
                    (Operand::Unary(op), _) => Err(operand_count(op.symbol(), 1, values.len())),
                    (Operand::Binary(op), _) => Err(operand_count(op.symbol(), 2, values.len())),
                }
            }
        }
    }

    /// Resolve an identifier path against `scope`.
    ///
    /// A computed property registered under the whole path wins. Otherwise
    /// the path is walked segment by segment; a segment naming a computed
    /// property is produced by calling the property with `scope`, other
    /// segments are plain key (or array index) lookups. An empty segment
    /// ends the walk, so `x.` is `x`. A missing segment yields `None`,
    /// which evaluation turns into `undefined` rather than an error.
    pub fn resolve_path(&self, path: &str, scope: &Value) -> Option<Value> {
        if let Some(property) = self.registry.property(path) {
            trace!(property = path, "computing property");
            return Some(property(scope));
        }

        let mut current = Cow::Borrowed(scope);
        for segment in path.split('.').take_while(|s| !s.is_empty()) {
            if let Some(property) = self.registry.property(segment) {
                trace!(property = segment, "computing property");
                current = Cow::Owned(property(scope));
                continue;
            }
            current = match current {
                Cow::Borrowed(value) => Cow::Borrowed(value.get(segment)?),
                Cow::Owned(value) => Cow::Owned(value.get(segment)?.clone()),
            };
        }
        Some(current.into_owned())
    }

    fn call_function(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        let function = self
            .registry
            .function(name)
            .ok_or_else(|| EvalError::UndeclaredFunction { name: name.to_string() })?;

        trace!(function = name, args = args.len(), "calling host function");
        function(args).map_err(|message| EvalError::FunctionFailed {
            name: name.to_string(),
            message,
        })
    }
}

fn operand_count(operator: &str, expected: usize, got: usize) -> EvalError {
    EvalError::OperandCount {
        operator: operator.to_string(),
        expected,
        got,
    }
}

pub fn apply_unary(op: UnaryOp, value: &Value) -> Value {
    match op {
        UnaryOp::Plus => value.clone(),
        UnaryOp::Negate => match value.to_numeric() {
            Value::Integer(n) => n
                .checked_neg()
                .map(Value::Integer)
                .unwrap_or(Value::Float(-(n as f64))),
            other => Value::Float(-other.to_number()),
        },
        UnaryOp::Not => Value::Boolean(!value.is_truthy()),
        UnaryOp::Increment => apply_binop(BinOp::Add, value, &Value::Integer(1)),
        UnaryOp::Decrement => apply_binop(BinOp::Subtract, value, &Value::Integer(1)),
    }
}

/// Apply a binary operator to two already evaluated operands.
///
/// `||` and `&&` pick one of their operands by truthiness; they are not
/// short-circuiting because both sides were evaluated by the caller.
pub fn apply_binop(op: BinOp, left: &Value, right: &Value) -> Value {
    match op {
        BinOp::Or => {
            if left.is_truthy() {
                left.clone()
            } else {
                right.clone()
            }
        }
        BinOp::And => {
            if left.is_truthy() {
                right.clone()
            } else {
                left.clone()
            }
        }
        BinOp::Equal => Value::Boolean(left.strict_equals(right)),
        BinOp::NotEqual => Value::Boolean(!left.strict_equals(right)),
        BinOp::LessThan => Value::Boolean(compare(left, right) == Some(Ordering::Less)),
        BinOp::LessEqual => Value::Boolean(matches!(
            compare(left, right),
            Some(Ordering::Less | Ordering::Equal)
        )),
        BinOp::GreaterThan => Value::Boolean(compare(left, right) == Some(Ordering::Greater)),
        BinOp::GreaterEqual => Value::Boolean(matches!(
            compare(left, right),
            Some(Ordering::Greater | Ordering::Equal)
        )),
        BinOp::Add => match (left, right) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Value::String(format!("{}{}", left, right))
            }
            _ => arithmetic(op, left, right),
        },
        BinOp::Subtract | BinOp::Multiply | BinOp::Divide | BinOp::Modulo => {
            arithmetic(op, left, right)
        }
    }
}

/// Two strings compare lexicographically, anything else numerically.
/// `None` when either side is `NaN`.
fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return Some(a.cmp(b));
    }
    match (left.to_numeric(), right.to_numeric()) {
        (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(&b)),
        (a, b) => a.to_number().partial_cmp(&b.to_number()),
    }
}

fn arithmetic(op: BinOp, left: &Value, right: &Value) -> Value {
    match (left.to_numeric(), right.to_numeric()) {
        (Value::Integer(a), Value::Integer(b)) => integer_arithmetic(op, a, b),
        (Value::Integer(a), Value::Float(b)) => {
            decimal_arithmetic(op, Decimal::from_i64(a), Decimal::from_f64(b))
                .unwrap_or_else(|| Value::Float(float_arithmetic(op, a as f64, b)))
        }
        (Value::Float(a), Value::Integer(b)) => {
            decimal_arithmetic(op, Decimal::from_f64(a), Decimal::from_i64(b))
                .unwrap_or_else(|| Value::Float(float_arithmetic(op, a, b as f64)))
        }
        (a, b) => Value::Float(float_arithmetic(op, a.to_number(), b.to_number())),
    }
}

/// Integer results stay integers when exact and in range.
fn integer_arithmetic(op: BinOp, a: i64, b: i64) -> Value {
    let exact = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Subtract => a.checked_sub(b),
        BinOp::Multiply => a.checked_mul(b),
        BinOp::Divide => match a.checked_rem(b) {
            Some(0) => a.checked_div(b),
            _ => None,
        },
        BinOp::Modulo => a.checked_rem(b),
        _ => None,
    };
    exact
        .map(Value::Integer)
        .unwrap_or_else(|| Value::Float(float_arithmetic(op, a as f64, b as f64)))
}

/// Mixed integer/float arithmetic in decimal, so `0.1 * 3` is `0.3`.
/// `None` when an operand has no decimal form or the operation fails.
fn decimal_arithmetic(op: BinOp, a: Option<Decimal>, b: Option<Decimal>) -> Option<Value> {
    let (a, b) = (a?, b?);
    let result = match op {
        BinOp::Add => a.checked_add(b),
        BinOp::Subtract => a.checked_sub(b),
        BinOp::Multiply => a.checked_mul(b),
        BinOp::Divide => a.checked_div(b),
        BinOp::Modulo => a.checked_rem(b),
        _ => None,
    }?;

    if result.is_integer()
        && let Some(r) = result.to_i64()
    {
        return Some(Value::Integer(r));
    }
    result.to_f64().map(Value::Float)
}

fn float_arithmetic(op: BinOp, a: f64, b: f64) -> f64 {
    match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        BinOp::Divide => a / b,
        BinOp::Modulo => a % b,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn integer_division_stays_integral_when_exact() {
        assert_eq!(apply_binop(BinOp::Divide, &Value::Integer(8), &Value::Integer(2)), Value::Integer(4));
        assert_eq!(apply_binop(BinOp::Divide, &Value::Integer(1), &Value::Integer(2)), Value::Float(0.5));
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        assert_eq!(
            apply_binop(BinOp::Divide, &Value::Integer(1), &Value::Integer(0)),
            Value::Float(f64::INFINITY)
        );
        let rem = apply_binop(BinOp::Modulo, &Value::Integer(1), &Value::Integer(0));
        assert!(rem.to_number().is_nan());
    }

    #[test]
    fn overflow_falls_back_to_float() {
        let result = apply_binop(BinOp::Add, &Value::Integer(i64::MAX), &Value::Integer(1));
        assert_eq!(result, Value::Float(i64::MAX as f64 + 1.0));
    }

    #[test]
    fn mixed_arithmetic_is_exact() {
        assert_eq!(apply_binop(BinOp::Multiply, &Value::Float(0.1), &Value::Integer(3)), Value::Float(0.3));
        assert_eq!(apply_binop(BinOp::Add, &Value::Float(0.5), &Value::Integer(1)), Value::Float(1.5));
        assert_eq!(apply_binop(BinOp::Multiply, &Value::Float(2.5), &Value::Integer(2)), Value::Integer(5));
    }

    #[test]
    fn negation_coerces() {
        assert_eq!(apply_unary(UnaryOp::Negate, &Value::from("3")), Value::Integer(-3));
        assert_eq!(apply_unary(UnaryOp::Negate, &Value::Boolean(true)), Value::Integer(-1));
        assert_eq!(
            apply_unary(UnaryOp::Negate, &Value::Integer(i64::MIN)),
            Value::Float(-(i64::MIN as f64))
        );
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            apply_binop(BinOp::Add, &Value::from("a"), &Value::Integer(1)),
            Value::from("a1")
        );
        assert_eq!(apply_unary(UnaryOp::Increment, &Value::from("1")), Value::from("11"));
        assert_eq!(apply_unary(UnaryOp::Decrement, &Value::from("1")), Value::Integer(0));
    }

    #[test]
    fn malformed_operator_nodes_are_errors() {
        let registry = Registry::new();
        let evaluator = Evaluator::new(&registry);
        let node = Expr::Operator {
            operand: Operand::Binary(BinOp::Add),
            args: vec![Expr::constant(1)],
        };
        assert_eq!(
            evaluator.eval_expr(&node, &Value::Undefined),
            Err(EvalError::OperandCount { operator: "+".to_string(), expected: 2, got: 1 })
        );

        let node = Expr::Operator { operand: Operand::Unary(UnaryOp::Not), args: vec![] };
        assert!(evaluator.eval_expr(&node, &Value::Undefined).is_err());
    }

    #[test]
    fn trailing_dot_stops_the_walk() {
        let registry = Registry::new();
        let evaluator = Evaluator::new(&registry);
        let scope = Value::from(serde_json::json!({"x": {"y": 1}}));
        assert_eq!(evaluator.resolve_path("x.", &scope), scope.get("x").cloned());
        assert_eq!(evaluator.resolve_path("x..y", &scope), scope.get("x").cloned());
        assert_eq!(evaluator.resolve_path("x.y.", &scope), Some(Value::Integer(1)));
    }

    #[test]
    fn comparisons() {
        assert_eq!(apply_binop(BinOp::LessThan, &Value::from("a"), &Value::from("b")), Value::Boolean(true));
        assert_eq!(apply_binop(BinOp::LessThan, &Value::from("10"), &Value::Integer(9)), Value::Boolean(false));
        assert_eq!(
            apply_binop(BinOp::GreaterEqual, &Value::Undefined, &Value::Integer(0)),
            Value::Boolean(false)
        );
    }
}
