//! Standard host functions.
//!
//! Nothing here is built into the language: these are ordinary registry
//! functions, installed by [`crate::Engine::with_stdlib`] or
//! [`register_all`], and can be unregistered or shadowed like any other.

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy, prelude::FromPrimitive, prelude::ToPrimitive};

use crate::{error::RegistryError, registry::Registry, value::Value};

pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

/// Every standard function with the name it is registered under
pub static FUNCTIONS: &[(&str, NativeFn)] = &[
    ("abs", abs),
    ("min", min),
    ("max", max),
    ("round", round),
    ("floor", floor),
    ("ceil", ceil),
    ("len", len),
    ("upper", upper),
    ("lower", lower),
    ("trim", trim),
    ("contains", contains),
    ("startsWith", starts_with),
    ("endsWith", ends_with),
    ("matches", matches),
    ("coalesce", coalesce),
];

/// Register every standard function.
///
/// Fails without touching the registry if any of the names is already
/// taken.
pub fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    if let Some(&(name, _)) = FUNCTIONS.iter().find(|(name, _)| registry.has_function(name)) {
        return Err(RegistryError::FunctionDeclared(name.to_string()));
    }
    for &(name, function) in FUNCTIONS {
        registry.register_function(name, function)?;
    }
    Ok(())
}

fn arity(args: &[Value], expected: usize) -> Result<(), String> {
    if args.len() != expected {
        return Err(format!(
            "expected {} argument{}, got {}",
            expected,
            if expected == 1 { "" } else { "s" },
            args.len()
        ));
    }
    Ok(())
}

fn number(value: &Value) -> Result<Value, String> {
    match value {
        Value::Integer(_) | Value::Float(_) => Ok(value.clone()),
        v => Err(format!("expected a number, got {}", v.type_name())),
    }
}

fn string(value: &Value) -> Result<&str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("expected a string, got {}", value.type_name()))
}

/// Collapse whole floats that fit into integers
fn integral(f: f64) -> Value {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Value::Integer(f as i64)
    } else {
        Value::Float(f)
    }
}

fn abs(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    Ok(match number(&args[0])? {
        Value::Integer(n) => n
            .checked_abs()
            .map(Value::Integer)
            .unwrap_or(Value::Float((n as f64).abs())),
        v => Value::Float(v.to_number().abs()),
    })
}

fn extremum(args: &[Value], pick_left: fn(f64, f64) -> bool) -> Result<Value, String> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| "expected at least 1 argument, got 0".to_string())?;

    let mut best = number(first)?;
    for arg in rest {
        let candidate = number(arg)?;
        if !pick_left(best.to_number(), candidate.to_number()) {
            best = candidate;
        }
    }
    // Any NaN argument poisons the result
    if args.iter().any(|v| v.to_number().is_nan()) {
        return Ok(Value::Float(f64::NAN));
    }
    Ok(best)
}

fn min(args: &[Value]) -> Result<Value, String> {
    extremum(args, |a, b| a <= b)
}

fn max(args: &[Value]) -> Result<Value, String> {
    extremum(args, |a, b| a >= b)
}

/// `round(x)` or `round(x, digits)`, half away from zero
fn round(args: &[Value]) -> Result<Value, String> {
    let (value, digits) = match args {
        [value] => (value, 0),
        [value, digits] => match digits {
            Value::Integer(d) if (0..=28).contains(d) => (value, *d as u32),
            _ => return Err("digits must be an integer between 0 and 28".to_string()),
        },
        _ => return Err(format!("expected 1 or 2 arguments, got {}", args.len())),
    };

    match number(value)? {
        Value::Integer(n) => Ok(Value::Integer(n)),
        v => {
            let f = v.to_number();
            let Some(d) = Decimal::from_f64(f) else {
                // NaN, infinities and magnitudes beyond decimal range
                return Ok(Value::Float(f.round()));
            };
            let rounded = d.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            if rounded.is_integer()
                && let Some(r) = rounded.to_i64()
            {
                return Ok(Value::Integer(r));
            }
            Ok(Value::Float(rounded.to_f64().unwrap_or(f)))
        }
    }
}

fn floor(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    Ok(match number(&args[0])? {
        Value::Integer(n) => Value::Integer(n),
        v => integral(v.to_number().floor()),
    })
}

fn ceil(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    Ok(match number(&args[0])? {
        Value::Integer(n) => Value::Integer(n),
        v => integral(v.to_number().ceil()),
    })
}

fn len(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    let n = match &args[0] {
        Value::String(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        v => return Err(format!("cannot take the length of {}", v.type_name())),
    };
    Ok(Value::Integer(n as i64))
}

fn upper(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    Ok(Value::String(string(&args[0])?.to_uppercase()))
}

fn lower(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    Ok(Value::String(string(&args[0])?.to_lowercase()))
}

fn trim(args: &[Value]) -> Result<Value, String> {
    arity(args, 1)?;
    Ok(Value::String(string(&args[0])?.trim().to_string()))
}

/// Substring test on strings, membership test on arrays
fn contains(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let found = match (&args[0], &args[1]) {
        (Value::String(haystack), Value::String(needle)) => haystack.contains(needle.as_str()),
        (Value::Array(items), needle) => items.iter().any(|item| item.strict_equals(needle)),
        (Value::String(_), needle) => {
            return Err(format!("expected a string to search for, got {}", needle.type_name()));
        }
        (v, _) => return Err(format!("cannot search in {}", v.type_name())),
    };
    Ok(Value::Boolean(found))
}

fn starts_with(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    Ok(Value::Boolean(string(&args[0])?.starts_with(string(&args[1])?)))
}

fn ends_with(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    Ok(Value::Boolean(string(&args[0])?.ends_with(string(&args[1])?)))
}

fn matches(args: &[Value]) -> Result<Value, String> {
    arity(args, 2)?;
    let text = string(&args[0])?;
    let pattern = string(&args[1])?;
    let re = Regex::new(pattern).map_err(|e| format!("invalid regex: {e}"))?;
    Ok(Value::Boolean(re.is_match(text)))
}

/// First argument that is neither `null` nor `undefined`
fn coalesce(args: &[Value]) -> Result<Value, String> {
    Ok(args
        .iter()
        .find(|v| !v.is_nullish())
        .cloned()
        .unwrap_or(Value::Null))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_round() {
        assert_eq!(round(&[Value::Float(2.5)]), Ok(Value::Integer(3)));
        assert_eq!(round(&[Value::Float(-2.5)]), Ok(Value::Integer(-3)));
        assert_eq!(round(&[Value::Float(1.25), Value::Integer(1)]), Ok(Value::Float(1.3)));
        assert_eq!(round(&[Value::Integer(7), Value::Integer(2)]), Ok(Value::Integer(7)));
        assert!(round(&[Value::Float(1.0), Value::Integer(-1)]).is_err());
    }

    #[test]
    fn test_min_max_keep_integers() {
        let args = [Value::Integer(3), Value::Float(1.5), Value::Integer(-2)];
        assert_eq!(min(&args), Ok(Value::Integer(-2)));
        assert_eq!(max(&args), Ok(Value::Integer(3)));
        assert!(min(&[]).is_err());
        assert!(max(&[Value::from("a")]).is_err());
    }

    #[test]
    fn test_string_functions() {
        assert_eq!(upper(&[Value::from("abc")]), Ok(Value::from("ABC")));
        assert_eq!(len(&[Value::from("цена")]), Ok(Value::Integer(4)));
        assert_eq!(
            contains(&[Value::Array(vec![Value::Integer(1), Value::Integer(2)]), Value::Float(2.0)]),
            Ok(Value::Boolean(true))
        );
        assert_eq!(
            matches(&[Value::from("order-42"), Value::from(r"^order-\d+$")]),
            Ok(Value::Boolean(true))
        );
        assert!(matches(&[Value::from("x"), Value::from("(")]).unwrap_err().starts_with("invalid regex"));
    }

    #[test]
    fn test_arity_errors() {
        assert_eq!(abs(&[]), Err("expected 1 argument, got 0".to_string()));
        assert_eq!(
            starts_with(&[Value::from("a")]),
            Err("expected 2 arguments, got 1".to_string())
        );
    }

    #[test]
    fn test_register_all_rejects_duplicates() {
        let mut registry = Registry::new();
        register_all(&mut registry).unwrap();
        assert!(registry.has_function("matches"));
        assert_eq!(
            register_all(&mut registry),
            Err(RegistryError::FunctionDeclared("abs".to_string()))
        );
    }

    #[test]
    fn test_failed_register_all_leaves_registry_unchanged() {
        let mut registry = Registry::new();
        registry.register_function("len", |_: &[Value]| Ok(Value::Integer(-1))).unwrap();

        assert_eq!(
            register_all(&mut registry),
            Err(RegistryError::FunctionDeclared("len".to_string()))
        );
        assert_eq!(registry.function_names(), vec!["len"]);
    }
}
