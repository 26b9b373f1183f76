//! Documentation content for the morph CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Functions,
    Types,
}

impl DocCategory {
    /// Parse category name from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "functions" | "function" | "stdlib" => Some(Self::Functions),
            "types" | "type" => Some(Self::Types),
            _ => None,
        }
    }

    fn content(self) -> &'static str {
        match self {
            Self::Syntax => SYNTAX,
            Self::Operators => OPERATORS,
            Self::Functions => FUNCTIONS,
            Self::Types => TYPES,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"MORPH DOCUMENTATION

Morph is an expression language for rules and formulas. An expression is
compiled once and evaluated against a JSON scope; identifiers are dotted
paths into that scope.

DOCUMENTATION CATEGORIES

  syntax            Literals, identifiers, calls and grouping
  operators         Operators and their precedence
  functions         Standard functions available to expressions
  types             Values, truthiness and coercion rules

QUICK REFERENCE

  price             Scope lookup
  user.address.city Nested lookup
  items.0           Array element
  f(a, b)           Function call
  a || b            First truthy operand (both sides are evaluated)

Run 'morph doc <category>' for details.
"#
}

/// Get the documentation for a named category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    DocCategory::parse(name)
        .map(DocCategory::content)
        .ok_or_else(|| CliError::UnknownCategory(name.to_string()))
}

const SYNTAX: &str = r#"SYNTAX

LITERALS
  42  3.14  .5  2.          Decimal numbers, at most one dot
  "text"  'text'            Strings; no escape sequences
  true  false               Booleans (reserved words)

IDENTIFIERS
  Start with a Latin or Cyrillic letter, _ or $, continue with letters,
  digits, _, $ and dots. A dot separates path segments:

    order.total
    $meta.цена

  A missing segment evaluates to undefined, never an error.

CALLS
  name(arg, arg, ...)       Arguments may be separated by , or ;
  Functions are resolved when the expression is evaluated, so they can be
  registered after it is compiled.

GROUPING
  (1 + 2) * 3
"#;

const OPERATORS: &str = r#"OPERATORS

From loosest to tightest binding. Binary operators are left-associative.

  ||                        First operand if truthy, else the second
  &&                        Second operand if the first is truthy, else the first
  ==  !=                    Strict equality, no type coercion
  >  >=  <  <=              Strings lexicographically, otherwise numerically
  +  -                      Addition (concatenation if either side is a string)
  *  /  %                   Multiplication, division, remainder
  +x  -x  !x  ++x  --x      Prefix: identity, negation, not, x + 1, x - 1

Both sides of || and && are always evaluated. ++ and -- transform a value;
they never modify a variable.
"#;

const FUNCTIONS: &str = r#"STANDARD FUNCTIONS

  abs(x)  floor(x)  ceil(x)
  round(x)  round(x, digits)  Half away from zero
  min(x, ...)  max(x, ...)
  len(v)                    Characters, array items or object keys
  upper(s)  lower(s)  trim(s)
  contains(s, sub)          Substring test
  contains(array, v)        Membership test
  startsWith(s, prefix)  endsWith(s, suffix)
  matches(s, regex)
  coalesce(a, b, ...)       First argument that is not null or undefined

Disable with --no-stdlib.
"#;

const TYPES: &str = r#"TYPES

  undefined                 Result of a missing lookup
  null  boolean  integer  float  string  array  object

TRUTHINESS
  undefined, null, false, 0, NaN and "" are falsy. Everything else,
  including empty arrays and objects, is truthy.

ARITHMETIC
  Integer arithmetic stays integral while exact; mixed integer/float
  arithmetic is done in decimal. Division by zero gives Infinity or NaN.
  Non-numbers are coerced: true is 1, null is 0, numeric strings are
  parsed, anything else is NaN.
"#;
