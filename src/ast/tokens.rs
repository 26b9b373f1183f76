use crate::ast::{BinOp, UnaryOp};
use crate::value::Value;

/// The kind of a lexical token.
///
/// Operators sharing a precedence level share a kind; the concrete
/// operator lives in the token's [`TokenValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Number, string or boolean literal
    Constant,

    /// Dotted identifier path or function name
    ///
    /// # Examples
    /// ```text
    /// price
    /// user.address.city
    /// $total
    /// ```
    Identifier,

    /// `||`
    LogicalOr,

    /// `&&`
    LogicalAnd,

    /// `==` and `!=`
    LogicalEquality,

    /// `>`, `>=`, `<` and `<=`
    LogicalCondition,

    /// Prefix `!`
    LogicalNegation,

    /// `+` and `-`, binary or unary depending on position
    AddSubtract,

    /// Prefix `++` and `--`
    IncreaseDecrease,

    /// `*`, `/` and `%`
    MultiplyDivide,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,

    /// Argument separator, `,` or `;`
    Delimiter,

    /// End of input. Every token stream ends with exactly one.
    Eof,
}

/// Semantic payload carried by a token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    /// Punctuation and end of input carry nothing
    None,
    /// Literal value
    Constant(Value),
    /// Identifier path, e.g. `x.y`
    Path(String),
    /// Binary operator bound when the token is produced
    Binary(BinOp),
    /// Prefix operator bound when the token is produced
    Unary(UnaryOp),
}

/// A single token produced by the lexer.
///
/// Tokens are immutable: the parser inspects the current one, takes its
/// payload and asks the lexer for the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// The exact source text the token was read from
    pub lexeme: String,
    pub value: TokenValue,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, value: TokenValue) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            value,
        }
    }

    pub fn constant(lexeme: impl Into<String>, value: Value) -> Self {
        Self::new(TokenKind::Constant, lexeme, TokenValue::Constant(value))
    }

    pub fn identifier(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(TokenKind::Identifier, path.clone(), TokenValue::Path(path))
    }

    pub fn eof() -> Self {
        Self::new(TokenKind::Eof, "", TokenValue::None)
    }

    /// Check whether this token is of the given kind
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Number of source characters the token spans
    pub fn width(&self) -> usize {
        self.lexeme.chars().count()
    }
}
