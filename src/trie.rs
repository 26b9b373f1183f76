//! Prefix tree over operator and keyword spellings.
//!
//! The lexer asks the trie for the longest registered lexeme starting at
//! the cursor, so `>=` is always one token and never `>` followed by `=`.

use std::{collections::HashMap, sync::LazyLock};

use crate::{
    ast::{BinOp, Token, TokenKind, TokenValue, UnaryOp},
    value::Value,
};

static KEYWORDS: LazyLock<LexemeTrie> = LazyLock::new(LexemeTrie::with_keywords);

/// The shared keyword trie, built on first use and never mutated after.
pub fn keywords() -> &'static LexemeTrie {
    &KEYWORDS
}

#[derive(Debug, Default)]
pub struct LexemeTrie {
    children: HashMap<char, LexemeTrie>,
    /// Set when a registered lexeme ends at this node
    token: Option<Token>,
}

impl LexemeTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a trie holding every operator, punctuation mark and reserved
    /// word of the language.
    pub fn with_keywords() -> Self {
        use TokenKind::*;

        let mut trie = Self::new();
        let table = [
            (Constant, "true", TokenValue::Constant(Value::Boolean(true))),
            (Constant, "false", TokenValue::Constant(Value::Boolean(false))),
            (LogicalNegation, "!", TokenValue::Unary(UnaryOp::Not)),
            (IncreaseDecrease, "++", TokenValue::Unary(UnaryOp::Increment)),
            (IncreaseDecrease, "--", TokenValue::Unary(UnaryOp::Decrement)),
            (LogicalOr, "||", TokenValue::Binary(BinOp::Or)),
            (LogicalAnd, "&&", TokenValue::Binary(BinOp::And)),
            (LogicalCondition, ">", TokenValue::Binary(BinOp::GreaterThan)),
            (LogicalCondition, ">=", TokenValue::Binary(BinOp::GreaterEqual)),
            (LogicalCondition, "<", TokenValue::Binary(BinOp::LessThan)),
            (LogicalCondition, "<=", TokenValue::Binary(BinOp::LessEqual)),
            (LogicalEquality, "==", TokenValue::Binary(BinOp::Equal)),
            (LogicalEquality, "!=", TokenValue::Binary(BinOp::NotEqual)),
            (AddSubtract, "+", TokenValue::Binary(BinOp::Add)),
            (AddSubtract, "-", TokenValue::Binary(BinOp::Subtract)),
            (MultiplyDivide, "*", TokenValue::Binary(BinOp::Multiply)),
            (MultiplyDivide, "/", TokenValue::Binary(BinOp::Divide)),
            (MultiplyDivide, "%", TokenValue::Binary(BinOp::Modulo)),
            (OpenParen, "(", TokenValue::None),
            (CloseParen, ")", TokenValue::None),
            (Delimiter, ",", TokenValue::None),
            (Delimiter, ";", TokenValue::None),
        ];

        for (kind, lexeme, value) in table {
            trie.add(lexeme, Token::new(kind, lexeme, value));
        }
        trie
    }

    /// Register `lexeme`, replacing any token previously stored for it.
    pub fn add(&mut self, lexeme: &str, token: Token) -> &mut Self {
        let mut node = &mut *self;
        for ch in lexeme.chars() {
            node = node.children.entry(ch).or_default();
        }
        node.token = Some(token);
        self
    }

    /// Find the longest registered lexeme that `input[start..]` begins with.
    ///
    /// Walks one character at a time, remembering the deepest node that
    /// ends a lexeme, and falls back to it once the walk leaves the tree.
    pub fn longest_prefix(&self, input: &[char], start: usize) -> Option<&Token> {
        let mut node = self;
        let mut found = None;

        for ch in input.iter().skip(start) {
            match node.children.get(ch) {
                Some(next) => node = next,
                None => break,
            }
            if node.token.is_some() {
                found = node.token.as_ref();
            }
        }
        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'t>(trie: &'t LexemeTrie, text: &str, start: usize) -> Option<&'t str> {
        let input: Vec<char> = text.chars().collect();
        trie.longest_prefix(&input, start).map(|t| t.lexeme.as_str())
    }

    #[test]
    fn longest_match_wins() {
        let trie = LexemeTrie::with_keywords();
        assert_eq!(lookup(&trie, ">=1", 0), Some(">="));
        assert_eq!(lookup(&trie, "> =", 0), Some(">"));
        assert_eq!(lookup(&trie, "!=", 0), Some("!="));
        assert_eq!(lookup(&trie, "!x", 0), Some("!"));
        assert_eq!(lookup(&trie, "x ++y", 2), Some("++"));
    }

    #[test]
    fn backtracks_to_deepest_terminal() {
        let mut trie = LexemeTrie::new();
        trie.add("a", Token::identifier("a"));
        trie.add("abcd", Token::identifier("abcd"));
        assert_eq!(lookup(&trie, "abcx", 0), Some("a"));
        assert_eq!(lookup(&trie, "abcd", 0), Some("abcd"));
    }

    #[test]
    fn false_is_a_terminal() {
        let trie = LexemeTrie::with_keywords();
        let input: Vec<char> = "false".chars().collect();
        let token = trie.longest_prefix(&input, 0).unwrap();
        assert_eq!(token.value, TokenValue::Constant(Value::Boolean(false)));
    }

    #[test]
    fn no_match() {
        let trie = LexemeTrie::with_keywords();
        assert_eq!(lookup(&trie, "x", 0), None);
        assert_eq!(lookup(&trie, "&", 0), None);
        assert_eq!(lookup(&trie, "", 0), None);
    }
}
