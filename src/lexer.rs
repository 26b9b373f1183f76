use crate::{
    ast::Token,
    error::SyntaxError,
    trie::{self, LexemeTrie},
    value::Value,
};

/// Pull-based lexer: hands out one token per call to [`Lexer::next_token`].
///
/// After the input is exhausted it keeps returning [`crate::ast::TokenKind::Eof`].
pub struct Lexer<'k> {
    input: Vec<char>,
    position: usize,
    keywords: &'k LexemeTrie,
}

impl Lexer<'static> {
    /// Lexer over `input` using the shared keyword trie
    pub fn new(input: &str) -> Self {
        Lexer::with_keywords(input, trie::keywords())
    }
}

impl<'k> Lexer<'k> {
    pub fn with_keywords(input: &str, keywords: &'k LexemeTrie) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            keywords,
        }
    }

    /// Character offset of the cursor
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let (token, position) = scan(self.keywords, &self.input, self.position)?;
        self.position = position;
        Ok(token)
    }
}

/// Read the token starting at `index`, skipping any whitespace before it.
///
/// Returns the token together with the index just past it.
pub fn scan(
    keywords: &LexemeTrie,
    input: &[char],
    index: usize,
) -> Result<(Token, usize), SyntaxError> {
    let start = skip_whitespace(input, index);

    let Some(&ch) = input.get(start) else {
        return Ok((Token::eof(), start));
    };

    // Reserved spellings win over every other reading
    if let Some(keyword) = keywords.longest_prefix(input, start) {
        return Ok((keyword.clone(), start + keyword.width()));
    }

    let token = match ch {
        '"' | '\'' => read_string(input, start, ch)?,
        c if is_number_char(c) => read_number(input, start)?,
        c if is_identifier_start(c) => read_identifier(input, start),
        c => return Err(SyntaxError::UnknownCharacter(c)),
    };
    let end = start + token.width();
    Ok((token, end))
}

fn is_whitespace(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{A0}' | '\u{2028}' | '\u{2029}'
    )
}

fn is_alphabetic(ch: char) -> bool {
    // Latin and the basic Cyrillic block, А..я
    ch.is_ascii_alphabetic() || ('\u{0410}'..='\u{044F}').contains(&ch)
}

fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || ch == '.'
}

fn is_identifier_start(ch: char) -> bool {
    is_alphabetic(ch) || ch == '_' || ch == '$'
}

fn is_identifier_continue(ch: char) -> bool {
    is_identifier_start(ch) || ch.is_ascii_digit() || ch == '.'
}

fn skip_whitespace(input: &[char], mut index: usize) -> usize {
    while input.get(index).is_some_and(|&c| is_whitespace(c)) {
        index += 1;
    }
    index
}

fn take_while(input: &[char], start: usize, pred: impl Fn(char) -> bool) -> String {
    input[start..].iter().take_while(|&&c| pred(c)).collect()
}

fn read_string(input: &[char], start: usize, quote: char) -> Result<Token, SyntaxError> {
    let body_start = start + 1;
    let close = input[body_start..]
        .iter()
        .position(|&c| c == quote)
        .map(|offset| body_start + offset)
        .ok_or(SyntaxError::UnterminatedQuote(quote))?;

    let lexeme: String = input[start..=close].iter().collect();
    let contents: String = input[body_start..close].iter().collect();
    Ok(Token::constant(lexeme, Value::String(contents)))
}

fn read_number(input: &[char], start: usize) -> Result<Token, SyntaxError> {
    let lexeme = take_while(input, start, is_number_char);
    let value = parse_number(&lexeme).ok_or_else(|| SyntaxError::InvalidNumber(lexeme.clone()))?;
    Ok(Token::constant(lexeme, value))
}

/// Parse a run of digits and dots. At most one dot is allowed and it may
/// lead or trail (`.4`, `2.`). Leading zeros are ignored.
fn parse_number(lexeme: &str) -> Option<Value> {
    match lexeme.matches('.').count() {
        0 => Some(match lexeme.parse::<i64>() {
            Ok(n) => Value::Integer(n),
            // Too large for i64, keep the magnitude as a float
            Err(_) => Value::Float(lexeme.parse::<f64>().ok()?),
        }),
        1 if lexeme != "." => lexeme.parse::<f64>().ok().map(Value::Float),
        _ => None,
    }
}

fn read_identifier(input: &[char], start: usize) -> Token {
    Token::identifier(take_while(input, start, is_identifier_continue))
}
