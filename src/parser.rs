use std::mem;

use crate::{
    ast::{Expr, Token, TokenKind, TokenValue},
    error::SyntaxError,
    lexer::Lexer,
};

/// Recursive-descent parser with one token of lookahead.
///
/// Each precedence level has its own method; the binary ones loop to
/// build left-leaning trees, so `1 - 1 - 1` is `(1 - 1) - 1`.
pub struct Parser<'k> {
    lexer: Lexer<'k>,
    current_token: Token,
    /// Paths of every identifier lookup, in parse order, duplicates kept
    identifiers: Vec<String>,
}

impl<'k> Parser<'k> {
    pub fn new(mut lexer: Lexer<'k>) -> Result<Self, SyntaxError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
            identifiers: vec![],
        })
    }

    fn advance(&mut self) -> Result<(), SyntaxError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current_token.is(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), SyntaxError> {
        if !self.check(kind) {
            return Err(SyntaxError::UnexpectedEnd);
        }
        self.advance()
    }

    /// Take the current token and move to the next one
    fn bump(&mut self) -> Result<Token, SyntaxError> {
        let next = self.lexer.next_token()?;
        Ok(mem::replace(&mut self.current_token, next))
    }

    pub fn into_identifiers(self) -> Vec<String> {
        self.identifiers
    }

    /// Parse one complete expression. Anything left over after it,
    /// including a stray `)`, is an error.
    pub fn parse(&mut self) -> Result<Expr, SyntaxError> {
        let expr = self.parse_expression()?;
        if !self.check(TokenKind::Eof) {
            return Err(SyntaxError::UnexpectedEnd);
        }
        Ok(expr)
    }

    pub fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_or()
    }

    /// Shared loop of every binary level: parse an operand at the next
    /// level, then fold in `op operand` pairs while the current token is
    /// of `kind`.
    fn parse_binary_level(
        &mut self,
        kind: TokenKind,
        next_level: fn(&mut Self) -> Result<Expr, SyntaxError>,
    ) -> Result<Expr, SyntaxError> {
        let mut left = next_level(self)?;

        while self.check(kind) {
            let op = match self.bump()?.value {
                TokenValue::Binary(op) => op,
                _ => return Err(SyntaxError::UnexpectedEnd),
            };
            let right = next_level(self)?;
            left = Expr::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary_level(TokenKind::LogicalOr, Self::parse_and)
    }

    fn parse_and(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary_level(TokenKind::LogicalAnd, Self::parse_equality)
    }

    fn parse_equality(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary_level(TokenKind::LogicalEquality, Self::parse_comparison)
    }

    fn parse_comparison(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary_level(TokenKind::LogicalCondition, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary_level(TokenKind::AddSubtract, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, SyntaxError> {
        self.parse_binary_level(TokenKind::MultiplyDivide, Self::parse_unary)
    }

    /// Prefix operators, right-associative: `!!x`, `- -x`, `++--x`
    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        let op = match (&self.current_token.kind, &self.current_token.value) {
            (TokenKind::AddSubtract, TokenValue::Binary(op)) => op.as_prefix(),
            (
                TokenKind::LogicalNegation | TokenKind::IncreaseDecrease,
                TokenValue::Unary(op),
            ) => Some(*op),
            _ => None,
        };

        match op {
            Some(op) => {
                self.advance()?;
                let operand = self.parse_unary()?;
                Ok(Expr::unary(op, operand))
            }
            None => self.parse_primary(),
        }
    }

    /// Identifiers, calls, literals and parenthesized groups
    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        match self.current_token.kind {
            TokenKind::Identifier => self.parse_identifier(),
            TokenKind::Constant => match self.bump()?.value {
                TokenValue::Constant(value) => Ok(Expr::Constant(value)),
                _ => Err(SyntaxError::UnexpectedEnd),
            },
            TokenKind::OpenParen => {
                self.advance()?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(expr)
            }
            // `)`, a delimiter, a binary operator or end of input
            _ => Err(SyntaxError::UnexpectedEnd),
        }
    }

    fn parse_identifier(&mut self) -> Result<Expr, SyntaxError> {
        let path = match self.bump()?.value {
            TokenValue::Path(path) => path,
            _ => return Err(SyntaxError::UnexpectedEnd),
        };

        if !self.check(TokenKind::OpenParen) {
            self.identifiers.push(path.clone());
            return Ok(Expr::Identifier(path));
        }

        self.advance()?; // consume '('
        let args = self.parse_arguments()?;
        self.expect(TokenKind::CloseParen)?;
        Ok(Expr::call(path, args))
    }

    fn parse_arguments(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = vec![];
        if self.check(TokenKind::CloseParen) {
            return Ok(args);
        }

        args.push(self.parse_expression()?);
        while self.check(TokenKind::Delimiter) {
            self.advance()?;
            args.push(self.parse_expression()?);
        }
        Ok(args)
    }
}

/// Compile `input` into an expression tree, returning the tree and the
/// identifier paths it reads.
pub fn parse(input: &str) -> Result<(Expr, Vec<String>), SyntaxError> {
    let mut parser = Parser::new(Lexer::new(input))?;
    let expr = parser.parse()?;
    Ok((expr, parser.into_identifiers()))
}
