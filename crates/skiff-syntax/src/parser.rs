//! Recursive-descent parser producing lambda calculus trees.

use crate::Token;
use skiff_ir::builders::{apply, lambda, let_in, list};
use skiff_ir::Expr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SyntaxError {
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("integer literal out of range: {0}")]
    IntegerOutOfRange(String),

    #[error("expected {expected}, found {found}")]
    UnexpectedToken { expected: String, found: String },

    #[error("unexpected {0} after end of statement")]
    TrailingInput(String),
}

/// Parses a token stream produced by [`crate::Tokenizer`].
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Parse one statement: `define name = expr` or an expression.
    ///
    /// The whole token stream must be consumed.
    pub fn parse_statement(&mut self) -> Result<Expr, SyntaxError> {
        let statement = if *self.current() == Token::Define {
            self.advance();
            let name = self.expect_ident()?;
            self.expect_equals()?;
            let body = self.parse_expr()?;
            Expr::define(name, body)
        } else {
            self.parse_expr()?
        };
        match self.current() {
            Token::Eof => Ok(statement),
            other => Err(SyntaxError::TrailingInput(other.to_string())),
        }
    }

    /// Parse one expression, leaving any following tokens in place.
    pub fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        match self.current() {
            Token::Lambda => self.parse_lambda(),
            Token::Let => self.parse_let(),
            _ => self.parse_application(),
        }
    }

    fn current(&self) -> &Token {
        // The tokenizer always terminates the stream with Eof
        self.tokens.get(self.pos).unwrap_or(&Token::Eof)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn unexpected(&self, expected: impl Into<String>) -> SyntaxError {
        SyntaxError::UnexpectedToken {
            expected: expected.into(),
            found: self.current().to_string(),
        }
    }

    fn expect(&mut self, token: Token) -> Result<(), SyntaxError> {
        if *self.current() == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(token.to_string()))
        }
    }

    fn expect_ident(&mut self) -> Result<String, SyntaxError> {
        match self.current() {
            Token::Ident(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn expect_equals(&mut self) -> Result<(), SyntaxError> {
        match self.current() {
            Token::Ident(name) if name == "=" => {
                self.advance();
                Ok(())
            }
            _ => Err(self.unexpected("`=`")),
        }
    }

    fn parse_lambda(&mut self) -> Result<Expr, SyntaxError> {
        self.expect(Token::Lambda)?;
        let mut params = vec![self.expect_ident()?];
        while let Token::Ident(name) = self.current() {
            params.push(name.clone());
            self.advance();
        }
        self.expect(Token::Dot)?;
        let body = self.parse_expr()?;
        Ok(lambda(params, body))
    }

    fn parse_let(&mut self) -> Result<Expr, SyntaxError> {
        self.expect(Token::Let)?;
        let name = self.expect_ident()?;
        self.expect_equals()?;
        let value = self.parse_expr()?;
        self.expect(Token::In)?;
        let body = self.parse_expr()?;
        Ok(let_in(name, value, body))
    }

    fn parse_application(&mut self) -> Result<Expr, SyntaxError> {
        let head = self.parse_atom()?;
        let mut args = Vec::new();

        loop {
            match self.current() {
                Token::Ident(_) | Token::Int(_) | Token::Str(_) | Token::LParen | Token::LBrace => {
                    args.push(self.parse_atom()?);
                }
                // A lambda or let extends as far right as possible, so it can
                // only be the last argument
                Token::Lambda | Token::Let => {
                    args.push(self.parse_expr()?);
                    break;
                }
                _ => break,
            }
        }

        Ok(apply(head, args))
    }

    fn parse_atom(&mut self) -> Result<Expr, SyntaxError> {
        match self.current() {
            Token::Ident(name) => {
                let var = Expr::var(name.clone());
                self.advance();
                Ok(var)
            }
            Token::Int(value) => {
                let num = Expr::num(*value);
                self.advance();
                Ok(num)
            }
            Token::Str(value) => {
                let string = Expr::string(value.clone());
                self.advance();
                Ok(string)
            }
            Token::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            Token::LBrace => {
                self.advance();
                let mut items = Vec::new();
                while *self.current() != Token::RBrace {
                    items.push(self.parse_atom()?);
                }
                self.advance();
                Ok(list(items))
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}
