//! Tokenizer.

use crate::SyntaxError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

/// A lexical token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// `\` or `λ`
    Lambda,
    Dot,
    LParen,
    RParen,
    LBrace,
    RBrace,
    /// Identifier, including operator names like `+` and `<`
    Ident(String),
    /// Non-negative integer literal
    Int(i64),
    /// String literal with escapes already resolved
    Str(String),
    Let,
    In,
    Define,
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Lambda => write!(f, "`\\`"),
            Token::Dot => write!(f, "`.`"),
            Token::LParen => write!(f, "`(`"),
            Token::RParen => write!(f, "`)`"),
            Token::LBrace => write!(f, "`{{`"),
            Token::RBrace => write!(f, "`}}`"),
            Token::Ident(name) => write!(f, "identifier `{}`", name),
            Token::Int(value) => write!(f, "integer {}", value),
            Token::Str(value) => write!(f, "string {:?}", value),
            Token::Let => write!(f, "`let`"),
            Token::In => write!(f, "`in`"),
            Token::Define => write!(f, "`define`"),
            Token::Eof => write!(f, "end of input"),
        }
    }
}

const SYMBOL_CHARS: &str = "_+-*/%=<>!?";

fn is_ident_start(c: char) -> bool {
    c != 'λ' && (c.is_alphabetic() || SYMBOL_CHARS.contains(c))
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '\''
}

/// Splits source text into [`Token`]s.
pub struct Tokenizer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Tokenize the whole input. The result always ends with [`Token::Eof`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();

        while let Some(&(offset, c)) = self.chars.peek() {
            match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                }
                '#' => self.skip_comment(),
                '\\' | 'λ' => tokens.push(self.single(Token::Lambda)),
                '.' => tokens.push(self.single(Token::Dot)),
                '(' => tokens.push(self.single(Token::LParen)),
                ')' => tokens.push(self.single(Token::RParen)),
                '{' => tokens.push(self.single(Token::LBrace)),
                '}' => tokens.push(self.single(Token::RBrace)),
                '"' => tokens.push(self.read_string()?),
                c if c.is_ascii_digit() => tokens.push(self.read_int(offset)?),
                c if is_ident_start(c) => tokens.push(self.read_identifier(offset)),
                other => return Err(SyntaxError::UnexpectedChar { ch: other, offset }),
            }
        }

        tokens.push(Token::Eof);
        Ok(tokens)
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    fn skip_comment(&mut self) {
        while let Some(&(_, c)) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.chars.next();
        }
    }

    /// Byte offset just past the last consumed character.
    fn end_of(&mut self) -> usize {
        self.chars
            .peek()
            .map(|&(offset, _)| offset)
            .unwrap_or(self.input.len())
    }

    fn consume_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.chars.next_if(|&(_, c)| pred(c)).is_some() {}
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        self.consume_while(is_ident_continue);
        let end = self.end_of();
        match &self.input[start..end] {
            "let" => Token::Let,
            "in" => Token::In,
            "define" => Token::Define,
            name => Token::Ident(name.to_string()),
        }
    }

    fn read_int(&mut self, start: usize) -> Result<Token, SyntaxError> {
        self.consume_while(|c| c.is_ascii_digit());
        let end = self.end_of();
        let text = &self.input[start..end];
        text.parse::<i64>()
            .map(Token::Int)
            .map_err(|_| SyntaxError::IntegerOutOfRange(text.to_string()))
    }

    fn read_string(&mut self) -> Result<Token, SyntaxError> {
        // Opening quote
        self.chars.next();
        let mut buffer = String::new();

        loop {
            let Some((_, c)) = self.chars.next() else {
                return Err(SyntaxError::UnterminatedString);
            };
            match c {
                '"' => return Ok(Token::Str(buffer)),
                '\\' => match self.chars.next() {
                    Some((_, 'n')) => buffer.push('\n'),
                    Some((_, 't')) => buffer.push('\t'),
                    Some((_, 'r')) => buffer.push('\r'),
                    Some((_, '\\')) => buffer.push('\\'),
                    Some((_, '"')) => buffer.push('"'),
                    // Unknown escapes keep their backslash
                    Some((_, other)) => {
                        buffer.push('\\');
                        buffer.push(other);
                    }
                    None => return Err(SyntaxError::UnterminatedString),
                },
                c => buffer.push(c),
            }
        }
    }
}
