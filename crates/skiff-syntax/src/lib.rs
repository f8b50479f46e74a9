//! Skiff surface syntax.
//!
//! Turns source text into lambda calculus trees. A program is a sequence of
//! statements, each either an expression or a `define name = value` binding;
//! [`split_statements`] finds the statement boundaries and
//! [`parse_statement`] parses one of them.

mod lexer;
mod parser;
mod program;

pub use lexer::{Token, Tokenizer};
pub use parser::{Parser, SyntaxError};
pub use program::{Nesting, split_statements};

use skiff_ir::Expr;

/// Parse a single statement.
pub fn parse_statement(source: &str) -> Result<Expr, SyntaxError> {
    let tokens = Tokenizer::new(source).tokenize()?;
    Parser::new(tokens).parse_statement()
}

/// Split `source` into statements and parse each one.
pub fn parse_program(source: &str) -> Result<Vec<Expr>, SyntaxError> {
    split_statements(source)
        .iter()
        .map(|statement| parse_statement(statement))
        .collect()
}
