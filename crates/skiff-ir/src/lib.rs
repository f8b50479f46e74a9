//! Expression trees for Skiff.
//!
//! This crate defines the two representations a Skiff program passes through:
//! the lambda calculus tree produced by the parser ([`Expr`]) and the
//! variable-free SK combinator tree produced by bracket abstraction ([`Sk`]).
//!
//! # Lifecycle
//!
//! ```text
//! source --parse--> Expr --translate--> Sk --reduce--> Sk (normal form)
//! ```
//!
//! Every [`Expr`] carries an [`ExprId`] assigned at construction. Equality
//! between trees is structural and ignores ids; the id exists so that callers
//! can key caches on a specific instance.

mod lc;
mod sk;
mod validation;
pub mod builders;
pub mod builtins;

pub use lc::{Expr, ExprId, ExprKind};
pub use sk::Sk;
pub use validation::{ValidationError, validate, validate_statement};
