//! Evaluation runtime for Skiff.
//!
//! Two interchangeable strategies evaluate the same lambda calculus trees:
//!
//! - [`CachedEvaluator`] translates each expression to SK combinators by
//!   bracket abstraction ([`translate`]), memoizing the translation per node
//!   instance, and drives the result to normal form with the lazy graph
//!   reducer ([`reduce`]).
//! - [`LambdaEvaluator`] evaluates the tree directly by call-by-name
//!   substitution.
//!
//! Both implement [`Evaluator`], which also provides multi-statement program
//! evaluation with `define` accumulation.

mod direct;
mod evaluator;
mod prelude;
mod primitive;
mod reduce;
mod render;
mod translate;

pub use direct::LambdaEvaluator;
pub use evaluator::{CachedEvaluator, Evaluator};
pub use prelude::{PRELUDE, prelude_definitions};
pub use primitive::{EvalError, Literal, Operand, apply_binary, apply_unary};
pub use reduce::reduce;
pub use render::{render, render_expr};
pub use translate::{TranslateError, translate};

use skiff_ir::ValidationError;
use skiff_syntax::SyntaxError;

/// Any failure while running a statement, from parsing to reduction.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum ExecutionError {
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("invalid statement: {0}")]
    Validation(#[from] ValidationError),

    #[error("translation error: {0}")]
    Translate(#[from] TranslateError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests;
