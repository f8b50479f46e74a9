//! Primitive operator semantics shared by both evaluators.
//!
//! Operators are strict: by the time they run, both evaluators have forced
//! their arguments. The semantics are written once against [`Operand`] so
//! the SK reducer and the direct evaluator cannot drift apart.

use skiff_ir::builtins::is_operator;
use skiff_ir::{Expr, ExprKind, Sk};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    #[error("unknown operator `{0}`")]
    UnknownOperator(String),

    #[error("type mismatch: cannot apply `{op}` to {left} and {right}")]
    TypeMismatch {
        op: String,
        left: String,
        right: String,
    },

    #[error("`{op}` expects a list or string, found {found}")]
    NotASequence { op: String, found: String },

    #[error("`{0}` of an empty list")]
    EmptyList(String),

    #[error("arithmetic fault in `{op}`: {reason}")]
    ArithmeticFault { op: String, reason: String },
}

/// A literal operand value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'a> {
    Num(i64),
    Str(&'a str),
}

/// A value primitives can inspect and produce.
pub trait Operand: Sized + PartialEq + fmt::Display {
    /// Returns the literal this value holds, if any.
    fn literal(&self) -> Option<Literal<'_>>;

    fn number(value: i64) -> Self;

    fn text(value: String) -> Self;

    /// Church encoding of a boolean.
    fn boolean(value: bool) -> Self;

    /// Number of elements if this value is a proper list.
    fn list_len(&self) -> Option<usize> {
        None
    }

    /// Equality of two non-literal values under `=`.
    fn same_term(&self, other: &Self) -> bool {
        self == other
    }
}

impl Operand for Sk {
    fn literal(&self) -> Option<Literal<'_>> {
        match self {
            Sk::Num(value) => Some(Literal::Num(*value)),
            Sk::Str(value) => Some(Literal::Str(value)),
            _ => None,
        }
    }

    fn number(value: i64) -> Self {
        Sk::Num(value)
    }

    fn text(value: String) -> Self {
        Sk::Str(value)
    }

    fn boolean(value: bool) -> Self {
        Sk::church(value)
    }

    fn list_len(&self) -> Option<usize> {
        Sk::list_len(self)
    }
}

impl Operand for Expr {
    fn literal(&self) -> Option<Literal<'_>> {
        match self.kind() {
            ExprKind::Num(value) => Some(Literal::Num(*value)),
            ExprKind::Str(value) => Some(Literal::Str(value)),
            _ => None,
        }
    }

    fn number(value: i64) -> Self {
        Expr::num(value)
    }

    fn text(value: String) -> Self {
        Expr::string(value)
    }

    fn boolean(value: bool) -> Self {
        let chosen = if value { "t" } else { "f" };
        Expr::abs("t", Expr::abs("f", Expr::var(chosen)))
    }

    fn same_term(&self, other: &Self) -> bool {
        self.alpha_eq(other)
    }
}

/// Apply a binary operator to two forced operands.
pub fn apply_binary<T: Operand>(op: &str, left: &T, right: &T) -> Result<T, EvalError> {
    use Literal::{Num, Str};

    let result = match (op, left.literal(), right.literal()) {
        ("+", Some(Num(a)), Some(Num(b))) => T::number(checked(op, a, b, a.checked_add(b))?),
        ("+", Some(Str(a)), Some(Str(b))) => T::text(format!("{}{}", a, b)),
        ("-", Some(Num(a)), Some(Num(b))) => T::number(checked(op, a, b, a.checked_sub(b))?),
        ("*", Some(Num(a)), Some(Num(b))) => T::number(checked(op, a, b, a.checked_mul(b))?),
        ("/", Some(Num(a)), Some(Num(b))) => T::number(floored_div(op, a, b)?),
        ("%", Some(Num(a)), Some(Num(b))) => T::number(floored_rem(op, a, b)?),
        ("=", Some(a), Some(b)) => T::boolean(a == b),
        // Two non-literals compare as terms, a literal never equals a non-literal
        ("=", None, None) => T::boolean(left.same_term(right)),
        ("=", _, _) => T::boolean(false),
        ("<", Some(Num(a)), Some(Num(b))) => T::boolean(a < b),
        ("<", Some(Str(a)), Some(Str(b))) => T::boolean(a < b),
        (">", Some(Num(a)), Some(Num(b))) => T::boolean(a > b),
        (">", Some(Str(a)), Some(Str(b))) => T::boolean(a > b),
        _ if is_operator(op) => {
            return Err(EvalError::TypeMismatch {
                op: op.to_string(),
                left: left.to_string(),
                right: right.to_string(),
            });
        }
        _ => return Err(EvalError::UnknownOperator(op.to_string())),
    };
    Ok(result)
}

/// Apply a unary builtin to a forced operand.
pub fn apply_unary<T: Operand>(op: &str, value: &T) -> Result<T, EvalError> {
    match op {
        "length" => {
            let len = match value.literal() {
                Some(Literal::Str(text)) => Some(text.chars().count()),
                _ => value.list_len(),
            };
            len.map(|len| T::number(len as i64))
                .ok_or_else(|| EvalError::NotASequence {
                    op: op.to_string(),
                    found: value.to_string(),
                })
        }
        _ => Err(EvalError::UnknownOperator(op.to_string())),
    }
}

fn checked(op: &str, a: i64, b: i64, result: Option<i64>) -> Result<i64, EvalError> {
    result.ok_or_else(|| arithmetic_fault(op, a, b))
}

fn arithmetic_fault(op: &str, a: i64, b: i64) -> EvalError {
    let reason = if b == 0 && matches!(op, "/" | "%") {
        "division by zero".to_string()
    } else {
        format!("{} {} {} overflows", a, op, b)
    };
    EvalError::ArithmeticFault {
        op: op.to_string(),
        reason,
    }
}

/// Quotient rounded toward negative infinity.
fn floored_div(op: &str, a: i64, b: i64) -> Result<i64, EvalError> {
    let quotient = checked(op, a, b, a.checked_div(b))?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Remainder with the sign of the divisor.
fn floored_rem(op: &str, a: i64, b: i64) -> Result<i64, EvalError> {
    let remainder = checked(op, a, b, a.checked_rem(b))?;
    if remainder != 0 && (remainder < 0) != (b < 0) {
        Ok(remainder + b)
    } else {
        Ok(remainder)
    }
}
