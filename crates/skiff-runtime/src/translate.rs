//! Lambda calculus to SK translation by bracket abstraction.

use skiff_ir::{Expr, ExprKind, Sk};
use thiserror::Error;
use tracing::trace;

/// Errors that can occur during translation.
#[derive(Debug, Error, PartialEq)]
pub enum TranslateError {
    #[error("`define {0}` cannot be translated; definitions are only valid as statements")]
    UnexpectedDefine(String),
}

/// Translate a lambda calculus expression into an equivalent SK term.
///
/// The result contains no bound variables. Free variables, including
/// builtin names, are kept as [`Sk::Var`].
pub fn translate(expr: &Expr) -> Result<Sk, TranslateError> {
    match expr.kind() {
        ExprKind::Var(name) => Ok(Sk::var(name.as_str())),
        ExprKind::Num(value) => Ok(Sk::num(*value)),
        ExprKind::Str(value) => Ok(Sk::string(value.as_str())),
        ExprKind::App(func, arg) => Ok(Sk::app(translate(func)?, translate(arg)?)),
        ExprKind::Abs(param, body) => bracket(param, body),
        ExprKind::Define(name, _) => Err(TranslateError::UnexpectedDefine(name.clone())),
    }
}

/// `[x] body` over a lambda calculus body.
fn bracket(x: &str, body: &Expr) -> Result<Sk, TranslateError> {
    match body.kind() {
        ExprKind::Var(name) if name == x => Ok(Sk::I),
        ExprKind::Var(name) => Ok(Sk::app(Sk::K, Sk::var(name.as_str()))),
        ExprKind::Num(value) => Ok(Sk::app(Sk::K, Sk::num(*value))),
        ExprKind::Str(value) => Ok(Sk::app(Sk::K, Sk::string(value.as_str()))),
        ExprKind::Abs(param, inner) => {
            // Innermost binder first, then abstract x out of the SK result
            let inner = bracket(param, inner)?;
            Ok(abstract_sk(x, &inner))
        }
        ExprKind::App(func, arg) => Ok(combine(bracket(x, func)?, bracket(x, arg)?)),
        ExprKind::Define(name, _) => Err(TranslateError::UnexpectedDefine(name.clone())),
    }
}

/// `[x] body` over a term that is already SK.
fn abstract_sk(x: &str, body: &Sk) -> Sk {
    match body {
        Sk::Var(name) if name == x => Sk::I,
        Sk::App(func, arg) if mentions(body, x) => {
            combine(abstract_sk(x, func), abstract_sk(x, arg))
        }
        _ => Sk::app(Sk::K, body.clone()),
    }
}

/// Returns true if `name` occurs anywhere in `expr`.
fn mentions(expr: &Sk, name: &str) -> bool {
    match expr {
        Sk::Var(var) => var == name,
        Sk::App(left, right) | Sk::Cons(left, right) | Sk::PartialOp2(_, left, right) => {
            mentions(left, name) || mentions(right, name)
        }
        Sk::PartialOp(_, arg) => mentions(arg, name),
        Sk::S | Sk::K | Sk::I | Sk::Num(_) | Sk::Str(_) | Sk::Nil => false,
    }
}

/// Joins the abstractions of both sides of an application with `S`.
fn combine(left: Sk, right: Sk) -> Sk {
    simplify(&left, &right).unwrap_or_else(|| Sk::apply(Sk::S, [left, right]))
}

/// `S (K e) I = e` and `S (K e) (K f) = K (e f)`.
fn simplify(left: &Sk, right: &Sk) -> Option<Sk> {
    let Sk::App(k, constant) = left else {
        return None;
    };
    if **k != Sk::K {
        return None;
    }
    match right {
        Sk::I => {
            trace!("eta: S (K e) I => e");
            Some((**constant).clone())
        }
        Sk::App(k, other) if **k == Sk::K => {
            trace!("constant: S (K e) (K f) => K (e f)");
            Some(Sk::app(Sk::K, Sk::App(constant.clone(), other.clone())))
        }
        _ => None,
    }
}
