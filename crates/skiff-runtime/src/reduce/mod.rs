//! Lazy normal-order reduction of SK terms.
//!
//! The function position of an application is always reduced first. An
//! argument is only reduced when a rule needs its value: when it becomes the
//! whole result (`I x`, `K x y`) or when it is passed to a strict builtin.
//! Everything else is stored unevaluated, so unused arguments are never
//! forced.
//!
//! Reduction recurses on the host stack. A term without a normal form
//! either loops or exhausts the stack.

mod list;

use crate::primitive::{EvalError, apply_binary, apply_unary};
use skiff_ir::Sk;
use skiff_ir::builtins::arity;
use std::rc::Rc;
use tracing::trace;

/// Reduce `expr` to normal form.
pub fn reduce(expr: &Sk) -> Result<Sk, EvalError> {
    reduce_shared(&Rc::new(expr.clone())).map(Rc::unwrap_or_clone)
}

/// Reduce a shared term. Unchanged subterms are shared with the input.
pub(crate) fn reduce_shared(expr: &Rc<Sk>) -> Result<Rc<Sk>, EvalError> {
    match &**expr {
        Sk::Var(name) => Ok(resolve(name).map(Rc::new).unwrap_or_else(|| expr.clone())),
        Sk::App(func, arg) => {
            let func = reduce_shared(func)?;
            apply(&func, arg)
        }
        Sk::S
        | Sk::K
        | Sk::I
        | Sk::Num(_)
        | Sk::Str(_)
        | Sk::Nil
        | Sk::Cons(..)
        | Sk::PartialOp(..)
        | Sk::PartialOp2(..) => Ok(expr.clone()),
    }
}

/// Names that stand for a fixed term rather than being applied.
fn resolve(name: &str) -> Option<Sk> {
    match name {
        "true" => Some(Sk::church(true)),
        "false" => Some(Sk::church(false)),
        "if" => Some(Sk::I),
        "nil" => Some(Sk::Nil),
        _ => None,
    }
}

/// `func arg`, left unevaluated.
fn suspend(func: &Rc<Sk>, arg: &Rc<Sk>) -> Rc<Sk> {
    Rc::new(Sk::App(func.clone(), arg.clone()))
}

/// Apply an already reduced function to an unevaluated argument.
fn apply(func: &Rc<Sk>, arg: &Rc<Sk>) -> Result<Rc<Sk>, EvalError> {
    match &**func {
        Sk::I => {
            trace!("I x => x");
            reduce_shared(arg)
        }
        Sk::K | Sk::S => Ok(suspend(func, arg)),
        Sk::App(inner_func, inner_arg) => apply2(func, inner_func, inner_arg, arg),
        Sk::Var(name) => apply_named(name, func, arg),
        Sk::PartialOp(op, first) => {
            let arg = reduce_shared(arg)?;
            if arity(op) == Some(3) {
                Ok(Rc::new(Sk::PartialOp2(op.clone(), first.clone(), arg)))
            } else {
                apply_strict(op, &[first.clone(), arg])
            }
        }
        Sk::PartialOp2(op, first, second) => {
            let arg = reduce_shared(arg)?;
            apply_strict(op, &[first.clone(), second.clone(), arg])
        }
        // Literals and lists in function position cannot make progress
        Sk::Num(_) | Sk::Str(_) | Sk::Nil | Sk::Cons(..) => Ok(suspend(func, arg)),
    }
}

/// Apply `(inner_func inner_arg)` to `arg`.
fn apply2(
    func: &Rc<Sk>,
    inner_func: &Rc<Sk>,
    inner_arg: &Rc<Sk>,
    arg: &Rc<Sk>,
) -> Result<Rc<Sk>, EvalError> {
    match &**inner_func {
        Sk::K => {
            trace!("K x y => x");
            reduce_shared(inner_arg)
        }
        Sk::App(s, p) if **s == Sk::S => {
            trace!("S p q r => p r (q r)");
            let q = inner_arg;
            let expanded = Sk::app(
                Sk::App(p.clone(), arg.clone()),
                Sk::App(q.clone(), arg.clone()),
            );
            reduce_shared(&Rc::new(expanded))
        }
        _ => Ok(suspend(func, arg)),
    }
}

/// Apply a named function: a builtin if the name is one, otherwise a free
/// variable that stays unevaluated.
fn apply_named(name: &str, func: &Rc<Sk>, arg: &Rc<Sk>) -> Result<Rc<Sk>, EvalError> {
    match arity(name) {
        Some(1) => {
            let arg = reduce_shared(arg)?;
            apply_strict(name, &[arg])
        }
        Some(_) => {
            let arg = reduce_shared(arg)?;
            Ok(Rc::new(Sk::PartialOp(name.to_string(), arg)))
        }
        None => Ok(suspend(func, arg)),
    }
}

/// Run a builtin whose arguments have all been forced.
fn apply_strict(op: &str, args: &[Rc<Sk>]) -> Result<Rc<Sk>, EvalError> {
    trace!(op, "builtin");
    if let Some(result) = list::apply_list(op, args)? {
        return Ok(result);
    }
    match args {
        [value] => apply_unary(op, &**value).map(Rc::new),
        [left, right] => apply_binary(op, &**left, &**right).map(Rc::new),
        _ => Err(EvalError::UnknownOperator(op.to_string())),
    }
}
