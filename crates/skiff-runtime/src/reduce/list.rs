//! List builtins.

use super::reduce_shared;
use crate::primitive::EvalError;
use skiff_ir::Sk;
use std::rc::Rc;

/// Apply a list builtin to forced arguments. Returns None if op isn't one.
pub(super) fn apply_list(op: &str, args: &[Rc<Sk>]) -> Result<Option<Rc<Sk>>, EvalError> {
    let result = match (op, args) {
        // Improper lists are allowed
        ("cons", [head, tail]) => Rc::new(Sk::Cons(head.clone(), tail.clone())),

        ("head", [list]) => match &**list {
            Sk::Cons(head, _) => head.clone(),
            Sk::Nil => return Err(EvalError::EmptyList(op.to_string())),
            other => return Err(not_a_sequence(op, other)),
        },

        ("tail", [list]) => match &**list {
            Sk::Cons(_, tail) => tail.clone(),
            Sk::Nil => return Err(EvalError::EmptyList(op.to_string())),
            other => return Err(not_a_sequence(op, other)),
        },

        ("isnil", [list]) => match &**list {
            Sk::Nil => Rc::new(Sk::church(true)),
            Sk::Cons(..) => Rc::new(Sk::church(false)),
            other => return Err(not_a_sequence(op, other)),
        },

        ("map", [func, list]) => {
            let mut mapped = Vec::new();
            for item in elements(op, list)? {
                mapped.push(reduce_shared(&Rc::new(Sk::App(func.clone(), item)))?);
            }
            from_elements(mapped)
        }

        // Right fold: f x1 (f x2 (... (f xn init)))
        ("fold", [func, init, list]) => {
            let mut acc = init.clone();
            for item in elements(op, list)?.into_iter().rev() {
                let step = Sk::App(Rc::new(Sk::App(func.clone(), item)), acc);
                acc = reduce_shared(&Rc::new(step))?;
            }
            acc
        }

        _ => return Ok(None),
    };
    Ok(Some(result))
}

/// Elements of a proper list.
fn elements(op: &str, list: &Rc<Sk>) -> Result<Vec<Rc<Sk>>, EvalError> {
    let mut items = Vec::new();
    let mut current = list;
    loop {
        match &**current {
            Sk::Cons(head, tail) => {
                items.push(head.clone());
                current = tail;
            }
            Sk::Nil => return Ok(items),
            _ => return Err(not_a_sequence(op, list)),
        }
    }
}

fn from_elements(items: Vec<Rc<Sk>>) -> Rc<Sk> {
    items
        .into_iter()
        .rev()
        .fold(Rc::new(Sk::Nil), |tail, head| Rc::new(Sk::Cons(head, tail)))
}

fn not_a_sequence(op: &str, found: &Sk) -> EvalError {
    EvalError::NotASequence {
        op: op.to_string(),
        found: found.to_string(),
    }
}
