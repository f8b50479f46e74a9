//! Builders for the surface sugar that desugars into plain lambda terms.

use crate::Expr;

/// Applies `head` to each argument in turn: `head a1 a2 ... an`.
pub fn apply(head: Expr, args: impl IntoIterator<Item = Expr>) -> Expr {
    args.into_iter().fold(head, Expr::app)
}

/// Abstracts over each parameter in order: `λp1.λp2. ... body`.
pub fn lambda<S: Into<String>>(
    params: impl IntoIterator<Item = S, IntoIter: DoubleEndedIterator>,
    body: Expr,
) -> Expr {
    params
        .into_iter()
        .rev()
        .fold(body, |body, param| Expr::abs(param, body))
}

/// `let name = value in body`, i.e. `(λname.body) value`.
pub fn let_in(name: impl Into<String>, value: Expr, body: Expr) -> Expr {
    Expr::app(Expr::abs(name, body), value)
}

/// List literal `{e1 ... en}`, i.e. `cons e1 (... (cons en nil))`.
pub fn list(items: impl IntoIterator<Item = Expr, IntoIter: DoubleEndedIterator>) -> Expr {
    items.into_iter().rev().fold(Expr::var("nil"), |tail, head| {
        apply(Expr::var("cons"), [head, tail])
    })
}

/// Wraps `statement` in one binding per definition, first definition outermost.
///
/// Each `(name, value)` becomes `(λname. ...) value`, so later definitions
/// (and the statement itself) see every earlier name.
pub fn bind_all<'a>(
    definitions: impl IntoIterator<Item = (&'a str, &'a Expr), IntoIter: DoubleEndedIterator>,
    statement: Expr,
) -> Expr {
    definitions
        .into_iter()
        .rev()
        .fold(statement, |body, (name, value)| let_in(name, value.clone(), body))
}
