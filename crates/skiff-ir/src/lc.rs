//! Lambda calculus expression tree.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of one constructed [`Expr`] node.
///
/// Two structurally equal trees built separately have different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(u64);

impl ExprId {
    fn fresh() -> Self {
        ExprId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// The shape of an [`Expr`] node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ExprKind {
    /// Variable reference (also used for builtin names like `+` or `head`)
    Var(String),
    /// Integer literal
    Num(i64),
    /// String literal
    Str(String),
    /// Abstraction `λparam.body`
    Abs(String, Box<Expr>),
    /// Application `func arg`
    App(Box<Expr>, Box<Expr>),
    /// Top-level binding `define name = body`
    Define(String, Box<Expr>),
}

/// A lambda calculus expression node.
///
/// Nodes are immutable once built. `PartialEq` compares structure only;
/// [`Expr::id`] distinguishes instances. Cloning produces a new instance with
/// fresh ids throughout, the same as building the tree again by hand.
#[derive(Debug)]
pub struct Expr {
    id: ExprId,
    kind: ExprKind,
}

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Expr {
            id: ExprId::fresh(),
            kind,
        }
    }

    /// Creates a variable reference.
    pub fn var(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Var(name.into()))
    }

    /// Creates an integer literal.
    pub fn num(value: i64) -> Self {
        Self::new(ExprKind::Num(value))
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Self::new(ExprKind::Str(value.into()))
    }

    /// Creates an abstraction.
    pub fn abs(param: impl Into<String>, body: Expr) -> Self {
        Self::new(ExprKind::Abs(param.into(), Box::new(body)))
    }

    /// Creates an application.
    pub fn app(func: Expr, arg: Expr) -> Self {
        Self::new(ExprKind::App(Box::new(func), Box::new(arg)))
    }

    /// Creates a top-level definition.
    pub fn define(name: impl Into<String>, body: Expr) -> Self {
        Self::new(ExprKind::Define(name.into(), Box::new(body)))
    }

    /// Returns the identity of this node.
    pub fn id(&self) -> ExprId {
        self.id
    }

    /// Returns the shape of this node.
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Consumes the node, returning its shape.
    pub fn into_kind(self) -> ExprKind {
        self.kind
    }

    /// Returns the variable name if this is a variable.
    pub fn as_var(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Var(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the integer value if this is a number literal.
    pub fn as_num(&self) -> Option<i64> {
        match self.kind {
            ExprKind::Num(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the text if this is a string literal.
    pub fn as_str(&self) -> Option<&str> {
        match &self.kind {
            ExprKind::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns true if this is an abstraction.
    pub fn is_abs(&self) -> bool {
        matches!(self.kind, ExprKind::Abs(..))
    }

    /// Returns true if this is a top-level definition.
    pub fn is_define(&self) -> bool {
        matches!(self.kind, ExprKind::Define(..))
    }

    /// Collects the names occurring free in this expression.
    pub fn free_vars(&self) -> HashSet<String> {
        let mut free = HashSet::new();
        self.collect_free(&mut Vec::new(), &mut free);
        free
    }

    fn collect_free<'a>(&'a self, bound: &mut Vec<&'a str>, free: &mut HashSet<String>) {
        match &self.kind {
            ExprKind::Var(name) => {
                if !bound.contains(&name.as_str()) {
                    free.insert(name.clone());
                }
            }
            ExprKind::Num(_) | ExprKind::Str(_) => {}
            ExprKind::Abs(param, body) | ExprKind::Define(param, body) => {
                bound.push(param);
                body.collect_free(bound, free);
                bound.pop();
            }
            ExprKind::App(func, arg) => {
                func.collect_free(bound, free);
                arg.collect_free(bound, free);
            }
        }
    }

    /// Structural equality up to renaming of bound variables, so `λx.x` and
    /// `λy.y` are the same term.
    pub fn alpha_eq(&self, other: &Expr) -> bool {
        self.alpha_eq_in(other, &mut Vec::new())
    }

    fn alpha_eq_in<'a>(
        &'a self,
        other: &'a Expr,
        bound: &mut Vec<(&'a str, &'a str)>,
    ) -> bool {
        match (&self.kind, &other.kind) {
            (ExprKind::Var(left), ExprKind::Var(right)) => {
                // Both names must refer to the same binder, or both be free
                let left_binder = bound.iter().rposition(|&(name, _)| name == left.as_str());
                let right_binder = bound.iter().rposition(|&(_, name)| name == right.as_str());
                match (left_binder, right_binder) {
                    (None, None) => left == right,
                    (Some(i), Some(j)) => i == j,
                    _ => false,
                }
            }
            (ExprKind::Num(left), ExprKind::Num(right)) => left == right,
            (ExprKind::Str(left), ExprKind::Str(right)) => left == right,
            (ExprKind::Abs(left, left_body), ExprKind::Abs(right, right_body)) => {
                bound.push((left.as_str(), right.as_str()));
                let equal = left_body.alpha_eq_in(right_body, bound);
                bound.pop();
                equal
            }
            (ExprKind::App(left_func, left_arg), ExprKind::App(right_func, right_arg)) => {
                left_func.alpha_eq_in(right_func, bound)
                    && left_arg.alpha_eq_in(right_arg, bound)
            }
            (ExprKind::Define(left, left_body), ExprKind::Define(right, right_body)) => {
                left == right && left_body.alpha_eq_in(right_body, bound)
            }
            _ => false,
        }
    }

    /// Recognises the Church booleans `λa.λb.a` and `λa.λb.b`.
    pub fn church_boolean(&self) -> Option<bool> {
        let ExprKind::Abs(first, inner) = &self.kind else {
            return None;
        };
        let ExprKind::Abs(second, body) = &inner.kind else {
            return None;
        };
        match body.as_var() {
            Some(name) if name == second.as_str() => Some(false),
            Some(name) if name == first.as_str() => Some(true),
            _ => None,
        }
    }
}

impl Clone for Expr {
    fn clone(&self) -> Self {
        Self::new(self.kind.clone())
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Serialize for Expr {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.kind.serialize(serializer)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Var(name) => write!(f, "{}", name),
            ExprKind::Num(value) => write!(f, "{}", value),
            ExprKind::Str(value) => write!(f, "{}", quote(value)),
            ExprKind::Abs(param, body) => write!(f, "λ{}.{}", param, body),
            ExprKind::App(func, arg) => {
                if func.is_abs() {
                    write!(f, "({})", func)?;
                } else {
                    write!(f, "{}", func)?;
                }
                match arg.kind {
                    ExprKind::Abs(..) | ExprKind::App(..) => write!(f, " ({})", arg),
                    _ => write!(f, " {}", arg),
                }
            }
            ExprKind::Define(name, body) => write!(f, "define {} = {}", name, body),
        }
    }
}

/// Renders a string literal with the escapes the tokenizer understands.
pub(crate) fn quote(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t");
    format!("\"{}\"", escaped)
}
