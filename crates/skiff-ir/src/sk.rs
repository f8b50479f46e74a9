//! SK combinator tree.

use crate::lc::quote;
use serde::Serialize;
use std::fmt;
use std::rc::Rc;

/// An SK combinator expression.
///
/// Applications are always binary; `f a b` is `App(App(f, a), b)`.
/// Subtrees are reference counted so reduction can share unchanged parts
/// instead of copying them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Sk {
    /// `S x y z = x z (y z)`
    S,
    /// `K x y = x`
    K,
    /// `I x = x`
    I,
    /// Free identifier or builtin name
    Var(String),
    /// Integer literal
    Num(i64),
    /// String literal
    Str(String),
    /// Application
    App(Rc<Sk>, Rc<Sk>),
    /// Empty list
    Nil,
    /// List cell
    Cons(Rc<Sk>, Rc<Sk>),
    /// Strict builtin with its first argument already forced
    PartialOp(String, Rc<Sk>),
    /// Strict builtin with its first two arguments already forced
    PartialOp2(String, Rc<Sk>, Rc<Sk>),
}

impl Sk {
    /// Creates a variable.
    pub fn var(name: impl Into<String>) -> Self {
        Sk::Var(name.into())
    }

    /// Creates an integer literal.
    pub fn num(value: i64) -> Self {
        Sk::Num(value)
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        Sk::Str(value.into())
    }

    /// Creates an application.
    pub fn app(func: impl Into<Rc<Sk>>, arg: impl Into<Rc<Sk>>) -> Self {
        Sk::App(func.into(), arg.into())
    }

    /// Applies `head` to each argument in turn.
    pub fn apply(head: impl Into<Rc<Sk>>, args: impl IntoIterator<Item = Sk>) -> Self {
        let mut expr: Rc<Sk> = head.into();
        for arg in args {
            expr = Rc::new(Sk::App(expr, Rc::new(arg)));
        }
        Rc::unwrap_or_clone(expr)
    }

    /// Creates a list cell.
    pub fn cons(head: impl Into<Rc<Sk>>, tail: impl Into<Rc<Sk>>) -> Self {
        Sk::Cons(head.into(), tail.into())
    }

    /// Creates a proper list from its elements.
    pub fn list(items: impl IntoIterator<Item = Sk, IntoIter: DoubleEndedIterator>) -> Self {
        items
            .into_iter()
            .rev()
            .fold(Sk::Nil, |tail, head| Sk::cons(head, tail))
    }

    /// Returns the Church encoding of a boolean: `K` or `K I`.
    pub fn church(value: bool) -> Self {
        if value { Sk::K } else { Sk::app(Sk::K, Sk::I) }
    }

    /// Recognises the Church booleans `K` and `K I`.
    pub fn church_boolean(&self) -> Option<bool> {
        match self {
            Sk::K => Some(true),
            Sk::App(func, arg) if **func == Sk::K && **arg == Sk::I => Some(false),
            _ => None,
        }
    }

    /// Returns the variable name if this is a variable.
    pub fn as_var(&self) -> Option<&str> {
        match self {
            Sk::Var(name) => Some(name),
            _ => None,
        }
    }

    /// Returns true for the empty list and list cells.
    pub fn is_list(&self) -> bool {
        matches!(self, Sk::Nil | Sk::Cons(..))
    }

    /// Collects the elements of a list together with whatever ends it.
    ///
    /// For a proper list the terminator is `Nil`.
    pub fn list_parts(&self) -> (Vec<&Sk>, &Sk) {
        let mut items = Vec::new();
        let mut current = self;
        while let Sk::Cons(head, tail) = current {
            items.push(&**head);
            current = &**tail;
        }
        (items, current)
    }

    /// Returns the number of elements if this is a proper list.
    pub fn list_len(&self) -> Option<usize> {
        let (items, end) = self.list_parts();
        matches!(end, Sk::Nil).then_some(items.len())
    }
}

impl fmt::Display for Sk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sk::S => write!(f, "S"),
            Sk::K => write!(f, "K"),
            Sk::I => write!(f, "I"),
            Sk::Var(name) => write!(f, "{}", name),
            Sk::Num(value) => write!(f, "{}", value),
            Sk::Str(value) => write!(f, "{}", quote(value)),
            Sk::App(func, arg) => {
                if matches!(**func, Sk::App(..)) {
                    write!(f, "({})", func)?;
                } else {
                    write!(f, "{}", func)?;
                }
                if matches!(**arg, Sk::App(..)) {
                    write!(f, " ({})", arg)
                } else {
                    write!(f, " {}", arg)
                }
            }
            Sk::Nil | Sk::Cons(..) => {
                let (items, end) = self.list_parts();
                let items: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                match end {
                    Sk::Nil => write!(f, "{{{}}}", items.join(" ")),
                    tail => write!(f, "{{{} . {}}}", items.join(" "), tail),
                }
            }
            Sk::PartialOp(op, arg) => write!(f, "({} {} ...)", op, arg),
            Sk::PartialOp2(op, first, second) => write!(f, "({} {} {} ...)", op, first, second),
        }
    }
}
