//! Builtin names recognised by the evaluators.

/// Strict binary arithmetic and comparison operators.
pub const OPERATORS: &[&str] = &["+", "-", "*", "/", "%", "=", "<", ">"];

/// List and string builtins with their arities.
pub const BUILTINS: &[(&str, usize)] = &[
    ("cons", 2),
    ("map", 2),
    ("fold", 3),
    ("head", 1),
    ("tail", 1),
    ("isnil", 1),
    ("length", 1),
];

/// Names that resolve to a fixed value rather than being applied.
pub const CONSTANTS: &[&str] = &["true", "false", "if", "nil"];

/// Returns true if `name` is an arithmetic or comparison operator.
pub fn is_operator(name: &str) -> bool {
    OPERATORS.contains(&name)
}

/// Returns the number of arguments a builtin consumes, or `None` for
/// names that are not builtins.
pub fn arity(name: &str) -> Option<usize> {
    if is_operator(name) {
        return Some(2);
    }
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, arity)| *arity)
}

/// Returns true if `name` is reserved by the evaluators.
pub fn is_reserved(name: &str) -> bool {
    arity(name).is_some() || CONSTANTS.contains(&name)
}
