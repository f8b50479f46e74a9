//! Standard definitions loaded ahead of user programs.

use crate::ExecutionError;
use skiff_ir::{Expr, ExprKind, validate_statement};
use skiff_syntax::parse_program;

/// Prelude source. Every statement is a `define`.
pub const PRELUDE: &str = r"# Fixed-point combinator
define Y = \f.(\x.f (x x)) (\x.f (x x))

define not = \b.if b false true
define and = \a b.if a b false
define or = \a b.if a true b

define compose = \f g x.f (g x)
";

/// Parse the prelude into `(name, value)` definitions, in order.
pub fn prelude_definitions() -> Result<Vec<(String, Expr)>, ExecutionError> {
    let mut definitions = Vec::new();
    for statement in parse_program(PRELUDE)? {
        validate_statement(&statement)?;
        if let ExprKind::Define(name, value) = statement.into_kind() {
            definitions.push((name, *value));
        }
    }
    Ok(definitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_parses() {
        let names: Vec<String> = prelude_definitions()
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["Y", "not", "and", "or", "compose"]);
    }
}
