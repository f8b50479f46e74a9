//! Structural validation of parsed statements.

use crate::{Expr, ExprKind};
use thiserror::Error;

/// Errors that can occur during validation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("define `{0}` is only allowed at the top level")]
    NestedDefine(String),
}

/// Validate an expression that will be evaluated directly.
///
/// `define` may not appear anywhere inside it.
pub fn validate(expr: &Expr) -> Result<(), ValidationError> {
    match expr.kind() {
        ExprKind::Var(_) | ExprKind::Num(_) | ExprKind::Str(_) => Ok(()),
        ExprKind::Abs(_, body) => validate(body),
        ExprKind::App(func, arg) => {
            validate(func)?;
            validate(arg)
        }
        ExprKind::Define(name, _) => Err(ValidationError::NestedDefine(name.clone())),
    }
}

/// Validate a top-level statement.
///
/// A statement may itself be a `define`, but its body follows the rules of
/// [`validate`].
pub fn validate_statement(expr: &Expr) -> Result<(), ValidationError> {
    match expr.kind() {
        ExprKind::Define(_, body) => validate(body),
        _ => validate(expr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_plain_terms() {
        assert!(validate(&Expr::var("x")).is_ok());
        assert!(validate(&Expr::num(1)).is_ok());
        assert!(validate(&Expr::abs("x", Expr::app(Expr::var("x"), Expr::string("s")))).is_ok());
    }

    #[test]
    fn test_validate_rejects_define() {
        let nested = Expr::app(Expr::var("f"), Expr::define("x", Expr::num(1)));
        assert_eq!(
            validate(&nested),
            Err(ValidationError::NestedDefine("x".into()))
        );
        assert!(validate(&Expr::define("x", Expr::num(1))).is_err());
    }

    #[test]
    fn test_validate_statement() {
        assert!(validate_statement(&Expr::define("x", Expr::num(1))).is_ok());
        let inner = Expr::define("x", Expr::define("y", Expr::num(1)));
        assert_eq!(
            validate_statement(&inner),
            Err(ValidationError::NestedDefine("y".into()))
        );
    }
}
