//! Direct call-by-name evaluation of lambda calculus trees.

use crate::primitive::{EvalError, apply_binary, apply_unary};
use crate::render::render_expr;
use crate::{Evaluator, ExecutionError};
use skiff_ir::builtins::is_operator;
use skiff_ir::{Expr, ExprKind, validate};
use std::collections::HashSet;
use tracing::trace;

/// Evaluates expressions by substitution, without translating them.
///
/// Arguments are substituted unevaluated. Operators and `length` force
/// their arguments; list builtins are not available and behave as free
/// variables. The result is in weak head normal form: evaluation stops at an
/// abstraction, a literal, or an application whose head cannot be reduced.
#[derive(Debug, Default)]
pub struct LambdaEvaluator;

impl LambdaEvaluator {
    pub fn new() -> Self {
        Self
    }
}

impl Evaluator for LambdaEvaluator {
    type Value = Expr;

    /// Evaluate `expr`. `define` is rejected anywhere inside it.
    fn evaluate(&mut self, expr: &Expr) -> Result<Expr, ExecutionError> {
        validate(expr)?;
        Ok(eval(expr)?)
    }

    fn render(value: &Expr, church_booleans: bool) -> String {
        render_expr(value, church_booleans)
    }
}

fn eval(expr: &Expr) -> Result<Expr, EvalError> {
    match expr.kind() {
        ExprKind::Var(name) => Ok(resolve(name).unwrap_or_else(|| expr.clone())),
        ExprKind::App(func, arg) => {
            let func = eval(func)?;
            apply(func, arg)
        }
        ExprKind::Num(_) | ExprKind::Str(_) | ExprKind::Abs(..) | ExprKind::Define(..) => {
            Ok(expr.clone())
        }
    }
}

/// Church encodings of the builtin constants.
fn resolve(name: &str) -> Option<Expr> {
    let church = |chosen: &str| Expr::abs("t", Expr::abs("f", Expr::var(chosen)));
    match name {
        "true" => Some(church("t")),
        "false" => Some(church("f")),
        "if" => Some(Expr::abs("p", Expr::var("p"))),
        _ => None,
    }
}

/// Apply an evaluated function to an unevaluated argument.
fn apply(func: Expr, arg: &Expr) -> Result<Expr, EvalError> {
    match func.kind() {
        ExprKind::Abs(param, body) => {
            trace!(%param, "beta");
            return eval(&substitute(body, param, arg));
        }
        ExprKind::Var(name) if name == "length" => return apply_unary(name, &eval(arg)?),
        ExprKind::App(op, first) => {
            if let Some(name) = op.as_var().filter(|name| is_operator(name)) {
                return apply_binary(name, &**first, &eval(arg)?);
            }
        }
        _ => {}
    }

    if func.as_var().is_some_and(is_operator) {
        // Partial operator application; the operand is forced now
        let operand = eval(arg)?;
        return Ok(Expr::app(func, operand));
    }
    Ok(Expr::app(func, arg.clone()))
}

/// Capture-avoiding substitution of `value` for `name` in `body`.
fn substitute(body: &Expr, name: &str, value: &Expr) -> Expr {
    let free = value.free_vars();
    substitute_with(body, name, value, &free)
}

fn substitute_with(body: &Expr, name: &str, value: &Expr, free: &HashSet<String>) -> Expr {
    match body.kind() {
        ExprKind::Var(var) if var == name => value.clone(),
        ExprKind::Var(_) | ExprKind::Num(_) | ExprKind::Str(_) => body.clone(),
        ExprKind::App(func, arg) => Expr::app(
            substitute_with(func, name, value, free),
            substitute_with(arg, name, value, free),
        ),
        // Shadowed
        ExprKind::Abs(param, _) if param == name => body.clone(),
        ExprKind::Abs(param, inner) if free.contains(param) && inner.free_vars().contains(name) => {
            let fresh = fresh_name(param, free, inner);
            let renamed = substitute(inner, param, &Expr::var(fresh.as_str()));
            Expr::abs(fresh, substitute_with(&renamed, name, value, free))
        }
        ExprKind::Abs(param, inner) => {
            Expr::abs(param.as_str(), substitute_with(inner, name, value, free))
        }
        ExprKind::Define(..) => body.clone(),
    }
}

/// Primes `param` until it clashes with nothing in scope.
fn fresh_name(param: &str, free: &HashSet<String>, body: &Expr) -> String {
    let used = body.free_vars();
    let mut candidate = format!("{}'", param);
    while free.contains(&candidate) || used.contains(&candidate) {
        candidate.push('\'');
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use skiff_syntax::parse_statement;

    fn run(source: &str) -> Result<Expr, ExecutionError> {
        LambdaEvaluator::new().evaluate(&parse_statement(source).unwrap())
    }

    #[test]
    fn test_identity() {
        assert_eq!(run("(\\x.x) 5").unwrap(), Expr::num(5));
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(run("+ 2 3").unwrap(), Expr::num(5));
        assert_eq!(run("(\\x.+ x 3) 2").unwrap(), Expr::num(5));
        assert_eq!(run("length \"abc\"").unwrap(), Expr::num(3));
    }

    #[test]
    fn test_conditionals() {
        assert_eq!(run("if (= 2 2) 10 20").unwrap(), Expr::num(10));
        assert_eq!(run("if (= 2 3) 10 20").unwrap(), Expr::num(20));
    }

    #[test]
    fn test_comparison_yields_church_boolean() {
        assert_eq!(run("< 1 2").unwrap().church_boolean(), Some(true));
        assert_eq!(run("= 1 \"1\"").unwrap().church_boolean(), Some(false));
    }

    #[test]
    fn test_laziness() {
        assert_eq!(run("(\\x.\\y.x) 1 (/ 1 0)").unwrap(), Expr::num(1));
        assert_eq!(run("true 1 (/ 1 0)").unwrap(), Expr::num(1));
        assert_eq!(run("false (/ 1 0) 2").unwrap(), Expr::num(2));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            run("/ 1 0"),
            Err(ExecutionError::Eval(EvalError::ArithmeticFault { .. }))
        ));
        assert!(matches!(
            run("< \"a\" 1"),
            Err(ExecutionError::Eval(EvalError::TypeMismatch { .. }))
        ));
    }

    #[test]
    fn test_free_variable_head_is_lazy() {
        assert_eq!(run("f (/ 1 0)").unwrap().to_string(), "f (/ 1 0)");
    }

    #[test]
    fn test_substitution_avoids_capture() {
        // (λx.λy.x) y must not become λy.y
        let result = run("(\\x.\\y.x) y").unwrap();
        assert_eq!(result, Expr::abs("y'", Expr::var("y")));
        assert_eq!(
            LambdaEvaluator::new()
                .evaluate(&Expr::app(result, Expr::num(1)))
                .unwrap(),
            Expr::var("y")
        );
    }

    #[test]
    fn test_shadowing() {
        assert_eq!(run("(\\x.\\x.x) 1 2").unwrap(), Expr::num(2));
    }

    #[test]
    fn test_y_recursion() {
        let source = "\
let Y = \\f.(\\x.f (x x)) (\\x.f (x x)) in
let sum = Y (\\self.\\n.if (= n 0) 0 (+ n (self (- n 1)))) in
sum 3";
        assert_eq!(run(source).unwrap(), Expr::num(6));
    }

    #[test]
    fn test_define_is_rejected() {
        let expr = Expr::app(Expr::var("f"), Expr::define("x", Expr::num(1)));
        assert!(matches!(
            LambdaEvaluator::new().evaluate(&expr),
            Err(ExecutionError::Validation(_))
        ));
    }
}
