//! Display of evaluation results.

use skiff_ir::{Expr, Sk};

/// Render an SK value, optionally showing `K` and `K I` as `true` and `false`.
pub fn render(value: &Sk, church_booleans: bool) -> String {
    match value.church_boolean() {
        Some(boolean) if church_booleans => boolean.to_string(),
        _ => value.to_string(),
    }
}

/// Render a lambda calculus value, optionally showing the Church booleans
/// `λa.λb.a` and `λa.λb.b` as `true` and `false`.
pub fn render_expr(value: &Expr, church_booleans: bool) -> String {
    match value.church_boolean() {
        Some(boolean) if church_booleans => boolean.to_string(),
        _ => value.to_string(),
    }
}
