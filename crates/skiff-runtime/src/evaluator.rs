//! Evaluation strategies and multi-statement programs.

use crate::ExecutionError;
use crate::reduce::reduce_shared;
use crate::render::render;
use crate::translate::translate;
use serde::Serialize;
use skiff_ir::builders::bind_all;
use skiff_ir::{Expr, ExprId, ExprKind, Sk, validate_statement};
use skiff_syntax::{parse_statement, split_statements};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// An evaluation strategy for lambda calculus expressions.
pub trait Evaluator {
    /// The normal form an expression evaluates to.
    type Value: fmt::Display + Serialize;

    /// Evaluate a single expression.
    fn evaluate(&mut self, expr: &Expr) -> Result<Self::Value, ExecutionError>;

    /// Render a value for display, optionally showing Church booleans as
    /// `true` and `false`.
    fn render(value: &Self::Value, church_booleans: bool) -> String;

    /// Evaluate every statement of `source` in order.
    ///
    /// `define name = value` statements are appended to `defines` and
    /// produce no result. Every other statement is evaluated inside all
    /// definitions accumulated so far, the first definition outermost, so
    /// `define a = 1` followed by `+ a 1` evaluates `(λa.+ a 1) 1`.
    ///
    /// Stops at the first failing statement. Definitions made before the
    /// failure stay in `defines`.
    fn evaluate_program(
        &mut self,
        source: &str,
        defines: &mut Vec<(String, Expr)>,
    ) -> Result<Vec<Self::Value>, ExecutionError> {
        let mut results = Vec::new();

        for (index, text) in split_statements(source).iter().enumerate() {
            let statement = parse_statement(text)?;
            validate_statement(&statement)?;

            if statement.is_define() {
                if let ExprKind::Define(name, value) = statement.into_kind() {
                    debug!(statement = index, %name, "define");
                    defines.push((name, *value));
                }
                continue;
            }

            debug!(statement = index, defines = defines.len(), "evaluating statement");
            let expr = bind_all(
                defines.iter().map(|(name, value)| (name.as_str(), value)),
                statement,
            );
            results.push(self.evaluate(&expr)?);
        }

        Ok(results)
    }
}

/// Evaluates by SK translation and reduction, memoizing translations.
///
/// The cache is keyed on node identity ([`Expr::id`]), not structure: the
/// same node instance is translated at most once, while a structurally equal
/// tree built separately gets its own entry. Reduction always runs.
#[derive(Debug, Default)]
pub struct CachedEvaluator {
    cache: HashMap<ExprId, Rc<Sk>>,
}

impl CachedEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached translations.
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached translation.
    pub fn clear_cache(&mut self) {
        debug!(entries = self.cache.len(), "clearing translation cache");
        self.cache.clear();
    }

    fn translation(&mut self, expr: &Expr) -> Result<Rc<Sk>, ExecutionError> {
        let id = expr.id();
        if let Some(sk) = self.cache.get(&id) {
            debug!(?id, "translation cache hit");
            return Ok(sk.clone());
        }
        debug!(?id, "translation cache miss");
        let sk = Rc::new(translate(expr)?);
        self.cache.insert(id, sk.clone());
        Ok(sk)
    }
}

impl Evaluator for CachedEvaluator {
    type Value = Sk;

    fn evaluate(&mut self, expr: &Expr) -> Result<Sk, ExecutionError> {
        let sk = self.translation(expr)?;
        let value = reduce_shared(&sk)?;
        Ok(Rc::unwrap_or_clone(value))
    }

    fn render(value: &Sk, church_booleans: bool) -> String {
        render(value, church_booleans)
    }
}
