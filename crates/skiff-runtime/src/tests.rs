//! Tests for the cached evaluator and program evaluation.

use crate::{CachedEvaluator, EvalError, Evaluator, ExecutionError, LambdaEvaluator};
use skiff_ir::{Expr, Sk};
use skiff_syntax::SyntaxError;

fn program(source: &str) -> Result<Vec<String>, ExecutionError> {
    let mut evaluator = CachedEvaluator::new();
    let results = evaluator.evaluate_program(source, &mut Vec::new())?;
    Ok(results.iter().map(|value| value.to_string()).collect())
}

#[test]
fn test_evaluate() {
    let mut evaluator = CachedEvaluator::new();
    let expr = Expr::app(Expr::abs("x", Expr::var("x")), Expr::num(5));
    assert_eq!(evaluator.evaluate(&expr).unwrap(), Sk::num(5));
}

// Translations are cached per node instance, not per structure: a structurally
// equal tree built again is a separate entry. This is the intended semantics,
// not a missed optimization; do not switch the cache to structural keys.
#[test]
fn test_cache_is_keyed_on_node_identity() {
    let mut evaluator = CachedEvaluator::new();
    let build = || Expr::app(Expr::abs("x", Expr::var("x")), Expr::num(5));

    let expr = build();
    evaluator.evaluate(&expr).unwrap();
    evaluator.evaluate(&expr).unwrap();
    assert_eq!(evaluator.cache_size(), 1);

    let mut evaluator = CachedEvaluator::new();
    let (first, second) = (build(), build());
    assert_eq!(first, second);
    evaluator.evaluate(&first).unwrap();
    evaluator.evaluate(&second).unwrap();
    assert_eq!(evaluator.cache_size(), 2);
}

#[test]
fn test_clone_is_a_new_cache_key() {
    let mut evaluator = CachedEvaluator::new();
    let expr = Expr::abs("x", Expr::var("x"));
    evaluator.evaluate(&expr).unwrap();
    evaluator.evaluate(&expr.clone()).unwrap();
    assert_eq!(evaluator.cache_size(), 2);
}

#[test]
fn test_reduction_reruns_on_cache_hit() {
    let mut evaluator = CachedEvaluator::new();
    let expr = Expr::app(Expr::app(Expr::var("/"), Expr::num(1)), Expr::num(0));
    for _ in 0..2 {
        assert!(matches!(
            evaluator.evaluate(&expr),
            Err(ExecutionError::Eval(EvalError::ArithmeticFault { .. }))
        ));
    }
    assert_eq!(evaluator.cache_size(), 1);
}

#[test]
fn test_clear_cache() {
    let mut evaluator = CachedEvaluator::new();
    let expr = Expr::num(1);
    evaluator.evaluate(&expr).unwrap();
    assert_eq!(evaluator.cache_size(), 1);
    evaluator.clear_cache();
    assert_eq!(evaluator.cache_size(), 0);
    evaluator.evaluate(&expr).unwrap();
    assert_eq!(evaluator.cache_size(), 1);
}

#[test]
fn test_failed_translation_is_not_cached() {
    let mut evaluator = CachedEvaluator::new();
    let expr = Expr::define("x", Expr::num(1));
    assert!(matches!(
        evaluator.evaluate(&expr),
        Err(ExecutionError::Translate(_))
    ));
    assert_eq!(evaluator.cache_size(), 0);
}

#[test]
fn test_program_results_skip_defines() {
    let source = "\
define a = 1
+ a 1
define b = + a 10
* b 2
";
    assert_eq!(program(source).unwrap(), ["2", "22"]);
}

#[test]
fn test_program_accumulates_defines() {
    let mut evaluator = CachedEvaluator::new();
    let mut defines = Vec::new();
    evaluator
        .evaluate_program("define double = \\x.* x 2", &mut defines)
        .unwrap();
    assert_eq!(defines.len(), 1);
    assert_eq!(defines[0].0, "double");

    let results = evaluator.evaluate_program("double 21", &mut defines).unwrap();
    assert_eq!(results, [Sk::num(42)]);
}

#[test]
fn test_later_defines_shadow_earlier() {
    let source = "define x = 1\ndefine x = 2\nx";
    assert_eq!(program(source).unwrap(), ["2"]);
}

#[test]
fn test_multiline_statements() {
    let source = "\
# a list spread over lines
map (\\x.+ x 1)
  {1 2 3}
";
    // The first line is complete on its own, so this is two statements
    let results = program(source).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[1], "{1 2 3}");

    let source = "\
map (\\x.+ x 1) {1
  2
  3}
";
    assert_eq!(program(source).unwrap(), ["{2 3 4}"]);
}

#[test]
fn test_program_stops_at_first_error() {
    let mut evaluator = CachedEvaluator::new();
    let mut defines = Vec::new();
    let result = evaluator.evaluate_program("define a = 1\n(+ a\nb", &mut defines);
    assert!(matches!(
        result,
        Err(ExecutionError::Syntax(SyntaxError::UnexpectedToken { .. }))
    ));
    assert_eq!(defines.len(), 1);
}

#[test]
fn test_error_leaves_evaluator_usable() {
    let mut evaluator = CachedEvaluator::new();
    let mut defines = Vec::new();
    assert!(evaluator.evaluate_program("/ 1 0", &mut defines).is_err());
    let results = evaluator.evaluate_program("+ 1 2", &mut defines).unwrap();
    assert_eq!(results, [Sk::num(3)]);
    assert_eq!(evaluator.cache_size(), 2);
}

#[test]
fn test_direct_program() {
    let mut evaluator = LambdaEvaluator::new();
    let results = evaluator
        .evaluate_program("define inc = + 1\ninc 41\n= 1 1", &mut Vec::new())
        .unwrap();
    assert_eq!(results[0], Expr::num(42));
    assert_eq!(LambdaEvaluator::render(&results[1], true), "true");
}

#[test]
fn test_values_serialize_without_node_identity() {
    let expr = Expr::app(Expr::abs("x", Expr::abs("y", Expr::var("x"))), Expr::num(1));

    let lc = LambdaEvaluator::new().evaluate(&expr).unwrap();
    assert_eq!(
        serde_json::to_value(&lc).unwrap(),
        serde_json::json!({"Abs": ["y", {"Num": 1}]})
    );

    let sk = CachedEvaluator::new().evaluate(&expr).unwrap();
    assert_eq!(
        serde_json::to_value(&sk).unwrap(),
        serde_json::json!({"App": ["K", {"Num": 1}]})
    );
}
