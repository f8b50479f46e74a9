//! Timing comparison of the evaluation strategies.

use skiff_runtime::{CachedEvaluator, Evaluator, ExecutionError, LambdaEvaluator, reduce, translate};
use skiff_syntax::parse_statement;
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Named expressions timed by `skiff bench`.
pub const BENCHMARKS: &[(&str, &str)] = &[
    ("Identity function", "(\\x.x) 5"),
    ("K combinator", "(\\x.\\y.x) a b"),
    ("Simple arithmetic", "+ 2 3"),
    ("Lambda with arithmetic", "(\\x.+ x 3) 2"),
    ("Church true selection", "(\\t.\\f.t) a b"),
    ("Church false selection", "(\\t.\\f.f) a b"),
    ("If with comparison", "if (= 2 2) 10 20"),
    ("Nested lambda", "(\\x.\\y.+ x y) 2 3"),
    ("Complex expression", "(\\f.f 5 10) (\\x.\\y.* x y)"),
];

/// Total time spent on one benchmark by each strategy.
#[derive(Debug, Clone)]
pub struct Timing {
    pub name: &'static str,
    pub direct: Duration,
    pub uncached: Duration,
    pub cached: Duration,
}

/// Time every entry of [`BENCHMARKS`] `iterations` times per strategy.
///
/// Each strategy runs once untimed first, so the cached evaluator is measured
/// on cache hits.
pub fn run_benchmarks(iterations: u32) -> Result<Vec<Timing>, ExecutionError> {
    BENCHMARKS
        .iter()
        .map(|&(name, source)| -> Result<Timing, ExecutionError> {
            let expr = parse_statement(source)?;

            let mut direct = LambdaEvaluator::new();
            let mut cached = CachedEvaluator::new();

            Ok(Timing {
                name,
                direct: time(iterations, || direct.evaluate(&expr).map(drop))?,
                uncached: time(iterations, || {
                    let sk = translate(&expr)?;
                    reduce(&sk)?;
                    Ok(())
                })?,
                cached: time(iterations, || cached.evaluate(&expr).map(drop))?,
            })
        })
        .collect()
}

fn time(
    iterations: u32,
    mut run: impl FnMut() -> Result<(), ExecutionError>,
) -> Result<Duration, ExecutionError> {
    run()?;
    let start = Instant::now();
    for _ in 0..iterations {
        run()?;
    }
    Ok(start.elapsed())
}

fn per_run(total: Duration, iterations: u32) -> f64 {
    total.as_secs_f64() * 1e6 / f64::from(iterations.max(1))
}

/// Print per-expression and average timings in microseconds per run.
pub fn print_report(timings: &[Timing], iterations: u32, mut out: impl Write) -> io::Result<()> {
    writeln!(out, "{} iterations per expression (µs per run)", iterations)?;
    writeln!(
        out,
        "{:<26} {:>10} {:>10} {:>10}",
        "expression", "direct", "uncached", "cached"
    )?;

    let mut totals = [0.0f64; 3];
    for timing in timings {
        let row = [
            per_run(timing.direct, iterations),
            per_run(timing.uncached, iterations),
            per_run(timing.cached, iterations),
        ];
        for (total, value) in totals.iter_mut().zip(row) {
            *total += value;
        }
        writeln!(
            out,
            "{:<26} {:>10.3} {:>10.3} {:>10.3}",
            timing.name, row[0], row[1], row[2]
        )?;
    }

    if !timings.is_empty() {
        let count = timings.len() as f64;
        writeln!(
            out,
            "{:<26} {:>10.3} {:>10.3} {:>10.3}",
            "Average",
            totals[0] / count,
            totals[1] / count,
            totals[2] / count
        )?;
        if totals[2] > 0.0 {
            writeln!(
                out,
                "cached SK vs uncached SK: {:.2}x",
                totals[1] / totals[2]
            )?;
        }
    }
    Ok(())
}
