//! Skiff CLI entry point.

mod bench;
mod config;
mod repl;

use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;

use clap::{Parser, Subcommand};
use config::{Config, ConfigError, Overrides, Strategy};
use serde_json::json;
use skiff_ir::{Expr, Sk, validate_statement};
use skiff_runtime::{
    CachedEvaluator, Evaluator, ExecutionError, LambdaEvaluator, prelude_definitions, translate,
};
use skiff_syntax::{parse_statement, split_statements};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "skiff")]
#[command(about = "Lambda calculus by SK combinator translation")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ./skiff.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Evaluation strategy
    #[arg(long, global = true, value_enum)]
    strategy: Option<Strategy>,

    /// Do not load the standard prelude
    #[arg(long, global = true)]
    no_prelude: bool,

    /// Print Church booleans as combinators instead of true/false
    #[arg(long, global = true)]
    plain_booleans: bool,

    /// Stack size of the evaluation thread in MiB
    #[arg(long, global = true)]
    stack_size_mb: Option<usize>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive REPL (default)
    Repl,

    /// Evaluate a program file
    Run {
        /// Input file (or - for stdin)
        file: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the SK translation of each expression in a file
    Translate {
        /// Input file (or - for stdin)
        file: String,

        /// Print translations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare evaluation strategies on a fixed set of expressions
    Bench {
        /// Runs per expression and strategy
        #[arg(short = 'n', long, default_value = "1000")]
        iterations: u32,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("invalid log filter: {0}")]
    Filter(#[from] tracing_subscriber::filter::ParseError),

    #[error("evaluation thread panicked")]
    WorkerPanicked,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    // Logs go to stderr so results on stdout stay machine-readable
    let directive = if cli.verbose { "skiff=debug" } else { "skiff=warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let config = Config::load(cli.config.as_deref())?.with_overrides(Overrides {
        strategy: cli.strategy,
        prelude: cli.no_prelude.then_some(false),
        church_booleans: cli.plain_booleans.then_some(false),
        stack_size_mb: cli.stack_size_mb,
    })?;
    debug!(?config, "configuration");

    let command = cli.command.unwrap_or(Commands::Repl);

    // Reduction recurses natively; a deep enough program aborts the process
    // when this thread's stack runs out.
    let worker = thread::Builder::new()
        .name("skiff-eval".into())
        .stack_size(config.stack_size())
        .spawn(move || execute(command, &config))?;
    worker.join().map_err(|_| CliError::WorkerPanicked)?
}

fn execute(command: Commands, config: &Config) -> Result<(), CliError> {
    match command {
        Commands::Repl => {
            info!(strategy = ?config.strategy, "starting REPL");
            let stdin = io::stdin().lock();
            let stdout = io::stdout();
            let mut defines = initial_defines(config)?;
            match config.strategy {
                Strategy::Sk => repl::run(
                    &mut CachedEvaluator::new(),
                    &mut defines,
                    config.church_booleans,
                    stdin,
                    stdout,
                )?,
                Strategy::Lc => repl::run(
                    &mut LambdaEvaluator::new(),
                    &mut defines,
                    config.church_booleans,
                    stdin,
                    stdout,
                )?,
            }
        }

        Commands::Run { file, json } => {
            let source = read_source(&file)?;
            match config.strategy {
                Strategy::Sk => print_results(&mut CachedEvaluator::new(), &source, config, json)?,
                Strategy::Lc => print_results(&mut LambdaEvaluator::new(), &source, config, json)?,
            }
        }

        Commands::Translate { file, json } => {
            let source = read_source(&file)?;
            let translations = translate_statements(&source)?;
            let mut out = io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &translations)?;
                writeln!(out)?;
            } else {
                for sk in &translations {
                    writeln!(out, "{}", sk)?;
                }
            }
        }

        Commands::Bench { iterations } => {
            let timings = bench::run_benchmarks(iterations)?;
            bench::print_report(&timings, iterations, io::stdout().lock())?;
        }
    }
    Ok(())
}

fn read_source(file: &str) -> Result<String, CliError> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).map_err(|source| CliError::Read {
            path: file.to_string(),
            source,
        })
    }
}

fn initial_defines(config: &Config) -> Result<Vec<(String, Expr)>, ExecutionError> {
    if config.prelude {
        prelude_definitions()
    } else {
        Ok(Vec::new())
    }
}

fn print_results<E: Evaluator>(
    evaluator: &mut E,
    source: &str,
    config: &Config,
    json: bool,
) -> Result<(), CliError> {
    let mut defines = initial_defines(config)?;
    let results = evaluator.evaluate_program(source, &mut defines)?;

    let mut out = io::stdout().lock();
    if json {
        let entries: Vec<_> = results
            .iter()
            .map(|value| {
                json!({
                    "display": E::render(value, config.church_booleans),
                    "value": value,
                })
            })
            .collect();
        serde_json::to_writer_pretty(&mut out, &entries)?;
        writeln!(out)?;
    } else {
        for value in &results {
            writeln!(out, "{}", E::render(value, config.church_booleans))?;
        }
    }
    Ok(())
}

/// Translate every non-define statement of `source` on its own, without
/// binding earlier definitions.
fn translate_statements(source: &str) -> Result<Vec<Sk>, ExecutionError> {
    let mut translations = Vec::new();
    for text in split_statements(source) {
        let statement = parse_statement(&text)?;
        validate_statement(&statement)?;
        if statement.is_define() {
            continue;
        }
        translations.push(translate(&statement)?);
    }
    Ok(translations)
}
