//! Interactive read-eval-print loop.

use skiff_ir::Expr;
use skiff_runtime::Evaluator;
use skiff_syntax::Nesting;
use std::io::{self, BufRead, Write};

pub const PROMPT: &str = "λ> ";
pub const CONTINUATION_PROMPT: &str = ".. ";

/// Read statements from `input` until end of input.
///
/// A line that leaves a bracket or brace open continues on the next line.
/// Errors are printed and the loop goes on with the evaluator and `defines`
/// left as they were.
pub fn run<E: Evaluator>(
    evaluator: &mut E,
    defines: &mut Vec<(String, Expr)>,
    church_booleans: bool,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    writeln!(output, "Skiff {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(output, "Enter expressions or `define name = value` (Ctrl-D to exit)")?;

    let mut lines = input.lines();
    loop {
        let mut buffer = String::new();
        let mut nesting = Nesting::new();
        let mut prompt = PROMPT;

        loop {
            write!(output, "{}", prompt)?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                return Ok(());
            };
            let line = line?;
            nesting.feed(&line);
            buffer.push_str(&line);
            buffer.push('\n');
            if !nesting.is_open() {
                break;
            }
            prompt = CONTINUATION_PROMPT;
        }

        if buffer.trim().is_empty() {
            continue;
        }

        let known = defines.len();
        match evaluator.evaluate_program(&buffer, defines) {
            Ok(results) => {
                for (name, _) in &defines[known..] {
                    writeln!(output, "defined {}", name)?;
                }
                for value in &results {
                    writeln!(output, "=> {}", E::render(value, church_booleans))?;
                }
            }
            Err(err) => writeln!(output, "Error: {}", err)?,
        }
    }
}
