//! Splitting program text into statements.

/// Tracks bracket and brace nesting across lines.
///
/// Brackets inside string literals and after a `#` comment marker are not
/// counted. A string left open at the end of a line stays open on the next.
#[derive(Debug, Default, Clone)]
pub struct Nesting {
    depth: i64,
    in_string: bool,
    escaped: bool,
}

impl Nesting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one line of input.
    pub fn feed(&mut self, line: &str) {
        for c in line.chars() {
            if self.in_string {
                match c {
                    _ if self.escaped => self.escaped = false,
                    '\\' => self.escaped = true,
                    '"' => self.in_string = false,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' => self.in_string = true,
                '#' => break,
                '(' | '{' => self.depth += 1,
                ')' | '}' => self.depth -= 1,
                _ => {}
            }
        }
    }

    /// Current nesting depth. Negative when there are more closers than openers.
    pub fn depth(&self) -> i64 {
        self.depth
    }

    /// True while a bracket, brace or string is still open.
    pub fn is_open(&self) -> bool {
        self.depth > 0 || self.in_string
    }
}

/// Split `source` into statement texts.
///
/// Blank lines and `#` comment lines between statements are skipped. Any other
/// line starts (or continues) a statement, which ends at the first line where
/// the nesting depth is back at zero or below. An unterminated final statement
/// is still returned so the parser can report what is wrong with it.
pub fn split_statements(source: &str) -> Vec<String> {
    let mut statements = Vec::new();
    let mut current = String::new();
    let mut nesting = Nesting::new();

    for line in source.lines() {
        let trimmed = line.trim();
        if current.is_empty() && (trimmed.is_empty() || trimmed.starts_with('#')) {
            continue;
        }

        if !current.is_empty() {
            current.push('\n');
        }
        current.push_str(line);
        nesting.feed(line);

        if !nesting.is_open() {
            statements.push(std::mem::take(&mut current).trim().to_string());
            nesting = Nesting::new();
        }
    }

    if !current.trim().is_empty() {
        statements.push(current.trim().to_string());
    }

    statements
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_statement_per_line() {
        assert_eq!(
            split_statements("define x = 1\n+ x 2\n"),
            vec!["define x = 1", "+ x 2"]
        );
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let source = "\n# heading\n  \n+ 1 2\n\n   # note\nx\n";
        assert_eq!(split_statements(source), vec!["+ 1 2", "x"]);
    }

    #[test]
    fn test_open_parens_continue_statement() {
        let source = "(\\x.\n  + x 1)\n  5\nfoo";
        assert_eq!(
            split_statements(source),
            vec!["(\\x.\n  + x 1)", "5", "foo"]
        );
    }

    #[test]
    fn test_comment_lines_inside_statement_are_kept() {
        let source = "{1\n# two\n2}";
        assert_eq!(split_statements(source), vec!["{1\n# two\n2}"]);
    }

    #[test]
    fn test_brackets_in_strings_and_comments_ignored() {
        let source = "\"(\" # (\nnext";
        assert_eq!(split_statements(source), vec!["\"(\" # (", "next"]);
    }

    #[test]
    fn test_unterminated_statement_is_kept() {
        assert_eq!(split_statements("x\n(+ 1\n2"), vec!["x", "(+ 1\n2"]);
    }

    #[test]
    fn test_extra_closer_ends_statement() {
        assert_eq!(split_statements("x)\ny"), vec!["x)", "y"]);
    }

    #[test]
    fn test_nesting_depth() {
        let mut nesting = Nesting::new();
        nesting.feed("(f {1 2");
        assert_eq!(nesting.depth(), 2);
        assert!(nesting.is_open());
        nesting.feed("3})");
        assert_eq!(nesting.depth(), 0);
        assert!(!nesting.is_open());
    }

    #[test]
    fn test_nesting_string_spans_lines() {
        let mut nesting = Nesting::new();
        nesting.feed("\"a \\\" (");
        assert!(nesting.is_open());
        assert_eq!(nesting.depth(), 0);
        nesting.feed("b\" )");
        assert_eq!(nesting.depth(), -1);
        assert!(!nesting.is_open());
    }
}
