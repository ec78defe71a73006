use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
    diagnostics::Result,
    evaluator::evaluate,
    report::Reporter,
};

/// Interactive read-evaluate-print loop, one expression per line.
pub struct Repl {
    reporter: Reporter,
}

impl Repl {
    pub fn new(reporter: Reporter) -> Self {
        Self { reporter }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new()?;
        println!("{}", self.reporter.banner());
        loop {
            println!("{}", self.reporter.usage());
            match editor.readline(self.reporter.prompt()) {
                Ok(line) => {
                    let line = strip_line_terminator(&line);
                    if is_quit(line) {
                        break;
                    }
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line).ok();
                    }
                    println!("{}", self.eval_line(line));
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err.into()),
            }
        }
        println!("{}", self.reporter.farewell());
        Ok(())
    }

    /// Evaluates one line and returns the rendered outcome.
    pub fn eval_line(&self, line: &str) -> String {
        match render_line(&self.reporter, line) {
            Ok(rendered) | Err(rendered) => rendered,
        }
    }
}

/// Evaluates `line` and renders it: `Ok` holds the result text, `Err` the
/// caret diagnostic. Callers pick the stream.
pub fn render_line(reporter: &Reporter, line: &str) -> std::result::Result<String, String> {
    match evaluate(line) {
        Ok(value) => Ok(reporter.render_value(value)),
        Err(err) => {
            tracing::debug!(kind = ?err.kind, position = err.position, "expression rejected");
            Err(reporter.render_error(line, &err))
        }
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new(Reporter::default())
    }
}

pub fn is_quit(line: &str) -> bool {
    line == "q" || line == "Q"
}

/// Removes a trailing `\n` or `\r\n`; every other character is kept.
pub fn strip_line_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
