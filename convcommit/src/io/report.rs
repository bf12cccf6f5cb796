//! User-facing reporting for `cz` commands.
//!
//! Everything the user is meant to read goes through a [`Reporter`]; tracing
//! output is for diagnostics only.

use colored::Colorize;

pub trait Reporter {
    /// A completed action (stdout, green).
    fn success(&self, text: &str);
    /// An expected failure the user should act on (stderr, red).
    fn error(&self, text: &str);
    /// Something worth highlighting, such as the composed message (stdout).
    fn info(&self, text: &str);
    /// Plain passthrough output, such as git's own stdout.
    fn write(&self, text: &str);
    /// Plain passthrough diagnostics, such as hook output git sent to stderr.
    fn write_err(&self, text: &str);
}

/// Reporter that prints to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn success(&self, text: &str) {
        println!("{}", text.green());
    }

    fn error(&self, text: &str) {
        eprintln!("{}", text.red());
    }

    fn info(&self, text: &str) {
        println!("{}", text.yellow());
    }

    fn write(&self, text: &str) {
        if !text.trim().is_empty() {
            println!("{}", text.trim_end());
        }
    }

    fn write_err(&self, text: &str) {
        if !text.trim().is_empty() {
            eprintln!("{}", text.trim_end());
        }
    }
}
