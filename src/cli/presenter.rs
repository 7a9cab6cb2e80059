//! CLI presenter for output formatting

use colored::*;

/// Presenter for CLI output formatting.
///
/// Verbosity is carried here explicitly instead of in a process-wide flag;
/// every command handler receives the presenter it should talk through.
pub struct Presenter {
    verbose: bool,
}

impl Presenter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Print a debug line when verbosity is enabled
    pub fn debug(&self, message: &str) {
        if self.verbose {
            eprintln!("{} {}", "·".dimmed(), message.dimmed());
        }
    }

    /// Output text to stdout (machine-readable command output)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for status and config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new(false)
    }
}
