//! Status and diagnostic output for the map2tscn CLI.
//!
//! Status lines go to stderr as a right-aligned verb and a message, in the
//! style of Cargo. Validation diagnostics are rendered here too. Stdout is
//! left to `stats` and `completions`.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::validation::{Diagnostic, Severity, ValidationResult};

/// Width of the right-aligned verb column.
const VERB_WIDTH: usize = 12;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy)]
enum Paint {
    Green,
    Cyan,
    Yellow,
    Red,
    Dim,
}

impl Paint {
    fn code(self) -> &'static str {
        match self {
            Paint::Green => "\x1b[1;32m",
            Paint::Cyan => "\x1b[1;36m",
            Paint::Yellow => "\x1b[1;33m",
            Paint::Red => "\x1b[1;31m",
            Paint::Dim => "\x1b[2m",
        }
    }
}

/// Terminal-aware printer for status lines and diagnostics.
///
/// Colour is on when stderr is a terminal.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_color(io::stderr().is_terminal())
    }

    pub fn with_color(color: bool) -> Self {
        Self { color }
    }

    /// Progress or completion, e.g. "  Converting maps/arena.map".
    pub fn status(&self, verb: &str, message: &str) {
        self.emit(&self.line(Paint::Green, verb, message));
    }

    /// Result details such as written paths and totals.
    pub fn info(&self, verb: &str, message: &str) {
        self.emit(&self.line(Paint::Cyan, verb, message));
    }

    /// A failed input that does not stop the command.
    pub fn error(&self, verb: &str, message: &str) {
        self.emit(&self.line(Paint::Red, verb, message));
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(Paint::Dim, text)
    }

    /// Print every diagnostic in `result`.
    pub fn diagnostics(&self, result: &ValidationResult) {
        for diagnostic in result.iter() {
            self.emit(&self.format_diagnostic(diagnostic));
        }
    }

    /// `  warning[code]: message (line N)`, with the help text on a second line.
    pub fn format_diagnostic(&self, d: &Diagnostic) -> String {
        let paint = match d.severity {
            Severity::Error => Paint::Red,
            Severity::Warning => Paint::Yellow,
        };

        let mut out = format!(
            "  {}[{}]: {}",
            self.paint(paint, &d.severity.to_string()),
            d.code,
            d.message
        );
        if let Some(location) = d.location {
            let _ = write!(out, " (line {})", location.line);
        }
        if let Some(help) = &d.help {
            let _ = write!(out, "\n    {}", self.dim(&format!("help: {}", help)));
        }
        out
    }

    fn line(&self, paint: Paint, verb: &str, message: &str) -> String {
        let verb = format!("{:>width$}", verb, width = VERB_WIDTH);
        format!("{} {}", self.paint(paint, &verb), message)
    }

    fn paint(&self, paint: Paint, text: &str) -> String {
        if self.color {
            format!("{}{}{}", paint.code(), text, RESET)
        } else {
            text.to_string()
        }
    }

    fn emit(&self, line: &str) {
        let _ = writeln!(io::stderr().lock(), "{}", line);
    }
}

/// `count(3, "brush")` is "3 brushes"; `count(1, "vertex")` is "1 vertex".
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        return format!("1 {}", noun);
    }

    let plural = match noun {
        "vertex" => "vertices".to_string(),
        _ if noun.ends_with("sh") || noun.ends_with('s') => format!("{}es", noun),
        _ => format!("{}s", noun),
    };
    format!("{} {}", n, plural)
}

/// `path` relative to the working directory when it lies beneath it.
pub fn display_path(path: &Path) -> String {
    let relative = std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf));

    match relative {
        Some(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Some(rel) => rel.display().to_string(),
        None => path.display().to_string(),
    }
}
