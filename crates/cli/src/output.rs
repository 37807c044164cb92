//! User-facing output.
//!
//! Commands report progress through [`OutputSink`] so the same code can print
//! styled text, machine-readable JSON lines, or nothing at all.

use console::style;
use serde::Serialize;

pub trait OutputSink {
    fn info(&self, message: &str);
    fn success(&self, message: &str);
    fn warning(&self, message: &str);
    fn error(&self, message: &str);
    fn heading(&self, message: &str);
}

/// Styled terminal output
#[derive(Debug, Clone, Default)]
pub struct ConsoleOutput {
    quiet: bool,
}

impl ConsoleOutput {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl OutputSink for ConsoleOutput {
    fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", style(message).cyan());
        }
    }

    fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green().bold(), style(message).green());
        }
    }

    fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("!").yellow().bold(), style(message).yellow());
        }
    }

    fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red().bold(), style(message).red());
    }

    fn heading(&self, message: &str) {
        if !self.quiet {
            println!();
            println!("{}", style(message).bold());
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonLine<'a> {
    level: &'a str,
    message: &'a str,
}

/// One JSON object per line on stdout
#[derive(Debug, Clone, Default)]
pub struct JsonOutput {
    quiet: bool,
}

impl JsonOutput {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn format_line(level: &str, message: &str) -> String {
        serde_json::to_string(&JsonLine { level, message }).unwrap_or_else(|_| {
            format!("{{\"level\":\"{}\",\"message\":\"\"}}", level)
        })
    }

    fn emit(&self, level: &str, message: &str) {
        if !self.quiet || level == "error" {
            println!("{}", Self::format_line(level, message));
        }
    }
}

impl OutputSink for JsonOutput {
    fn info(&self, message: &str) {
        self.emit("info", message);
    }

    fn success(&self, message: &str) {
        self.emit("success", message);
    }

    fn warning(&self, message: &str) {
        self.emit("warning", message);
    }

    fn error(&self, message: &str) {
        self.emit("error", message);
    }

    fn heading(&self, message: &str) {
        self.emit("heading", message);
    }
}

/// Pick the sink matching the global flags
pub fn sink(json: bool, quiet: bool) -> Box<dyn OutputSink> {
    if json {
        Box::new(JsonOutput::new(quiet))
    } else {
        Box::new(ConsoleOutput::new(quiet))
    }
}
