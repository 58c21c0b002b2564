//! JSON-lines logger
//!
//! A line is `{"event":..,"severity":..,<fields sorted by key>}`. Lines
//! are written whole and unbuffered. WARN and ERROR go to stderr so an
//! installer capturing stdout still surfaces skipped roots.

use std::io::{self, Write};

/// Log severity, lowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-path detail during installation
    Trace,
    Info,
    /// A definition root was skipped or the run aborted
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    fn to_stderr(self) -> bool {
        self >= Severity::Warn
    }
}

/// Writes hook log lines to the process streams
pub struct Logger;

impl Logger {
    /// Write one line for `event`
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields);
        // Logging never fails an installation
        let _ = if severity.to_stderr() {
            io::stderr().lock().write_all(line.as_bytes())
        } else {
            io::stdout().lock().write_all(line.as_bytes())
        };
    }

    /// The line `log` would write, newline included
    pub(crate) fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut fields: Vec<&(&str, &str)> = fields.iter().collect();
        fields.sort_by_key(|(key, _)| *key);

        let mut line = format!(
            "{{\"event\":{},\"severity\":\"{}\"",
            quote(event),
            severity.as_str()
        );
        for (key, value) in fields {
            line.push(',');
            line.push_str(&quote(key));
            line.push(':');
            line.push_str(&quote(value));
        }
        line.push_str("}\n");
        line
    }
}

fn quote(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}
