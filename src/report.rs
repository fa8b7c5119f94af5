//! Reporting sink for findings and progress.
//!
//! Components never log through global state; they receive a `&mut dyn Reporter`
//! from the caller. [`TracingReporter`] forwards to `tracing`, [`RecordingReporter`]
//! keeps every message for later inspection.

use std::fmt;

/// Message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Unadorned user-facing text (entry listings, search URLs)
    Print,
    Info,
    Warning,
    Error,
    /// Unrecoverable for the paper but the run continues
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Print => "PRINT",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        };
        f.write_str(name)
    }
}

/// A sink for messages of each severity.
pub trait Reporter {
    fn report(&mut self, severity: Severity, message: &str);

    fn info(&mut self, message: &str) {
        self.report(Severity::Info, message);
    }

    fn warning(&mut self, message: &str) {
        self.report(Severity::Warning, message);
    }

    fn error(&mut self, message: &str) {
        self.report(Severity::Error, message);
    }

    fn critical(&mut self, message: &str) {
        self.report(Severity::Critical, message);
    }

    fn print(&mut self, message: &str) {
        self.report(Severity::Print, message);
    }
}

/// Forwards severities to `tracing` events and prints unadorned text to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl TracingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for TracingReporter {
    fn report(&mut self, severity: Severity, message: &str) {
        match severity {
            Severity::Print => println!("{}", message),
            Severity::Info => tracing::info!("{}", message),
            Severity::Warning => tracing::warn!("{}", message),
            Severity::Error => tracing::error!("{}", message),
            Severity::Critical => tracing::error!(critical = true, "{}", message),
        }
    }
}

/// Keeps every message in order.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    pub messages: Vec<(Severity, String)>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages of one severity, in order.
    pub fn with_severity(&self, severity: Severity) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    /// True if any message of `severity` contains `needle`.
    pub fn contains(&self, severity: Severity, needle: &str) -> bool {
        self.messages
            .iter()
            .any(|(s, message)| *s == severity && message.contains(needle))
    }
}

impl Reporter for RecordingReporter {
    fn report(&mut self, severity: Severity, message: &str) {
        self.messages.push((severity, message.to_string()));
    }
}
