use std::fmt;

use chrono::{DateTime, Utc};

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// One timestamped diagnostic event.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.severity,
            self.message
        )
    }
}

/// The compiler's diagnostic trail.
///
/// A write-only sink during compilation: the compiler records events and
/// never reads them back. Compilation continues past warnings and errors;
/// callers inspect the trail through [`CompileResult`] afterwards.
///
/// [`CompileResult`]: crate::CompileResult
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    events: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn record(&mut self, severity: Severity, message: impl Into<String>) {
        self.events.push(Diagnostic {
            severity,
            timestamp: Utc::now(),
            message: message.into(),
        });
    }

    /// Record a debug event.
    pub fn debug(&mut self, message: impl Into<String>) {
        self.record(Severity::Debug, message);
    }

    /// Record an informational event.
    pub fn info(&mut self, message: impl Into<String>) {
        self.record(Severity::Info, message);
    }

    /// Record a warning.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.record(Severity::Warning, message);
    }

    /// Record an error.
    pub fn error(&mut self, message: impl Into<String>) {
        self.record(Severity::Error, message);
    }

    /// Iterate over recorded events in order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    /// Number of events at a given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.events
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }

    /// Whether any error was recorded.
    pub fn has_errors(&self) -> bool {
        self.events.iter().any(|d| d.severity == Severity::Error)
    }

    /// Total number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// All messages at a given severity, in order. Test convenience.
    pub fn messages(&self, severity: Severity) -> Vec<&str> {
        self.events
            .iter()
            .filter(|d| d.severity == severity)
            .map(|d| d.message.as_str())
            .collect()
    }
}
