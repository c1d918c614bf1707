//! Diagnostics sink shared by the decoder, resolver and ingestion passes
//!
//! Every recoverable problem (a malformed type name, an identifier that does
//! not resolve) is reported through a [`DiagnosticSink`] instead of being
//! returned as an error, so one bad entry never stops an ingestion pass.

use std::fmt;

/// Severity of a recorded diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single recorded diagnostic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Append-only warning/error log
///
/// Callers only ever append; the two counters are the read side used by
/// reporting code.
pub trait DiagnosticSink {
    /// Record a warning
    fn warn(&mut self, args: fmt::Arguments<'_>);

    /// Record an error
    fn error(&mut self, args: fmt::Arguments<'_>);

    /// Number of warnings recorded so far
    fn warning_count(&self) -> usize;

    /// Number of errors recorded so far
    fn error_count(&self) -> usize;
}

/// In-memory diagnostic log that mirrors every entry to `tracing`
#[derive(Debug, Default, Clone)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
    warnings: usize,
    errors: usize,
}

impl DiagnosticLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded diagnostics in emission order
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Recorded warnings only
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// Returns true if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn warn(&mut self, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        tracing::warn!(target: "metadoc::diagnostics", "{message}");
        self.warnings += 1;
        self.entries.push(Diagnostic {
            severity: Severity::Warning,
            message,
        });
    }

    fn error(&mut self, args: fmt::Arguments<'_>) {
        let message = args.to_string();
        tracing::error!(target: "metadoc::diagnostics", "{message}");
        self.errors += 1;
        self.entries.push(Diagnostic {
            severity: Severity::Error,
            message,
        });
    }

    fn warning_count(&self) -> usize {
        self.warnings
    }

    fn error_count(&self) -> usize {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_track_severity() {
        let mut log = DiagnosticLog::new();
        log.warn(format_args!("first {}", 1));
        log.warn(format_args!("second"));
        log.error(format_args!("broken"));

        assert_eq!(log.warning_count(), 2);
        assert_eq!(log.error_count(), 1);
        assert_eq!(log.entries().len(), 3);
        assert_eq!(log.entries()[0].message, "first 1");
        assert_eq!(log.warnings().count(), 2);
    }

    #[test]
    fn test_display_includes_severity() {
        let diag = Diagnostic {
            severity: Severity::Warning,
            message: "unresolved".to_string(),
        };
        assert_eq!(diag.to_string(), "warning: unresolved");
    }
}
