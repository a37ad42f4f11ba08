//! Diagnostic sink.
//!
//! Collects diagnostics in emission order and tracks error/warning counts.
//! Passes share one sink; whether a pass emits its non-fatal warnings at
//! all is the pass's own decision, not the sink's.

use crate::{Diagnostic, Severity};

/// Ordered collection of emitted diagnostics.
#[derive(Default, Debug)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
    error_count: usize,
    warning_count: usize,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of errors emitted so far.
    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// Number of warnings emitted so far.
    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    /// Whether any error has been emitted.
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// The diagnostics emitted so far, in order.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Drain all diagnostics, resetting the counts.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        self.error_count = 0;
        self.warning_count = 0;
        std::mem::take(&mut self.diagnostics)
    }
}
