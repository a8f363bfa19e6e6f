//! Diagnostic event sink for logging and telemetry collaborators.
//!
//! Core components never log directly; they emit tagged events through a
//! [`DiagnosticSink`]. The default sink routes events to `tracing`, and a
//! recording sink is provided so tests can assert on emitted events (for
//! example the store's corruption-fallback warning).

use std::sync::Mutex;

/// Severity of a diagnostic event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Something degraded but recovered.
    Warning,
    /// Something failed.
    Error,
}

/// A single emitted diagnostic event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    /// Severity of the event.
    pub severity: Severity,
    /// Short machine-readable event tag (e.g. `task_store_corruption`).
    pub event: String,
    /// Human-readable message.
    pub message: String,
}

/// Trait for receiving diagnostic events.
///
/// Implementations must be cheap and must never fail; emitting a diagnostic
/// can never break the operation that produced it.
pub trait DiagnosticSink: Send + Sync {
    /// Emit one event.
    fn emit(&self, severity: Severity, event: &str, message: &str);

    /// Emit an info event.
    fn info(&self, event: &str, message: &str) {
        self.emit(Severity::Info, event, message);
    }

    /// Emit a warning event.
    fn warning(&self, event: &str, message: &str) {
        self.emit(Severity::Warning, event, message);
    }

    /// Emit an error event.
    fn error(&self, event: &str, message: &str) {
        self.emit(Severity::Error, event, message);
    }
}

/// Sink that forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, severity: Severity, event: &str, message: &str) {
        match severity {
            Severity::Info => tracing::info!(event, "{message}"),
            Severity::Warning => tracing::warn!(event, "{message}"),
            Severity::Error => tracing::error!(event, "{message}"),
        }
    }
}

/// Sink that records events in memory.
///
/// Primarily for tests asserting on the events a component emitted.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingSink {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a copy of all recorded events.
    ///
    /// # Panics
    ///
    /// Panics if a previous holder of the internal lock panicked.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Check whether any event with the given tag was recorded.
    #[must_use]
    pub fn has_event(&self, event: &str) -> bool {
        self.events().iter().any(|e| e.event == event)
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, severity: Severity, event: &str, message: &str) {
        // If the lock is poisoned, drop the event rather than propagate.
        if let Ok(mut events) = self.events.lock() {
            events.push(DiagnosticEvent {
                severity,
                event: event.to_string(),
                message: message.to_string(),
            });
        }
    }
}
