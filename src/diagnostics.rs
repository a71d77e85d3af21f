//! Operator-facing diagnostic channel
//!
//! Fire-and-forget: reporting never fails and never returns anything the
//! caller acts on.

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

/// Receives `(context, error)` pairs from contained failures
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, context: &str, error: &dyn Display);
}

/// Forwards diagnostics to the tracing subscriber
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, context: &str, error: &dyn Display) {
        tracing::error!(context, error = %error, "Contained failure");
    }
}

/// A single recorded diagnostic
#[derive(Clone, Debug)]
pub struct DiagnosticEntry {
    pub context: String,
    pub message: String,
    pub at: DateTime<Utc>,
}

/// Keeps every reported entry in memory (also logs it)
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    entries: Arc<Mutex<Vec<DiagnosticEntry>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<DiagnosticEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, context: &str, error: &dyn Display) {
        tracing::warn!(context, error = %error, "Recorded diagnostic");
        self.entries.lock().push(DiagnosticEntry {
            context: context.to_string(),
            message: error.to_string(),
            at: Utc::now(),
        });
    }
}
