//! Non-fatal diagnostics channel for the fallback copy path.
//!
//! The surrounding file-transfer module owns the sink; the resolver only
//! emits into it and never fails because of it.

use std::sync::{Mutex, PoisonError};

/// Receiver for human-readable warnings about degraded resolutions.
pub trait WarningSink {
    fn emit_warning(&self, message: &str);
}

/// Sink that routes warnings into the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogWarningSink;

impl WarningSink for LogWarningSink {
    fn emit_warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Sink that keeps warnings in memory, for embedders that forward them to
/// their own event channel (and for tests).
#[derive(Debug, Default)]
pub struct CollectedWarnings {
    messages: Mutex<Vec<String>>,
}

impl CollectedWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all collected warnings, leaving the sink empty.
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.lock())
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl WarningSink for CollectedWarnings {
    fn emit_warning(&self, message: &str) {
        self.lock().push(message.to_string());
    }
}
