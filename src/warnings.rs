//! Non-fatal warning channel.
//!
//! Configuration problems and unreachable issues must not abort a run.
//! They are collected here and mirrored to the `tracing` warn level so
//! they surface both in the run summary and in the host's log output.

/// Collects non-fatal warnings raised during a session.
#[derive(Debug, Default)]
pub struct WarningSink {
    entries: Vec<String>,
}

impl WarningSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a warning and mirrors it to the log.
    pub fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.entries.push(message);
    }

    /// All warnings recorded so far, in order.
    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Consumes the sink, returning the recorded warnings.
    #[must_use]
    pub fn into_entries(self) -> Vec<String> {
        self.entries
    }
}
