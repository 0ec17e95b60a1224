//! Task listeners
//!
//! Per-evaluation log sinks handed to strategies through the build context, so that
//! what a strategy reports ends up wherever the caller wants it (the scan log, a test
//! buffer, the CLI's `--explain` output).

use parking_lot::Mutex;

/// Sink for human-readable lines emitted while a strategy is evaluated.
pub trait TaskListener: Send + Sync {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards listener lines to `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl TaskListener for TracingListener {
    fn info(&self, message: &str) {
        tracing::info!(target: "branch_build_strategies::listener", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "branch_build_strategies::listener", "{}", message);
    }
}

/// Keeps every line in memory.
#[derive(Debug, Default)]
pub struct RecordingListener {
    lines: Mutex<Vec<String>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded lines, warnings prefixed with `WARNING: `.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.lock().iter().any(|line| line.contains(needle))
    }
}

impl TaskListener for RecordingListener {
    fn info(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.lines.lock().push(format!("WARNING: {}", message));
    }
}
