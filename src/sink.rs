//! # Log sinks: where rendered sample lines go.
//!
//! [`LogSink`] is the output seam of the client. The delivery worker and
//! the main task both write through it, so implementations must be safe to
//! call from concurrent contexts.
//!
//! Built-ins:
//! - [`ConsoleSink`] — line-buffered stdout, the production default.
//! - [`MemorySink`] — collects lines in memory, for tests and demos.

use std::io::Write;
use std::sync::Mutex;

use crate::error::SinkError;

/// Destination for rendered log lines.
///
/// ### Implementation requirements
/// - `write_line` may be called from the delivery worker and the main task
///   concurrently; the sink must serialize writes itself if its backing
///   output is not line-atomic.
/// - Report failures through [`SinkError`]; do not panic.
pub trait LogSink: Send + Sync + 'static {
    /// Writes one complete line to the sink.
    fn write_line(&self, line: &str) -> Result<(), SinkError>;
}

/// Stdout sink.
///
/// Takes the stdout lock per line so whole lines stay atomic across
/// concurrent writers. Write failures (e.g. a closed pipe) are reported
/// as [`SinkError`], never panicked on.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LogSink for ConsoleSink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}").map_err(|e| SinkError::Write {
            reason: e.to_string(),
        })
    }
}

/// In-memory sink collecting every written line.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of all lines written so far, in write order.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("sink mutex poisoned").clone()
    }

    /// True if `line` was written at least once.
    pub fn contains(&self, line: &str) -> bool {
        self.lines
            .lock()
            .expect("sink mutex poisoned")
            .iter()
            .any(|l| l == line)
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<(), SinkError> {
        self.lines
            .lock()
            .expect("sink mutex poisoned")
            .push(line.to_owned());
        Ok(())
    }
}
