//! # Stop conditions: deciding when the client should stop.
//!
//! A [`StopCondition`] is the single capability "decide when to stop".
//! The client selects over the condition's future and the process
//! interrupt signal, so every variant shares one shutdown path.
//!
//! Built-ins:
//! - [`InteractiveQuit`] — stop when a line equal to `q` (trimmed,
//!   case-insensitive) arrives on a text input stream.
//! - [`FixedDuration`] — stop unconditionally after a configured duration.

mod fixed;
mod interactive;

use async_trait::async_trait;

pub use fixed::FixedDuration;
pub use interactive::InteractiveQuit;

/// Why the client stopped.
///
/// Consumed by a single shutdown path; none of the variants is an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The operator asked to quit (or the input stream ended).
    UserQuit,
    /// The process received an interrupt signal; swallowed, not re-raised.
    Interrupted,
    /// The configured run duration elapsed.
    TimedOut,
}

impl StopReason {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            StopReason::UserQuit => "user_quit",
            StopReason::Interrupted => "interrupted",
            StopReason::TimedOut => "timed_out",
        }
    }
}

/// Decides when a running client should stop.
#[async_trait]
pub trait StopCondition: Send {
    /// Resolves once the condition wants the client to stop.
    ///
    /// Interrupt signals are handled by the client, not here; `wait` only
    /// reports the condition's own reason.
    async fn wait(&mut self) -> StopReason;

    /// Optional banner printed to the sink before waiting begins.
    fn banner(&self) -> Option<&str> {
        None
    }
}
