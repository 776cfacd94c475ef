//! Error types used by the client and its delivery path.
//!
//! Two error enums with different propagation rules:
//!
//! - [`ClientError`] — failures while opening a session or declaring a
//!   subscription. Fatal: they surface from [`SubscriberClient::start`]
//!   and are expected to terminate the process with a non-zero status.
//! - [`SinkError`] — a failure while writing one rendered sample to the
//!   log sink. Caught at the delivery-worker boundary, logged, and never
//!   allowed to tear down the subscription.
//!
//! Both provide `as_label()` for stable snake_case labels in logs.
//!
//! [`SubscriberClient::start`]: crate::SubscriberClient::start

use thiserror::Error;

/// Errors produced while establishing the client's resources.
///
/// There is no retry policy: a failed connect is reported once and the
/// caller decides what to do with it.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ClientError {
    /// The session against the pub/sub collaborator could not be opened.
    #[error("failed to open session: {reason}")]
    Connect {
        /// Transport-provided description of the failure.
        reason: String,
    },

    /// The subscription could not be declared on an open session.
    ///
    /// The session is closed before this error propagates.
    #[error("failed to declare subscriber on '{key_expr}': {reason}")]
    Subscribe {
        /// Key expression the subscription was requested for.
        key_expr: String,
        /// Transport-provided description of the failure.
        reason: String,
    },
}

impl ClientError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ClientError::Connect { .. } => "connect_failed",
            ClientError::Subscribe { .. } => "subscribe_failed",
        }
    }
}

/// Error raised while writing a single line to a [`LogSink`].
///
/// Handled locally by the delivery worker: the offending sample is
/// reported via `tracing` and delivery continues with the next sample.
///
/// [`LogSink`]: crate::LogSink
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SinkError {
    /// The sink rejected or failed the write.
    #[error("sink write failed: {reason}")]
    Write {
        /// Sink-provided description of the failure.
        reason: String,
    },
}

impl SinkError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            SinkError::Write { .. } => "sink_write_failed",
        }
    }
}
