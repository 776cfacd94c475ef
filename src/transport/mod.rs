//! # Transport seam: the external pub/sub collaborator.
//!
//! The client never talks to a concrete middleware directly; it consumes
//! the three traits defined here. The collaborator supplies connection
//! establishment, topic matching, and delivery — none of that is
//! implemented by this crate.
//!
//! ## Shape
//! ```text
//! Connector::open(&SessionConfig) ──► Box<dyn Session>
//!     Session::declare_subscriber(key_expr, tx) ──► Box<dyn Subscription>
//!     Session::close()
//! ```
//!
//! Delivery is a message-passing boundary: the transport pushes each
//! [`Sample`] into the `mpsc::Sender` handed over at declaration time, and
//! the client drains the receiving end on its own worker. The transport
//! must never block on a full queue; it drops the sample for that
//! subscriber instead.
//!
//! [`MemHub`](mem::MemHub) is an in-process reference implementation used
//! by the tests and demo binaries.

mod mem;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::ClientError;
use crate::sample::Sample;

pub use mem::MemHub;

/// Opaque session configuration handed to [`Connector::open`].
///
/// Both fields default to "let the transport decide"; a client-mode
/// deployment behind a router would set `mode` and `endpoints` explicitly.
#[derive(Clone, Debug, Default)]
pub struct SessionConfig {
    /// Session mode override (e.g. `"client"`, `"peer"`).
    pub mode: Option<String>,
    /// Endpoints to connect to (e.g. `"tcp/0.0.0.0:7448"`).
    pub endpoints: Vec<String>,
}

/// Opens sessions against the pub/sub collaborator.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Opens a new session.
    ///
    /// Fails with [`ClientError::Connect`] when the collaborator is
    /// unreachable or the configuration is rejected.
    async fn open(&self, config: &SessionConfig) -> Result<Box<dyn Session>, ClientError>;
}

/// A live connection to the pub/sub collaborator.
#[async_trait]
pub trait Session: Send + Sync {
    /// Registers interest in `key_expr`.
    ///
    /// Every matching sample is pushed into `tx` from the transport's own
    /// delivery context. A full channel drops the sample for this
    /// subscriber only.
    async fn declare_subscriber(
        &self,
        key_expr: &str,
        tx: mpsc::Sender<Sample>,
    ) -> Result<Box<dyn Subscription>, ClientError>;

    /// Closes the session. Subscriptions still attached stop receiving.
    async fn close(&mut self) -> Result<(), ClientError>;
}

/// A registered subscription, owned by the client until undeclared.
#[async_trait]
pub trait Subscription: Send + Sync {
    /// The key expression this subscription was declared with.
    fn key_expr(&self) -> &str;

    /// Withdraws the subscription; no samples are delivered afterwards.
    async fn undeclare(&mut self) -> Result<(), ClientError>;
}
