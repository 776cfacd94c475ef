//! # sublog
//!
//! **sublog** is a minimal subscribe-and-log client: it opens one session
//! against a pub/sub collaborator, registers one subscription, writes every
//! delivered sample to a log sink, and runs until a stop condition fires.
//!
//! The transport itself (connection, topic matching, delivery) is an
//! external collaborator consumed through the [`Connector`] / [`Session`] /
//! [`Subscription`] trait seam; the crate ships only an in-process
//! reference hub ([`MemHub`]) for tests and demos.
//!
//! ## Architecture
//! ```text
//!  Connector::open ──► Session ──► declare_subscriber(key_expr, tx)
//!                                         │
//!                     transport delivery  ▼
//!                          [bounded mpsc channel]
//!                                         │
//!                                         ▼
//!                    delivery worker ──► LogSink  ("Received PUT (...)")
//!
//!  main task: select! { StopCondition::wait(), interrupt signal }
//!             └─► StopReason ─► "Shutting down subscriber..." ─► shutdown()
//! ```
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use sublog::{
//!     ClientConfig, FixedDuration, LogSink, MemHub, MemorySink, StopReason, SubscriberClient,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = MemHub::new();
//!     let sink = Arc::new(MemorySink::new());
//!     let mut client = SubscriberClient::new(
//!         ClientConfig::default(),
//!         Arc::new(hub.clone()),
//!         Arc::clone(&sink) as Arc<dyn LogSink>,
//!     );
//!
//!     let reason = client
//!         .start("rt/hello", FixedDuration::new(Duration::from_millis(10)))
//!         .await?;
//!     assert_eq!(reason, StopReason::TimedOut);
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod sample;
mod signal;
mod sink;
mod stop;
mod transport;

// ---- Public re-exports ----

pub use client::SubscriberClient;
pub use config::ClientConfig;
pub use error::{ClientError, SinkError};
pub use sample::{Sample, SampleKind};
pub use sink::{ConsoleSink, LogSink, MemorySink};
pub use stop::{FixedDuration, InteractiveQuit, StopCondition, StopReason};
pub use transport::{Connector, MemHub, Session, SessionConfig, Subscription};
