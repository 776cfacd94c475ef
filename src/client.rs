//! # SubscriberClient: bridge between a pub/sub transport and a log sink.
//!
//! The client owns exactly one [`Session`] for the span of a run. Its
//! lifecycle is two operations:
//!
//! ```text
//! start(key_expr, stop):
//!   Connector::open ──► Session
//!   Session::declare_subscriber(key_expr, tx) ──► Subscription
//!            │
//!            ▼  (transport delivery context)
//!      [bounded mpsc] ──► delivery worker ──► sink.write_line(rendered)
//!
//!   select! { stop.wait(), interrupt signal } ──► StopReason
//!   "Shutting down subscriber..." ──► shutdown()
//!
//! shutdown():
//!   undeclare subscription ─► cancel worker (drain within grace) ─► close session
//! ```
//!
//! ## Rules
//! - `shutdown` runs on **every** exit path out of the wait, including the
//!   interrupt path and the subscribe-failure path.
//! - `shutdown` is idempotent; the second call is a no-op.
//! - Samples are logged in delivery order; the worker never reorders.
//! - A failing or panicking sink write drops that one sample and is
//!   reported via `tracing`; it never tears down the subscription.
//! - Only session establishment errors propagate to the caller.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::sample::Sample;
use crate::signal;
use crate::sink::LogSink;
use crate::stop::{StopCondition, StopReason};
use crate::transport::{Connector, Session, Subscription};

/// Line written to the sink when the wait ends. External interface, byte-exact.
const SHUTDOWN_LINE: &str = "Shutting down subscriber...";

/// Subscribe-and-log client with an explicit start/shutdown lifecycle.
///
/// All state lives inside the instance; there is no ambient global state.
/// One client holds at most one open session at a time.
pub struct SubscriberClient {
    cfg: ClientConfig,
    connector: Arc<dyn Connector>,
    sink: Arc<dyn LogSink>,
    session: Option<Box<dyn Session>>,
    subscription: Option<Box<dyn Subscription>>,
    worker: Option<(CancellationToken, JoinHandle<()>)>,
}

impl SubscriberClient {
    /// Creates a client over the given transport and sink.
    pub fn new(cfg: ClientConfig, connector: Arc<dyn Connector>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            cfg,
            connector,
            sink,
            session: None,
            subscription: None,
            worker: None,
        }
    }

    /// Creates a client writing to stdout.
    pub fn with_console(cfg: ClientConfig, connector: Arc<dyn Connector>) -> Self {
        Self::new(cfg, connector, Arc::new(crate::sink::ConsoleSink))
    }

    /// Opens a session, subscribes to `key_expr`, and logs every delivered
    /// sample until `stop` (or an interrupt signal) ends the run.
    ///
    /// Blocks the calling task for the whole run. On return the session is
    /// released regardless of which path ended the wait.
    ///
    /// ## Errors
    /// - [`ClientError::Connect`] if the session cannot be opened.
    /// - [`ClientError::Subscribe`] if the subscription cannot be declared;
    ///   the freshly opened session is closed first.
    pub async fn start<S>(&mut self, key_expr: &str, stop: S) -> Result<StopReason, ClientError>
    where
        S: StopCondition,
    {
        self.start_with_interrupt(key_expr, stop, signal::wait_for_interrupt())
            .await
    }

    /// `start` with the interrupt future supplied by the caller.
    ///
    /// Production code always passes [`signal::wait_for_interrupt`]; tests
    /// pass a future they can resolve on demand to drive the interrupt
    /// branch of the wait.
    async fn start_with_interrupt<S, F>(
        &mut self,
        key_expr: &str,
        mut stop: S,
        interrupt: F,
    ) -> Result<StopReason, ClientError>
    where
        S: StopCondition,
        F: Future<Output = ()>,
    {
        if self.session.is_some() {
            return Err(ClientError::Connect {
                reason: "client already has an open session".into(),
            });
        }

        let session = self.connector.open(&self.cfg.session).await?;
        debug!("session opened");

        if let Some(banner) = stop.banner() {
            self.emit(banner);
        }

        let (tx, rx) = mpsc::channel(self.cfg.queue_capacity_clamped());
        match session.declare_subscriber(key_expr, tx).await {
            Ok(subscription) => {
                info!(key_expr, "subscription declared");
                self.session = Some(session);
                self.subscription = Some(subscription);
                self.worker = Some(self.spawn_delivery_worker(rx));
            }
            Err(e) => {
                self.session = Some(session);
                self.shutdown().await;
                return Err(e);
            }
        }

        let reason = tokio::select! {
            reason = stop.wait() => reason,
            _ = interrupt => StopReason::Interrupted,
        };
        info!(reason = reason.as_label(), "stop condition met");

        self.emit(SHUTDOWN_LINE);
        self.shutdown().await;
        Ok(reason)
    }

    /// Releases the subscription, the delivery worker, and the session.
    ///
    /// Idempotent: resources are taken out of the client as they are
    /// released, so a second call finds nothing to do.
    pub async fn shutdown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            if let Err(e) = subscription.undeclare().await {
                warn!(error = %e, key_expr = %subscription.key_expr(), "failed to undeclare subscription");
            }
        }

        if let Some((token, mut handle)) = self.worker.take() {
            token.cancel();
            if tokio::time::timeout(self.cfg.grace, &mut handle)
                .await
                .is_err()
            {
                warn!(grace = ?self.cfg.grace, "delivery worker did not drain in time, aborting");
                handle.abort();
            }
        }

        if let Some(mut session) = self.session.take() {
            if let Err(e) = session.close().await {
                warn!(error = %e, "failed to close session");
            }
            debug!("session closed");
        }
    }

    /// Spawns the worker that drains the delivery channel into the sink.
    ///
    /// On cancellation the worker drains what is already queued, then
    /// exits, so samples delivered before shutdown still get logged.
    fn spawn_delivery_worker(
        &self,
        mut rx: mpsc::Receiver<Sample>,
    ) -> (CancellationToken, JoinHandle<()>) {
        let sink = Arc::clone(&self.sink);
        let token = CancellationToken::new();
        let worker_token = token.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(sample) => deliver(sink.as_ref(), &sample),
                        None => break,
                    },
                    _ = worker_token.cancelled() => {
                        while let Ok(sample) = rx.try_recv() {
                            deliver(sink.as_ref(), &sample);
                        }
                        break;
                    }
                }
            }
        });

        (token, handle)
    }

    /// Writes one line to the sink, isolating failures and panics.
    ///
    /// The banner and shutdown lines go through here; a misbehaving sink
    /// must not unwind out of `start` and skip the session release.
    fn emit(&self, line: &str) {
        match std::panic::catch_unwind(AssertUnwindSafe(|| self.sink.write_line(line))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "sink write failed"),
            Err(_) => warn!("sink panicked while writing line"),
        }
    }
}

/// Renders and writes one sample, isolating sink failures and panics.
fn deliver(sink: &dyn LogSink, sample: &Sample) {
    let line = sample.render();
    match std::panic::catch_unwind(AssertUnwindSafe(|| sink.write_line(&line))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            warn!(error = %e, key_expr = %sample.key_expr, "dropping sample after sink failure");
        }
        Err(_) => {
            warn!(key_expr = %sample.key_expr, "sink panicked while writing sample");
        }
    }
}
