//! In-process pub/sub hub.
//!
//! [`MemHub`] is a reference implementation of the transport seam used by
//! tests and the demo binaries. It does topic matching with zenoh-style
//! key expressions (`*` matches one chunk, `**` matches any number) and
//! delivers by `try_send` into each subscriber's bounded channel — a full
//! queue drops the sample for that subscriber only, it never blocks the
//! publisher.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use crate::error::ClientError;
use crate::sample::Sample;

use super::{Connector, Session, SessionConfig, Subscription};

struct SubEntry {
    id: u64,
    session_id: u64,
    key_expr: String,
    tx: mpsc::Sender<Sample>,
}

#[derive(Default)]
struct HubInner {
    subs: Mutex<Vec<SubEntry>>,
    next_id: AtomicU64,
    close_count: AtomicUsize,
}

/// Shared in-process hub. Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct MemHub {
    inner: Arc<HubInner>,
}

impl MemHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Publishes a sample to every matching subscriber.
    ///
    /// Returns the number of subscribers the sample was handed to. A
    /// subscriber with a full queue is skipped (and not counted).
    pub fn publish(&self, sample: Sample) -> usize {
        let subs = self.inner.subs.lock().expect("hub mutex poisoned");
        let mut delivered = 0;
        for entry in subs.iter() {
            if !key_matches(&entry.key_expr, &sample.key_expr) {
                continue;
            }
            match entry.tx.try_send(sample.clone()) {
                Ok(()) => delivered += 1,
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(key_expr = %entry.key_expr, "subscriber queue full, sample dropped");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {}
            }
        }
        delivered
    }

    /// Publishes a `PUT` sample.
    pub fn put(&self, key_expr: &str, payload: impl Into<Vec<u8>>) -> usize {
        self.publish(Sample::put(key_expr, payload))
    }

    /// Publishes a `DELETE` sample.
    pub fn delete(&self, key_expr: &str) -> usize {
        self.publish(Sample::delete(key_expr))
    }

    /// Number of currently registered subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subs.lock().expect("hub mutex poisoned").len()
    }

    /// Number of sessions closed so far. Test hook.
    pub fn close_count(&self) -> usize {
        self.inner.close_count.load(Ordering::Relaxed)
    }

    fn next_id(&self) -> u64 {
        self.inner.next_id.fetch_add(1, Ordering::Relaxed)
    }
}

#[async_trait]
impl Connector for MemHub {
    async fn open(&self, _config: &SessionConfig) -> Result<Box<dyn Session>, ClientError> {
        Ok(Box::new(MemSession {
            hub: Arc::clone(&self.inner),
            id: self.next_id(),
            closed: false,
        }))
    }
}

struct MemSession {
    hub: Arc<HubInner>,
    id: u64,
    closed: bool,
}

#[async_trait]
impl Session for MemSession {
    async fn declare_subscriber(
        &self,
        key_expr: &str,
        tx: mpsc::Sender<Sample>,
    ) -> Result<Box<dyn Subscription>, ClientError> {
        if self.closed {
            return Err(ClientError::Subscribe {
                key_expr: key_expr.to_owned(),
                reason: "session closed".into(),
            });
        }
        let sub_id = self.hub.next_id.fetch_add(1, Ordering::Relaxed);
        self.hub
            .subs
            .lock()
            .expect("hub mutex poisoned")
            .push(SubEntry {
                id: sub_id,
                session_id: self.id,
                key_expr: key_expr.to_owned(),
                tx,
            });
        Ok(Box::new(MemSubscription {
            hub: Arc::clone(&self.hub),
            id: sub_id,
            key_expr: key_expr.to_owned(),
        }))
    }

    async fn close(&mut self) -> Result<(), ClientError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.hub
            .subs
            .lock()
            .expect("hub mutex poisoned")
            .retain(|e| e.session_id != self.id);
        self.hub.close_count.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

struct MemSubscription {
    hub: Arc<HubInner>,
    id: u64,
    key_expr: String,
}

#[async_trait]
impl Subscription for MemSubscription {
    fn key_expr(&self) -> &str {
        &self.key_expr
    }

    async fn undeclare(&mut self) -> Result<(), ClientError> {
        self.hub
            .subs
            .lock()
            .expect("hub mutex poisoned")
            .retain(|e| e.id != self.id);
        Ok(())
    }
}

/// Chunk-wise key-expression matching.
///
/// `*` matches exactly one chunk, `**` matches zero or more chunks.
fn key_matches(pattern: &str, key: &str) -> bool {
    let pattern: Vec<&str> = pattern.split('/').collect();
    let key: Vec<&str> = key.split('/').collect();
    chunks_match(&pattern, &key)
}

fn chunks_match(pattern: &[&str], key: &[&str]) -> bool {
    match pattern.split_first() {
        None => key.is_empty(),
        Some((&"**", rest)) => {
            // `**` absorbs zero chunks, or one chunk and stays in play.
            chunks_match(rest, key)
                || (!key.is_empty() && chunks_match(pattern, &key[1..]))
        }
        Some((chunk, rest)) => match key.split_first() {
            Some((key_chunk, key_rest)) => {
                (*chunk == "*" || chunk == key_chunk) && chunks_match(rest, key_rest)
            }
            None => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::SampleKind;

    #[test]
    fn exact_and_wildcard_matching() {
        assert!(key_matches("rt/hello", "rt/hello"));
        assert!(!key_matches("rt/hello", "rt/other"));
        assert!(key_matches("rt/*", "rt/hello"));
        assert!(!key_matches("rt/*", "rt/hello/deep"));
        assert!(key_matches("rt/**", "rt/hello/deep"));
        assert!(key_matches("**", "anything/at/all"));
        assert!(key_matches("rt/**/state", "rt/state"));
        assert!(key_matches("rt/**/state", "rt/a/b/state"));
        assert!(!key_matches("rt/**/state", "rt/a/b/other"));
    }

    #[tokio::test]
    async fn publish_reaches_matching_subscriber() {
        let hub = MemHub::new();
        let mut session = Connector::open(&hub, &SessionConfig::default())
            .await
            .unwrap();
        let (tx, mut rx) = mpsc::channel(8);
        let mut sub = session.declare_subscriber("rt/*", tx).await.unwrap();

        assert_eq!(hub.put("rt/hello", "hi".as_bytes()), 1);
        assert_eq!(hub.put("do/echo", "miss".as_bytes()), 0);

        let sample = rx.recv().await.unwrap();
        assert_eq!(sample.kind, SampleKind::Put);
        assert_eq!(&*sample.key_expr, "rt/hello");

        sub.undeclare().await.unwrap();
        assert_eq!(hub.subscriber_count(), 0);
        session.close().await.unwrap();
        assert_eq!(hub.close_count(), 1);
    }

    #[tokio::test]
    async fn full_queue_drops_without_blocking() {
        let hub = MemHub::new();
        let session = Connector::open(&hub, &SessionConfig::default())
            .await
            .unwrap();
        let (tx, mut rx) = mpsc::channel(1);
        let _sub = session.declare_subscriber("do/echo", tx).await.unwrap();

        assert_eq!(hub.put("do/echo", "kept".as_bytes()), 1);
        assert_eq!(hub.put("do/echo", "dropped".as_bytes()), 0);

        let sample = rx.recv().await.unwrap();
        assert_eq!(sample.payload, b"kept");
    }

    #[tokio::test]
    async fn close_detaches_session_subscriptions() {
        let hub = MemHub::new();
        let mut session = Connector::open(&hub, &SessionConfig::default())
            .await
            .unwrap();
        let (tx, _rx) = mpsc::channel(8);
        let _sub = session.declare_subscriber("rt/hello", tx).await.unwrap();
        assert_eq!(hub.subscriber_count(), 1);

        session.close().await.unwrap();
        assert_eq!(hub.subscriber_count(), 0);
        assert_eq!(hub.put("rt/hello", "late".as_bytes()), 0);

        // Declaring on a closed session is rejected.
        let (tx2, _rx2) = mpsc::channel(8);
        let err = session.declare_subscriber("rt/hello", tx2).await;
        assert!(err.is_err());
    }
}
