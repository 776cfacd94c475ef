//! Client configuration.
//!
//! [`ClientConfig`] centralizes the runtime settings of the client:
//! delivery queue sizing, shutdown grace, and the opaque transport
//! session configuration.
//!
//! ## Sentinel values
//! - `queue_capacity = 0` → clamped to 1 by the accessor
//! - `grace = 0s` → no wait, the delivery worker is aborted immediately

use std::time::Duration;

use crate::transport::SessionConfig;

/// Configuration for a [`SubscriberClient`](crate::SubscriberClient).
///
/// ## Field semantics
/// - `session`: passed through to `Connector::open` unmodified
/// - `queue_capacity`: bound of the transport → worker delivery channel
/// - `grace`: maximum wait for the delivery worker to drain on shutdown
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Opaque transport session configuration.
    pub session: SessionConfig,

    /// Capacity of the bounded delivery channel.
    ///
    /// When the channel is full the transport drops the sample for this
    /// subscriber; the log line for it is simply never produced. Minimum
    /// effective value is 1.
    pub queue_capacity: usize,

    /// Maximum time to wait for the delivery worker to finish draining
    /// queued samples during shutdown before it is aborted.
    pub grace: Duration,
}

impl ClientConfig {
    /// Returns the delivery queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn queue_capacity_clamped(&self) -> usize {
        self.queue_capacity.max(1)
    }
}

impl Default for ClientConfig {
    /// Default configuration:
    ///
    /// - `session = SessionConfig::default()` (no overrides)
    /// - `queue_capacity = 256`
    /// - `grace = 5s`
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            queue_capacity: 256,
            grace: Duration::from_secs(5),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_clamped() {
        let cfg = ClientConfig {
            queue_capacity: 0,
            ..ClientConfig::default()
        };
        assert_eq!(cfg.queue_capacity_clamped(), 1);
    }
}
