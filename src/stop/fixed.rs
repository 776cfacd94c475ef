//! Fixed-duration condition: stop after a configured window.

use std::time::Duration;

use async_trait::async_trait;

use super::{StopCondition, StopReason};

/// Stops unconditionally once the configured duration has elapsed.
///
/// The timer itself never completes early; ending the run before the
/// window closes takes a process interrupt, which the client handles
/// outside the condition.
#[derive(Debug, Clone, Copy)]
pub struct FixedDuration {
    duration: Duration,
}

impl FixedDuration {
    /// Stop after `duration`.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    /// Stop after `secs` seconds.
    pub fn secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    /// The configured window.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

#[async_trait]
impl StopCondition for FixedDuration {
    async fn wait(&mut self) -> StopReason {
        tokio::time::sleep(self.duration).await;
        StopReason::TimedOut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn resolves_only_after_the_window() {
        let started = tokio::time::Instant::now();
        let mut cond = FixedDuration::secs(60);
        let reason = cond.wait().await;
        assert_eq!(reason, StopReason::TimedOut);
        assert!(started.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_resolve_early() {
        let mut cond = FixedDuration::secs(60);
        let premature =
            tokio::time::timeout(Duration::from_secs(59), cond.wait()).await;
        assert!(premature.is_err(), "wait must outlast anything shorter than the window");
    }
}
