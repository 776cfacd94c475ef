//! Cross-platform interrupt-signal wait.
//!
//! On Unix this resolves on `SIGINT` or `SIGTERM` (plus the tokio
//! `ctrl_c` fallback); elsewhere on Ctrl-C only. The signal is consumed,
//! not re-raised: the client maps it to a normal stop reason.

use tracing::warn;

/// Resolves when the process receives an interrupt signal.
///
/// Each call installs independent listeners. If listener registration
/// fails the future logs the failure and never resolves, leaving the
/// stop condition as the only exit.
#[cfg(unix)]
pub async fn wait_for_interrupt() {
    use tokio::signal::unix::{signal, SignalKind};

    let listeners = (|| {
        let sigint = signal(SignalKind::interrupt())?;
        let sigterm = signal(SignalKind::terminate())?;
        std::io::Result::Ok((sigint, sigterm))
    })();

    match listeners {
        Ok((mut sigint, mut sigterm)) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {},
                _ = sigint.recv() => {},
                _ = sigterm.recv() => {},
            }
        }
        Err(e) => {
            warn!(error = %e, "failed to install signal listeners");
            futures::future::pending::<()>().await;
        }
    }
}

/// Resolves when the process receives an interrupt signal.
///
/// Each call installs independent listeners. If listener registration
/// fails the future logs the failure and never resolves, leaving the
/// stop condition as the only exit.
#[cfg(not(unix))]
pub async fn wait_for_interrupt() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install signal listeners");
        futures::future::pending::<()>().await;
    }
}
