//! # Fixed-window listener demo
//!
//! Subscribes to `do/echo` on the in-process hub and logs samples for a
//! fixed 60 second window, then shuts down on its own.
//!
//! ## Run
//! ```bash
//! cargo run --example echo_window
//! ```

use std::sync::Arc;
use std::time::Duration;

use sublog::{ClientConfig, FixedDuration, MemHub, SubscriberClient};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init()
        .ok();

    let hub = MemHub::new();

    let publisher = hub.clone();
    tokio::spawn(async move {
        let mut n: u64 = 0;
        loop {
            tokio::time::sleep(Duration::from_secs(2)).await;
            publisher.put("do/echo", format!("echo #{n}").into_bytes());
            n += 1;
        }
    });

    let mut client = SubscriberClient::with_console(ClientConfig::default(), Arc::new(hub));
    let reason = client.start("do/echo", FixedDuration::secs(60)).await?;
    eprintln!("stopped: {}", reason.as_label());
    Ok(())
}
