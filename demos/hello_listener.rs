//! # Interactive listener demo
//!
//! Subscribes to `rt/hello` on the in-process hub and logs every sample
//! until `q` + Enter (or Ctrl-C). A background ticker publishes a sample
//! each second so there is something to see.
//!
//! ## Run
//! ```bash
//! cargo run --example hello_listener
//! ```

use std::sync::Arc;
use std::time::Duration;

use sublog::{ClientConfig, InteractiveQuit, MemHub, SubscriberClient};

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
            tokio::time::sleep(Duration::from_secs(1)).await;
            publisher.put("rt/hello", format!("hello #{n}").into_bytes());
            n += 1;
        }
    });

    let mut client = SubscriberClient::with_console(ClientConfig::default(), Arc::new(hub));
    let reason = client.start("rt/hello", InteractiveQuit::stdin()).await?;
    eprintln!("stopped: {}", reason.as_label());
    Ok(())
}
