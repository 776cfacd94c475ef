//! Interactive quit condition: read lines, stop on `q`.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};

use super::{StopCondition, StopReason};

/// Banner printed when an interactive wait begins.
///
/// External interface, byte-exact.
const BANNER: &str = "Zenoh subscriber started. Press 'q' + Enter to quit.";

/// Stops when a line equal to `q` (trimmed, case-insensitive) is read.
///
/// Generic over the line source so tests can feed scripted input; the
/// production constructor reads stdin. End of input also stops the wait:
/// a closed stream can never produce a quit line, so blocking forever on
/// it would make the client unstoppable.
pub struct InteractiveQuit<R = BufReader<Stdin>> {
    reader: R,
}

impl InteractiveQuit<BufReader<Stdin>> {
    /// Reads from the process's stdin.
    pub fn stdin() -> Self {
        Self {
            reader: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl<R> InteractiveQuit<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    /// Reads from an arbitrary buffered line source.
    pub fn from_reader(reader: R) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl<R> StopCondition for InteractiveQuit<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn wait(&mut self) -> StopReason {
        let mut line = String::new();
        loop {
            line.clear();
            match self.reader.read_line(&mut line).await {
                // End of input: treat as quit, see type docs.
                Ok(0) => return StopReason::UserQuit,
                Ok(_) => {
                    if line.trim().eq_ignore_ascii_case("q") {
                        return StopReason::UserQuit;
                    }
                }
                Err(_) => return StopReason::UserQuit,
            }
        }
    }

    fn banner(&self) -> Option<&str> {
        Some(BANNER)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::AsyncWriteExt;

    use super::*;

    async fn wait_on(input: &str) -> StopReason {
        let mut cond = InteractiveQuit::from_reader(input.as_bytes());
        cond.wait().await
    }

    #[tokio::test]
    async fn quits_on_q_in_any_case_and_padding() {
        assert_eq!(wait_on("q\n").await, StopReason::UserQuit);
        assert_eq!(wait_on("Q\n").await, StopReason::UserQuit);
        assert_eq!(wait_on(" q \n").await, StopReason::UserQuit);
    }

    #[tokio::test]
    async fn skips_non_quit_lines() {
        assert_eq!(wait_on("hello\nq\n").await, StopReason::UserQuit);
    }

    #[tokio::test]
    async fn end_of_input_quits() {
        assert_eq!(wait_on("").await, StopReason::UserQuit);
        assert_eq!(wait_on("quit\n").await, StopReason::UserQuit);
    }

    #[tokio::test]
    async fn other_lines_do_not_resolve_the_wait() {
        let (client, server) = tokio::io::duplex(64);
        let mut cond = InteractiveQuit::from_reader(BufReader::new(client));
        let mut writer = server;

        writer.write_all(b"nope\n").await.unwrap();
        let premature =
            tokio::time::timeout(Duration::from_millis(50), cond.wait()).await;
        assert!(premature.is_err(), "non-quit line must not stop the wait");

        writer.write_all(b"q\n").await.unwrap();
        let reason = tokio::time::timeout(Duration::from_secs(1), cond.wait())
            .await
            .expect("quit line must stop the wait");
        assert_eq!(reason, StopReason::UserQuit);
    }

    #[test]
    fn banner_is_exact() {
        let cond = InteractiveQuit::from_reader("".as_bytes());
        assert_eq!(
            cond.banner(),
            Some("Zenoh subscriber started. Press 'q' + Enter to quit.")
        );
    }
}
