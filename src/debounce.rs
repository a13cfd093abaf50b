// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trailing-edge debouncer over an mpsc stream.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

/// Emits the latest received value once `delay` passes with no newer value.
#[derive(Debug)]
pub struct Debouncer<T> {
    rx: mpsc::Receiver<T>,
    delay: Duration,
}

impl<T> Debouncer<T> {
    pub fn new(rx: mpsc::Receiver<T>, delay: Duration) -> Self {
        Self { rx, delay }
    }

    /// Create a bounded channel and the debouncer draining it.
    pub fn channel(delay: Duration, capacity: usize) -> (mpsc::Sender<T>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx, delay))
    }

    /// Wait for the next settled value.
    ///
    /// A value pending when every sender is dropped is flushed immediately;
    /// after that, `None`.
    pub async fn next(&mut self) -> Option<T> {
        let mut latest = self.rx.recv().await?;
        loop {
            match timeout(self.delay, self.rx.recv()).await {
                Ok(Some(newer)) => latest = newer,
                Ok(None) | Err(_) => return Some(latest),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test(start_paused = true)]
    async fn emits_only_after_quiet_period() {
        let (tx, mut debouncer) = Debouncer::channel(Duration::from_millis(400), 8);
        tokio::spawn(async move {
            for value in ["커", "커피", "커피 우"] {
                tx.send(value).await.expect("send");
                sleep(Duration::from_millis(100)).await;
            }
            sleep(Duration::from_millis(1_000)).await;
            tx.send("녹차").await.expect("send");
        });

        let start = Instant::now();
        assert_eq!(debouncer.next().await, Some("커피 우"));
        // last keystroke at 200ms, plus the 400ms quiet window
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(600), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(700), "{elapsed:?}");
        assert_eq!(debouncer.next().await, Some("녹차"));
        assert_eq!(debouncer.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn closed_sender_flushes_pending_value() {
        let (tx, mut debouncer) = Debouncer::channel(Duration::from_millis(400), 8);
        tx.send(1).await.expect("send");
        tx.send(2).await.expect("send");
        drop(tx);

        assert_eq!(debouncer.next().await, Some(2));
        assert_eq!(debouncer.next().await, None);
    }
}
