//! Recurring operator warning for a corrupt config file

use crate::config::CORRUPT_CONFIG_MESSAGE;
use crate::shutdown::{ShutdownCoordinator, ShutdownHandler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::error;

/// Background task repeating the corrupt-config error until shutdown
#[derive(Debug)]
pub struct CorruptConfigWarning {
    repeats: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

impl CorruptConfigWarning {
    /// First repeat fires one `every` after spawning; the initial report is
    /// logged by the config loader itself.
    pub fn spawn(reason: String, every: Duration, shutdown: &ShutdownCoordinator) -> Self {
        let repeats = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&repeats);
        let handler = ShutdownHandler::new(shutdown, "corrupt-config-warning");

        let handle = tokio::spawn(handler.run(move || async move {
            let mut ticker = interval_at(Instant::now() + every, every);
            loop {
                ticker.tick().await;
                counter.fetch_add(1, Ordering::Relaxed);
                error!(reason = %reason, "{}", CORRUPT_CONFIG_MESSAGE);
            }
        }));

        Self { repeats, handle }
    }

    /// Warnings emitted so far
    pub fn repeats(&self) -> u64 {
        self.repeats.load(Ordering::Relaxed)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the task to stop after shutdown
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_warning_repeats_at_interval() {
        let shutdown = ShutdownCoordinator::new(Duration::ZERO);
        let warning = CorruptConfigWarning::spawn("eof".into(), Duration::from_secs(10), &shutdown);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(warning.repeats(), 0);

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(warning.repeats(), 3);
        assert!(!warning.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_warning_stops_on_shutdown() {
        let shutdown = ShutdownCoordinator::new(Duration::ZERO);
        let warning = CorruptConfigWarning::spawn("eof".into(), Duration::from_secs(10), &shutdown);

        tokio::time::sleep(Duration::from_secs(15)).await;
        shutdown.shutdown().await;
        warning.join().await;
    }
}
