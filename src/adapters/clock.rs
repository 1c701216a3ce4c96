use crate::domain::ports::Sleeper;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Returns immediately and keeps every requested duration.
#[derive(Debug, Clone, Default)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<Duration> {
        self.slept
            .lock()
            .map(|slept| slept.clone())
            .unwrap_or_default()
    }

    /// Sum of the recorded sleeps, saturating at `Duration::MAX`.
    pub fn total(&self) -> Duration {
        self.recorded()
            .iter()
            .fold(Duration::ZERO, |acc, d| acc.saturating_add(*d))
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        if let Ok(mut slept) = self.slept.lock() {
            slept.push(duration);
        }
        tokio::task::yield_now().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_sleeper_does_not_block() {
        let sleeper = RecordingSleeper::new();
        let started = std::time::Instant::now();
        sleeper.sleep(Duration::from_secs(60)).await;
        sleeper.sleep(Duration::from_millis(500)).await;

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(sleeper.total(), Duration::from_millis(60_500));
    }

    #[tokio::test]
    async fn test_recording_sleeper_total_saturates() {
        let sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::MAX).await;
        sleeper.sleep(Duration::from_secs(1)).await;
        assert_eq!(sleeper.total(), Duration::MAX);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_sleeper_advances_time() {
        let started = tokio::time::Instant::now();
        TokioSleeper.sleep(Duration::from_secs(5)).await;
        assert!(started.elapsed() >= Duration::from_secs(5));
    }
}
