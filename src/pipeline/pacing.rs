use std::future::Future;
use std::time::Duration;
use tokio::time::{Instant, sleep_until};

/// Keeps a minimum pause between consecutive rate-limit-sensitive requests.
///
/// The pause is measured from the moment the previous response arrived, so
/// slow responses never eat into it. The first request is never delayed.
#[derive(Debug, Clone)]
pub struct RequestPacer {
    interval: Duration,
    last_finished: Option<Instant>,
}

impl RequestPacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_finished: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits out the pause, then drives `request` to completion.
    pub async fn run<Fut: Future>(&mut self, request: Fut) -> Fut::Output {
        if let Some(last) = self.last_finished
            && !self.interval.is_zero()
        {
            sleep_until(last + self.interval).await;
        }
        let output = request.await;
        self.last_finished = Some(Instant::now());
        output
    }
}
