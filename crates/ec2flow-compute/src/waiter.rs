//! Sleep-poll waiting

use crate::error::{ComputeError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Interval between describe calls while waiting
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Polling behaviour for wait helpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    pub interval: Duration,
    /// `None` waits forever
    pub timeout: Option<Duration>,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

impl WaitConfig {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Call `fetch` until `settled` accepts its result, sleeping `interval` between calls
pub async fn wait_until<T, F, Fut, P>(config: &WaitConfig, mut fetch: F, settled: P) -> Result<T>
where
    F: FnMut() -> Fut + Send,
    Fut: Future<Output = Result<T>> + Send,
    P: Fn(&T) -> bool + Send,
    T: Send,
{
    let started = Instant::now();
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        let value = fetch().await?;
        if settled(&value) {
            tracing::debug!("Settled after {} attempt(s)", attempt);
            return Ok(value);
        }

        if let Some(timeout) = config.timeout {
            if started.elapsed() + config.interval > timeout {
                return Err(ComputeError::Timeout(format!(
                    "not settled after {} attempt(s) in {:?}",
                    attempt,
                    started.elapsed()
                )));
            }
        }

        tracing::debug!("Not settled yet, retrying in {:?}", config.interval);
        tokio::time::sleep(config.interval).await;
    }
}
