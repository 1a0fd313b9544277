//! Periodic battery poll.
//!
//! [`BatteryPoller`] runs a tick callback on a tokio interval until it is
//! stopped. The first tick fires immediately. Stopping cancels the task's
//! token: no new tick starts afterwards, but a tick that is already running
//! finishes.

use crate::error::BridgeError;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Default poll period.
pub const BATTERY_POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct BatteryPoller {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
    period: Duration,
}

impl BatteryPoller {
    /// Spawns the poll loop on `handle`.
    ///
    /// `tick` runs on a runtime worker and should not block for long.
    pub fn spawn<F>(handle: &Handle, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let task = handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut rounds: u64 = 0;

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        rounds += 1;
                        debug!("Battery poll round {}", rounds);
                        tick();
                    }
                }
            }

            info!("Battery poller stopped after {} round(s)", rounds);
        });

        info!("Battery poller started (every {:?})", period);
        Self {
            token,
            task: Some(task),
            period,
        }
    }

    /// Spawns on the runtime the caller is running in.
    pub fn spawn_current<F>(period: Duration, tick: F) -> Result<Self, BridgeError>
    where
        F: FnMut() + Send + 'static,
    {
        let handle = Handle::try_current().map_err(|_| BridgeError::NoRuntime)?;
        Ok(Self::spawn(&handle, period, tick))
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Requests a stop and returns immediately.
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Stops the loop and waits for the task to exit.
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for BatteryPoller {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::time::sleep;

    fn counter() -> (Arc<AtomicUsize>, impl FnMut() + Send + 'static) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        (count, move || {
            c.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_immediately_then_every_period() {
        let (count, tick) = counter();
        let poller = BatteryPoller::spawn_current(BATTERY_POLL_INTERVAL, tick).unwrap();

        sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        // ticks at 5s and 10s
        sleep(Duration::from_secs(12)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);

        poller.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_ticks_after_stop() {
        let (count, tick) = counter();
        let poller = BatteryPoller::spawn_current(Duration::from_secs(5), tick).unwrap();

        sleep(Duration::from_secs(7)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);

        poller.stop();
        assert!(poller.is_stopped());
        sleep(Duration::from_secs(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_loop() {
        let (count, tick) = counter();
        let poller = BatteryPoller::spawn_current(Duration::from_secs(1), tick).unwrap();
        sleep(Duration::from_millis(1500)).await;
        drop(poller);

        let seen = count.load(Ordering::SeqCst);
        sleep(Duration::from_secs(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[test]
    fn test_spawn_outside_runtime_fails() {
        let (_count, tick) = counter();
        let res = BatteryPoller::spawn_current(Duration::from_secs(1), tick);
        assert!(matches!(res, Err(BridgeError::NoRuntime)));
    }
}
