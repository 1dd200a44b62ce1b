use crate::model::BadgeCount;
use crate::remote::StoreApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Background task that keeps the cart badge count fresh.
///
/// The count is read with `list_cart_items` once on start and then every `interval`. A
/// failed poll shows 0 until the next successful one. The poller does not talk to the cart
/// view-model, so the badge can briefly disagree with the cart page.
pub struct BadgePoller {
    api: Arc<dyn StoreApi>,
    interval: Duration,
    publisher: Arc<watch::Sender<BadgeCount>>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    restarts: u64,
}

impl BadgePoller {
    /// Starts polling immediately.
    pub fn start(api: Arc<dyn StoreApi>, interval: Duration) -> Self {
        let interval = interval.max(MIN_POLL_INTERVAL);
        let (publisher, _) = watch::channel(BadgeCount::default());
        let mut poller = Self {
            api,
            interval,
            publisher: Arc::new(publisher),
            cancel: CancellationToken::new(),
            handle: None,
            restarts: 0,
        };
        poller.spawn();
        poller
    }

    fn spawn(&mut self) {
        let api = self.api.clone();
        let publisher = self.publisher.clone();
        let cancel = self.cancel.clone();
        let period = self.interval;
        let run = self.restarts;

        self.handle = Some(tokio::spawn(async move {
            info!(run, ?period, "Badge poller started");
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    _ = cancel.cancelled() => break,
                    result = api.list_cart_items() => result,
                };
                let count = match result {
                    Ok(lines) => BadgeCount::from_lines(&lines),
                    Err(e) => {
                        warn!(run, error = %e, "Badge poll failed");
                        BadgeCount::default()
                    }
                };

                if cancel.is_cancelled() {
                    debug!(run, %count, "Dropped poll result after cancellation");
                    break;
                }
                publisher.send_replace(count);
                debug!(run, %count, "Badge updated");
            }
            info!(run, "Badge poller stopped");
        }));
    }

    /// Last published count.
    pub fn count(&self) -> BadgeCount {
        *self.publisher.borrow()
    }

    /// Receiver that observes every published count, across restarts.
    pub fn subscribe(&self) -> watch::Receiver<BadgeCount> {
        self.publisher.subscribe()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Cancels the timer. A poll already in flight is abandoned and never published.
    pub fn stop(&mut self) {
        self.cancel.cancel();
    }

    /// Re-arms the timer with an immediate poll, keeping the published value and subscribers.
    pub fn restart(&mut self) {
        self.stop();
        self.cancel = CancellationToken::new();
        self.restarts += 1;
        self.spawn();
    }

    /// Stops polling and waits for the task to exit.
    pub async fn shutdown(mut self) -> Result<(), String> {
        self.stop();
        if let Some(handle) = self.handle.take() {
            handle
                .await
                .map_err(|e| format!("Badge poller task failed: {:?}", e))?;
        }
        Ok(())
    }
}

impl Drop for BadgePoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
