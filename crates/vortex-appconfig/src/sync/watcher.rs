//! Polling loop behind a watch subscription.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};
use tracing::{debug, info, warn};
use vortex_kv::{Result, WatchEvent};

use crate::backend::BackendInner;

/// Polls one key and forwards each successful poll to a subscriber.
pub(crate) struct Watcher {
    /// Shared cache and fetcher.
    inner: Arc<BackendInner>,
    /// The watched key.
    key: String,
    /// Interval between polls.
    poll_interval: Duration,
    /// Pause after a failed poll.
    cooldown: Duration,
}

impl Watcher {
    /// Creates a watcher for `key` using the backend's timing settings.
    pub(crate) fn new(inner: Arc<BackendInner>, key: impl Into<String>) -> Self {
        let poll_interval = inner.settings().poll_interval();
        let cooldown = inner.settings().cooldown();
        Self {
            inner,
            key: key.into(),
            poll_interval,
            cooldown,
        }
    }

    /// Spawns the polling task and returns the subscriber's channel.
    ///
    /// The task ends when either `stop` or `shutdown` carries `true` or
    /// loses its sender, or when the subscriber drops the channel.
    pub(crate) fn start(
        self,
        stop: watch::Receiver<bool>,
        shutdown: watch::Receiver<bool>,
    ) -> mpsc::Receiver<WatchEvent> {
        let (tx, rx) = mpsc::channel(self.inner.settings().channel_capacity());

        tokio::spawn(self.run(tx, stop, shutdown));

        rx
    }

    /// Runs the polling loop. Dropping `tx` on return closes the channel.
    async fn run(
        self,
        tx: mpsc::Sender<WatchEvent>,
        mut stop: watch::Receiver<bool>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        // First poll one full period after subscribing.
        let mut ticker = interval_at(Instant::now() + self.poll_interval, self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!("Watching '{}' every {:?}", self.key, self.poll_interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = stopped(&mut stop, &mut shutdown) => break,
            }

            let polled = tokio::select! {
                polled = self.poll_once() => polled,
                _ = stopped(&mut stop, &mut shutdown) => break,
            };

            match polled {
                Ok(value) => {
                    tokio::select! {
                        sent = tx.send(WatchEvent::Value(value)) => {
                            if sent.is_err() {
                                debug!("Subscriber for '{}' went away", self.key);
                                break;
                            }
                        }
                        _ = stopped(&mut stop, &mut shutdown) => break,
                    }
                },
                Err(e) => {
                    warn!(
                        "Watch poll failed, cooling down for {:?}: {}",
                        self.cooldown, e
                    );
                    tokio::select! {
                        _ = sleep(self.cooldown) => {}
                        _ = stopped(&mut stop, &mut shutdown) => break,
                    }
                },
            }
        }

        info!("Stopped watching '{}'", self.key);
    }

    /// Fetches the key with the cached version as the change token and
    /// stores the result.
    async fn poll_once(&self) -> Result<Vec<u8>> {
        let known_version = self.inner.cache().version(&self.key);
        let fetched = self.inner.fetch(&self.key, known_version).await?;

        debug!(
            "Polled '{}', now at version {:?}",
            self.key,
            fetched.version()
        );

        let (version, content) = fetched.into_parts();
        Ok(self.inner.cache().write(&self.key, version, content))
    }
}

/// Resolves once either signal asks to stop.
async fn stopped(stop: &mut watch::Receiver<bool>, shutdown: &mut watch::Receiver<bool>) {
    tokio::select! {
        _ = wait_for_stop(stop) => {}
        _ = wait_for_stop(shutdown) => {}
    }
}

/// Resolves once the signal is `true` or its sender is gone.
async fn wait_for_stop(signal: &mut watch::Receiver<bool>) {
    let _ = signal.wait_for(|stopped| *stopped).await;
}
