use crate::config::WatchConfig;
use crate::core::diff::select_new;
use crate::core::fetcher::AdvisoryFetcher;
use crate::core::store::WatermarkStore;
use crate::domain::model::{Notification, Watermark};
use crate::domain::ports::{BlobStore, Notifier};
use crate::utils::error::LifecycleError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Polls the advisory feed on a fixed interval and notifies on new entries.
///
/// Lifecycle is Disabled -> Enabled -> Disabled. At most one polling task
/// exists per watcher and cycles never overlap: the loop only takes the next
/// tick after the previous cycle has fully completed.
pub struct AdvisoryWatcher {
    ctx: Arc<CycleContext>,
    lifecycle: Mutex<Lifecycle>,
}

struct Lifecycle {
    config: WatchConfig,
    running: Option<Running>,
}

struct Running {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

struct CycleContext {
    fetcher: AdvisoryFetcher,
    store: WatermarkStore,
    notifier: Arc<dyn Notifier>,
}

impl AdvisoryWatcher {
    pub fn new(
        fetcher: AdvisoryFetcher,
        blobs: Arc<dyn BlobStore>,
        notifier: Arc<dyn Notifier>,
        config: WatchConfig,
    ) -> Self {
        Self {
            ctx: Arc::new(CycleContext {
                fetcher,
                store: WatermarkStore::new(blobs),
                notifier,
            }),
            lifecycle: Mutex::new(Lifecycle {
                config,
                running: None,
            }),
        }
    }

    /// Start the polling task. Returns without waiting for the first cycle;
    /// the first tick fires one full interval after enabling.
    pub async fn enable(&self) -> Result<(), LifecycleError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.running.is_some() {
            return Err(LifecycleError::AlreadyEnabled);
        }

        let period = Duration::from_secs(lifecycle.config.refresh_interval);
        let (stop, stop_rx) = watch::channel(false);
        let ctx = Arc::clone(&self.ctx);
        let task = tokio::spawn(poll_loop(ctx, period, stop_rx));

        lifecycle.running = Some(Running { stop, task });
        info!(period_secs = period.as_secs(), "advisory watcher enabled");
        Ok(())
    }

    /// Signal the polling task to stop and wait for it to exit. Any cycle
    /// already in flight completes first; no cycle starts after this returns.
    pub async fn disable(&self) -> Result<(), LifecycleError> {
        let mut lifecycle = self.lifecycle.lock().await;
        let running = lifecycle
            .running
            .take()
            .ok_or(LifecycleError::AlreadyDisabled)?;

        let _ = running.stop.send(true);
        if let Err(e) = running.task.await {
            warn!("polling task ended abnormally: {e}");
        }

        info!("advisory watcher disabled");
        Ok(())
    }

    pub async fn is_enabled(&self) -> bool {
        self.lifecycle.lock().await.running.is_some()
    }

    pub async fn config(&self) -> WatchConfig {
        self.lifecycle.lock().await.config.clone()
    }

    /// Replace the configuration. Only allowed while disabled; the running
    /// loop snapshots its interval at enable time.
    pub async fn set_config(&self, config: WatchConfig) -> Result<(), LifecycleError> {
        let mut lifecycle = self.lifecycle.lock().await;
        if lifecycle.running.is_some() {
            return Err(LifecycleError::AlreadyEnabled);
        }
        lifecycle.config = config;
        Ok(())
    }

    /// Human-readable status line for the host UI.
    pub async fn status(&self) -> String {
        match self.ctx.store.load().await {
            Ok(watermark) => match watermark.timestamp() {
                Some(ts) => format!("Last advisory was published at {}", ts.to_rfc3339()),
                None => "Feed has not been updated yet".to_string(),
            },
            Err(e) => format!("Could not load watermark: {e}"),
        }
    }
}

/// Waits on the timer and the stop signal, whichever fires first. Stop wins
/// ties so a shutdown never starts another cycle.
async fn poll_loop(ctx: Arc<CycleContext>, period: Duration, mut stop: watch::Receiver<bool>) {
    let mut timer = interval_at(Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = stop.changed() => {
                debug!("stop signal received, exiting poll loop");
                return;
            }
            _ = timer.tick() => {
                ctx.run_cycle().await;
            }
        }
    }
}

impl CycleContext {
    /// One fetch -> diff -> notify -> persist pass. No error escapes: the
    /// cycle degrades or skips, and the next tick tries again.
    async fn run_cycle(&self) {
        let watermark = match self.store.load().await {
            Ok(watermark) => watermark,
            Err(e) => {
                warn!("could not load watermark, treating feed as never seen: {e}");
                Watermark::ZERO
            }
        };

        let entries = match self.fetcher.fetch().await {
            Ok(entries) => entries,
            Err(e) => {
                warn!("feed fetch failed, skipping cycle: {e}");
                return;
            }
        };

        let (new, updated) = select_new(entries, watermark);
        debug!(selected = new.len(), "cycle diff complete");

        for advisory in &new {
            if let Err(e) = self.notifier.notify(Notification::from(advisory)).await {
                // Best effort: the watermark still advances past this entry.
                warn!(title = %advisory.title, "notification failed, entry will not be retried: {e}");
            }
        }

        if let Err(e) = self.store.save(updated).await {
            warn!("could not save watermark, next cycle may re-notify: {e}");
        }
    }
}
