use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::sampler::{Sampler, TICK_INTERVAL};
use super::snapshot::PerformanceSnapshot;
use super::source::MetricSource;

/// Read side of the sampling loop. Cloning is cheap; every clone observes the
/// same published snapshots.
#[derive(Clone, Debug)]
pub struct PerformanceMonitor {
    rx: watch::Receiver<Arc<PerformanceSnapshot>>,
}

impl PerformanceMonitor {
    /// Publish zeroed histories and spawn the sampling loop on the current
    /// runtime. The loop is the only writer and runs until `cancel` fires.
    ///
    /// Call once per process, before the first read, and share the returned
    /// monitor by cloning it. Each call samples independently of the others.
    pub fn start<S>(source: S, cancel: CancellationToken) -> (Self, JoinHandle<()>)
    where
        S: MetricSource + Send + 'static,
    {
        let (tx, rx) = watch::channel(Arc::new(PerformanceSnapshot::initial()));
        let task = tokio::spawn(run(Sampler::new(source), tx, cancel));
        (PerformanceMonitor { rx }, task)
    }

    /// Latest complete tick.
    pub fn snapshot(&self) -> Arc<PerformanceSnapshot> {
        self.rx.borrow().clone()
    }
}

async fn run<S: MetricSource>(
    mut sampler: Sampler<S>,
    tx: watch::Sender<Arc<PerformanceSnapshot>>,
    cancel: CancellationToken,
) {
    info!(
        device = sampler.source().monitored_device(),
        interval_ms = TICK_INTERVAL.as_millis() as u64,
        "sampling loop started"
    );

    // First tick one interval out so CPU usage covers a full window.
    let mut ticker = time::interval_at(time::Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let snapshot = sampler.tick(time::Instant::now().into_std());
                tx.send_replace(Arc::new(snapshot));
            }
        }
    }

    info!("sampling loop stopped");
}
