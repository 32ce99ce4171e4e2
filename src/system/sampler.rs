use std::collections::HashSet;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::history::{HISTORY_CAPACITY, HistoryStore};
use super::rate::{RateCalculator, select_device};
use super::snapshot::PerformanceSnapshot;
use super::source::{DiskUsageStat, MemoryStat, MetricSource, SourceError};
use crate::units::{bytes_to_gb, bytes_to_mb, disk_used_percent};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// One tick's worth of work: query the source, derive rates, append to the
/// histories and assemble the snapshot to publish.
pub struct Sampler<S> {
    source: S,
    history: HistoryStore,
    rates: RateCalculator,
    degraded: HashSet<&'static str>,
}

impl<S: MetricSource> Sampler<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            history: HistoryStore::zeroed(HISTORY_CAPACITY),
            rates: RateCalculator::new(),
            degraded: HashSet::new(),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn tick(&mut self, now: Instant) -> PerformanceSnapshot {
        let _span = tracing::debug_span!("sampler.tick").entered();

        let cpu = self.source.cpu_percent();
        let cpu_percent = self.settle("cpu", cpu, 0.0);
        let memory = self.source.memory();
        let memory = self.settle("memory", memory, MemoryStat::default());
        let disk = self.source.disk_usage();
        let disk = self.settle("disk_usage", disk, DiskUsageStat::default());
        let freq = self.source.cpu_frequency_mhz();
        let cpu_freq_mhz = self.settle("cpu_frequency", freq, 0.0);
        let io = self.source.disk_io();
        let devices = self.settle("disk_io", io, Vec::new());

        let disk_used_gb = bytes_to_gb(disk.used_bytes);
        let disk_total_gb = bytes_to_gb(disk.total_bytes);
        let disk_percent = disk_used_percent(disk_used_gb, disk_total_gb);

        let counters = select_device(&devices, self.source.monitored_device());
        let throughput = self.rates.observe(counters, now);

        self.history.record(cpu_percent, memory.used_percent, disk_percent);

        PerformanceSnapshot {
            cpu_freq_mhz,
            mem_used_mb: bytes_to_mb(memory.used_bytes),
            mem_total_mb: bytes_to_mb(memory.total_bytes),
            disk_used_gb,
            disk_total_gb,
            disk_read_kbs: throughput.read_kbs,
            disk_write_kbs: throughput.write_kbs,
            ..PerformanceSnapshot::with_histories(&self.history)
        }
    }

    /// Replace a failed query with its fallback. The first failure of a
    /// metric is a warning; repeats drop to debug until it recovers.
    fn settle<T>(
        &mut self,
        metric: &'static str,
        result: Result<T, SourceError>,
        fallback: T,
    ) -> T {
        match result {
            Ok(value) => {
                if self.degraded.remove(metric) {
                    info!(metric, "metric source recovered");
                }
                value
            }
            Err(error) => {
                if self.degraded.insert(metric) {
                    warn!(metric, %error, "metric source unavailable, using fallback");
                } else {
                    debug!(metric, %error, "metric source still unavailable");
                }
                fallback
            }
        }
    }
}
