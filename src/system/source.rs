use thiserror::Error;

/// A metric the operating system could not provide this tick.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("no logical CPUs reported")]
    NoCpus,
    #[error("memory statistics unavailable")]
    NoMemory,
    #[error("volume `{0}` not found")]
    VolumeNotFound(String),
    #[error("disk I/O counters unavailable")]
    NoDiskCounters,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MemoryStat {
    pub used_bytes: u64,
    pub total_bytes: u64,
    pub used_percent: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiskUsageStat {
    pub used_bytes: u64,
    pub total_bytes: u64,
}

/// Cumulative bytes since boot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IoCounters {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiskIoCounters {
    pub device: String,
    pub counters: IoCounters,
}

/// OS queries used by the sampler. Every query is independent: one failing
/// must not affect the others in the same tick.
pub trait MetricSource {
    /// Mean utilization across logical cores since the previous call.
    fn cpu_percent(&mut self) -> Result<f64, SourceError>;
    fn cpu_frequency_mhz(&mut self) -> Result<f64, SourceError>;
    fn memory(&mut self) -> Result<MemoryStat, SourceError>;
    fn disk_usage(&mut self) -> Result<DiskUsageStat, SourceError>;
    fn disk_io(&mut self) -> Result<Vec<DiskIoCounters>, SourceError>;
    /// Identifier of the volume that `disk_usage` reports and whose
    /// counters drive throughput.
    fn monitored_device(&self) -> &str;
}

pub fn memory_used_percent(used_bytes: u64, total_bytes: u64) -> f64 {
    if total_bytes == 0 {
        return 0.0;
    }
    used_bytes as f64 / total_bytes as f64 * 100.0
}
