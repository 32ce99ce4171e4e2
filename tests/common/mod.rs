#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use perfmon::system::source::{
    DiskIoCounters, DiskUsageStat, IoCounters, MemoryStat, MetricSource, SourceError,
};

pub const GIB: u64 = 1024 * 1024 * 1024;

/// Deterministic source: CPU reads 1.0, 2.0, 3.0... on successive ticks and
/// disk counters grow by 1 MiB read / 2 MiB written per tick.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    pub ticks: Arc<AtomicU64>,
    pub fail_disk: Arc<AtomicBool>,
}

impl MetricSource for ScriptedSource {
    fn cpu_percent(&mut self) -> Result<f64, SourceError> {
        let n = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(n as f64)
    }

    fn cpu_frequency_mhz(&mut self) -> Result<f64, SourceError> {
        Ok(2400.0)
    }

    fn memory(&mut self) -> Result<MemoryStat, SourceError> {
        Ok(MemoryStat {
            used_bytes: 4 * GIB,
            total_bytes: 16 * GIB,
            used_percent: 25.0,
        })
    }

    fn disk_usage(&mut self) -> Result<DiskUsageStat, SourceError> {
        if self.fail_disk.load(Ordering::SeqCst) {
            return Err(SourceError::VolumeNotFound("/".to_string()));
        }
        Ok(DiskUsageStat {
            used_bytes: 50 * GIB,
            total_bytes: 200 * GIB,
        })
    }

    fn disk_io(&mut self) -> Result<Vec<DiskIoCounters>, SourceError> {
        let n = self.ticks.load(Ordering::SeqCst);
        Ok(vec![DiskIoCounters {
            device: "/".to_string(),
            counters: IoCounters {
                read_bytes: n * 1024 * 1024,
                write_bytes: n * 2 * 1024 * 1024,
            },
        }])
    }

    fn monitored_device(&self) -> &str {
        "/"
    }
}
