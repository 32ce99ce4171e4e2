use std::time::Instant;

use super::source::{DiskIoCounters, IoCounters};

/// Disk throughput in KiB/s.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Throughput {
    pub read_kbs: f64,
    pub write_kbs: f64,
}

#[derive(Clone, Copy, Debug)]
struct Baseline {
    counters: IoCounters,
    at: Instant,
}

/// Turns successive cumulative byte counters into throughput.
#[derive(Debug, Default)]
pub struct RateCalculator {
    baseline: Option<Baseline>,
    current: Throughput,
}

impl RateCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this tick's counters for the monitored device. `None` means the
    /// device was not reported, in which case nothing changes.
    pub fn observe(&mut self, counters: Option<IoCounters>, now: Instant) -> Throughput {
        let Some(counters) = counters else {
            return self.current;
        };

        if let Some(prev) = self.baseline {
            let elapsed = now.saturating_duration_since(prev.at).as_secs_f64();
            if let Some(rate) = throughput(prev.counters, counters, elapsed) {
                self.current = rate;
            }
        }

        self.baseline = Some(Baseline { counters, at: now });
        self.current
    }
}

/// `None` when `elapsed_secs` cannot produce a finite rate.
pub fn throughput(prev: IoCounters, curr: IoCounters, elapsed_secs: f64) -> Option<Throughput> {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
        return None;
    }
    let read = curr.read_bytes.saturating_sub(prev.read_bytes) as f64;
    let write = curr.write_bytes.saturating_sub(prev.write_bytes) as f64;
    Some(Throughput {
        read_kbs: read / 1024.0 / elapsed_secs,
        write_kbs: write / 1024.0 / elapsed_secs,
    })
}

/// First entry whose identifier matches `device`.
pub fn select_device(devices: &[DiskIoCounters], device: &str) -> Option<IoCounters> {
    devices
        .iter()
        .find(|d| d.device == device)
        .map(|d| d.counters)
}
