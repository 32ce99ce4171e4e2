use sysinfo::{
    CpuRefreshKind, Disk, DiskRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System,
};

use super::platform;
use super::source::{
    DiskIoCounters, DiskUsageStat, IoCounters, MemoryStat, MetricSource, SourceError,
    memory_used_percent,
};

/// `MetricSource` backed by `sysinfo`.
pub struct Collector {
    sys: System,
    disks: Disks,
    device: String,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let device = platform::primary_mount_point().display().to_string();
        Self::for_device(device)
    }

    /// Monitor the volume mounted at `device` instead of the platform root.
    pub fn for_device(device: impl Into<String>) -> Self {
        // Prime CPU usage so the first tick measures a real interval.
        let sys = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage().with_frequency())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Collector {
            sys,
            disks: Disks::new_with_refreshed_list(),
            device: device.into(),
        }
    }

    fn monitored_disk(&self) -> Option<&Disk> {
        self.disks
            .list()
            .iter()
            .find(|d| d.mount_point().display().to_string() == self.device)
    }
}

impl MetricSource for Collector {
    fn cpu_percent(&mut self) -> Result<f64, SourceError> {
        self.sys.refresh_cpu_usage();
        let cpus = self.sys.cpus();
        if cpus.is_empty() {
            return Err(SourceError::NoCpus);
        }
        let sum: f64 = cpus.iter().map(|c| f64::from(c.cpu_usage())).sum();
        Ok(sum / cpus.len() as f64)
    }

    fn cpu_frequency_mhz(&mut self) -> Result<f64, SourceError> {
        self.sys.refresh_cpu_frequency();
        self.sys
            .cpus()
            .first()
            .map(|c| c.frequency() as f64)
            .ok_or(SourceError::NoCpus)
    }

    fn memory(&mut self) -> Result<MemoryStat, SourceError> {
        self.sys.refresh_memory();
        let total_bytes = self.sys.total_memory();
        if total_bytes == 0 {
            return Err(SourceError::NoMemory);
        }
        let used_bytes = self.sys.used_memory();
        Ok(MemoryStat {
            used_bytes,
            total_bytes,
            used_percent: memory_used_percent(used_bytes, total_bytes),
        })
    }

    fn disk_usage(&mut self) -> Result<DiskUsageStat, SourceError> {
        self.disks.refresh_specifics(true, DiskRefreshKind::nothing().with_storage());
        let disk = self
            .monitored_disk()
            .ok_or_else(|| SourceError::VolumeNotFound(self.device.clone()))?;
        let total_bytes = disk.total_space();
        Ok(DiskUsageStat {
            used_bytes: total_bytes.saturating_sub(disk.available_space()),
            total_bytes,
        })
    }

    fn disk_io(&mut self) -> Result<Vec<DiskIoCounters>, SourceError> {
        self.disks.refresh_specifics(false, DiskRefreshKind::nothing().with_io_usage());
        let devices: Vec<DiskIoCounters> = self
            .disks
            .list()
            .iter()
            .map(|d| {
                let usage = d.usage();
                DiskIoCounters {
                    device: d.mount_point().display().to_string(),
                    counters: IoCounters {
                        read_bytes: usage.total_read_bytes,
                        write_bytes: usage.total_written_bytes,
                    },
                }
            })
            .collect();
        if devices.is_empty() {
            return Err(SourceError::NoDiskCounters);
        }
        Ok(devices)
    }

    fn monitored_device(&self) -> &str {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    #[test]
    fn host_queries_return_sane_values() {
        let mut collector = Collector::new();
        if let Ok(freq) = collector.cpu_frequency_mhz() {
            assert!(freq.is_finite() && freq >= 0.0);
        }
        if let Ok(mem) = collector.memory() {
            assert!(mem.total_bytes > 0);
            assert!(mem.used_bytes <= mem.total_bytes);
            assert!((0.0..=100.0).contains(&mem.used_percent));
        }
        if let Ok(disk) = collector.disk_usage() {
            assert!(disk.used_bytes <= disk.total_bytes);
        }
        if let Ok(devices) = collector.disk_io() {
            assert!(!devices.is_empty());
            assert!(devices.iter().all(|d| !d.device.is_empty()));
        }
    }

    #[test]
    fn disk_io_refreshes_without_disk_usage() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("target");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("perfmon_disk_io_refresh.bin");

        let mut collector = Collector::new();
        let Some(before) = counters_for(&mut collector, &path) else {
            return;
        };
        // Volumes without block-device stats (tmpfs, overlay) report zero.
        if before.write_bytes == 0 {
            return;
        }

        {
            let mut file = std::fs::File::create(&path).unwrap();
            let chunk = vec![0xa5u8; 1024 * 1024];
            for _ in 0..32 {
                file.write_all(&chunk).unwrap();
            }
            file.sync_all().unwrap();
        }
        let after = counters_for(&mut collector, &path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(
            after.write_bytes > before.write_bytes,
            "write counter did not advance: {before:?} -> {after:?}"
        );
    }

    /// Counters of the volume holding `path`, read through `disk_io` only.
    fn counters_for(collector: &mut Collector, path: &Path) -> Option<IoCounters> {
        let devices = collector.disk_io().ok()?;
        devices
            .iter()
            .filter(|d| path.starts_with(&d.device))
            .max_by_key(|d| d.device.len())
            .map(|d| d.counters)
    }

    #[test]
    fn unknown_volume_is_reported() {
        let mut collector = Collector::for_device("/definitely/not/a/mount");
        match collector.disk_usage() {
            Err(SourceError::VolumeNotFound(device)) => {
                assert_eq!(device, "/definitely/not/a/mount");
            }
            other => panic!("expected VolumeNotFound, got {other:?}"),
        }
    }

    #[test]
    fn cpu_percent_is_finite() {
        let mut collector = Collector::new();
        if let Ok(pct) = collector.cpu_percent() {
            assert!(pct.is_finite());
            assert!(pct >= 0.0);
        }
    }
}
