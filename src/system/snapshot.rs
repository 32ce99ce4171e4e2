use std::io::Write;

use serde::Serialize;

use super::history::{HISTORY_CAPACITY, HistoryStore};

/// Everything published by one sampling tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PerformanceSnapshot {
    #[serde(rename = "cpuHistory")]
    pub cpu_history: Vec<f64>,
    #[serde(rename = "memHistory")]
    pub mem_history: Vec<f64>,
    #[serde(rename = "diskHistory")]
    pub disk_history: Vec<f64>,
    #[serde(rename = "cpuFreq")]
    pub cpu_freq_mhz: f64,
    #[serde(rename = "memUsedMB")]
    pub mem_used_mb: f64,
    #[serde(rename = "memTotalMB")]
    pub mem_total_mb: f64,
    #[serde(rename = "diskUsedGB")]
    pub disk_used_gb: f64,
    #[serde(rename = "diskTotalGB")]
    pub disk_total_gb: f64,
    #[serde(rename = "diskReadKBs")]
    pub disk_read_kbs: f64,
    #[serde(rename = "diskWriteKBs")]
    pub disk_write_kbs: f64,
}

impl PerformanceSnapshot {
    /// State before the first tick: full-width zero histories, zero scalars.
    pub fn initial() -> Self {
        Self::with_histories(&HistoryStore::zeroed(HISTORY_CAPACITY))
    }

    pub(crate) fn with_histories(history: &HistoryStore) -> Self {
        PerformanceSnapshot {
            cpu_history: history.cpu().to_vec(),
            mem_history: history.memory().to_vec(),
            disk_history: history.disk().to_vec(),
            ..Default::default()
        }
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }
}
