const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

pub fn bytes_to_mb(bytes: u64) -> f64 {
    bytes as f64 / MIB
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

/// Percentage of `total_gb` in use, or 0 when the total is unknown.
pub fn disk_used_percent(used_gb: f64, total_gb: f64) -> f64 {
    if total_gb <= 0.0 {
        return 0.0;
    }
    used_gb / total_gb * 100.0
}

pub fn format_bytes(bytes: u64) -> String {
    let b = bytes as f64;
    if b >= GIB {
        format!("{:.1} GB", b / GIB)
    } else if b >= MIB {
        format!("{:.1} MB", b / MIB)
    } else if b >= KIB {
        format!("{:.0} KB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}
