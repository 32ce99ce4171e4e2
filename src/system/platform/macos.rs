use std::path::PathBuf;

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn primary_mount_point() -> PathBuf {
        // The sealed system volume and the data volume are both reachable
        // through the root firmlink.
        PathBuf::from("/")
    }
}
