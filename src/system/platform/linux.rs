use std::path::PathBuf;

use super::PlatformExtensions;

pub struct Platform;

impl PlatformExtensions for Platform {
    fn primary_mount_point() -> PathBuf {
        PathBuf::from("/")
    }
}
