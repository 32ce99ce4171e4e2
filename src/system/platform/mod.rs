use std::path::PathBuf;

pub trait PlatformExtensions {
    /// Mount point of the volume the OS boots from.
    fn primary_mount_point() -> PathBuf;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn primary_mount_point() -> PathBuf {
    platform_impl::Platform::primary_mount_point()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_mount_point_is_absolute() {
        assert!(primary_mount_point().is_absolute());
    }
}
