//! Host and disk information, plus the Finder reveal escape hatch.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::common::errors::{EngineError, EngineResult};
use crate::scanner::walker;

/// Disk usage of the root volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiskUsage {
    pub total_bytes: u64,
    pub free_bytes: u64,
    pub used_bytes: u64,
    pub used_percentage: f64,
}

/// Snapshot of the host this engine is running on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub username: String,
    pub home_directory: String,
    pub disk_usage: DiskUsage,
}

/// Query the root volume through statvfs. Free space is what an
/// unprivileged user can actually claim (f_bavail, not f_bfree).
#[cfg(unix)]
pub fn disk_usage() -> DiskUsage {
    use std::ffi::CString;
    use std::mem::MaybeUninit;

    let path = CString::new("/").expect("static path contains no NUL");
    let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();

    // SAFETY: statvfs writes into the provided buffer on success, and we
    // only read it after checking the return code.
    let rc = unsafe { libc::statvfs(path.as_ptr(), stat.as_mut_ptr()) };
    if rc != 0 {
        return DiskUsage {
            total_bytes: 0,
            free_bytes: 0,
            used_bytes: 0,
            used_percentage: 0.0,
        };
    }

    let stat = unsafe { stat.assume_init() };
    let block_size = stat.f_frsize as u64;
    let total = stat.f_blocks as u64 * block_size;
    let free = stat.f_bavail as u64 * block_size;
    let used = total.saturating_sub(free);
    let used_percentage = if total == 0 {
        0.0
    } else {
        used as f64 / total as f64 * 100.0
    };

    DiskUsage {
        total_bytes: total,
        free_bytes: free,
        used_bytes: used,
        used_percentage,
    }
}

#[cfg(not(unix))]
pub fn disk_usage() -> DiskUsage {
    DiskUsage {
        total_bytes: 0,
        free_bytes: 0,
        used_bytes: 0,
        used_percentage: 0.0,
    }
}

/// Gather host identity and root-volume usage
pub fn get_system_info() -> EngineResult<SystemInfo> {
    let home = walker::home_dir()?;

    Ok(SystemInfo {
        hostname: sysinfo::System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        username: std::env::var("USER").unwrap_or_else(|_| "Unknown".to_string()),
        home_directory: home.to_string_lossy().to_string(),
        disk_usage: disk_usage(),
    })
}

/// Reveal a path in Finder via `open -R`
pub fn reveal_in_finder(path: &Path) -> EngineResult<()> {
    if !path.exists() {
        return Err(EngineError::PathGone {
            path: path.to_path_buf(),
        });
    }

    std::process::Command::new("open")
        .arg("-R")
        .arg(path)
        .spawn()
        .map_err(|e| EngineError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(())
}
