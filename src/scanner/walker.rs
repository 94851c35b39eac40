//! Shared traversal helpers used by every scanner.

use std::fs::Metadata;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::common::errors::{EngineError, EngineResult};

/// Resolve the current user's home directory.
///
/// A machine with no resolvable home has no catalog roots at all, so
/// this is the one failure that aborts a whole scan command.
pub fn home_dir() -> EngineResult<PathBuf> {
    dirs::home_dir().ok_or(EngineError::RootUnavailable {
        name: "home directory".to_string(),
    })
}

/// Physical size of a file: disk blocks actually allocated, which keeps
/// sparse files like Docker.raw honest. Falls back to the logical length
/// on non-unix targets.
pub fn physical_size(metadata: &Metadata) -> u64 {
    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        // st_blocks counts 512-byte units
        metadata.blocks() * 512
    }
    #[cfg(not(unix))]
    {
        metadata.len()
    }
}

/// Total physical size of every regular file under `path`.
///
/// Symlinks are never followed, so the sum cannot wander into external
/// trees. Unreadable entries are skipped; a subtree that vanishes or
/// denies access mid-walk costs us its bytes, not the scan.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| physical_size(&m))
        .sum()
}

/// Size of a single entry: recursive for directories, logical length
/// for plain files.
pub fn entry_size(path: &Path) -> u64 {
    if path.is_dir() {
        dir_size(path)
    } else {
        std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
    }
}

/// True when the file name starts with a dot
pub fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
