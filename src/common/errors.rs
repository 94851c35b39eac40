use std::path::PathBuf;
use thiserror::Error;

/// Typed errors for engine operations.
///
/// Per-entry failures during a scan (an unreadable subtree, a file that
/// vanished mid-walk, a file that cannot be hashed) never surface here;
/// scanners skip the entry and keep going. Only whole-command failures
/// and per-call delete outcomes reach the caller. The CLI wraps these in
/// `anyhow` for display.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Filesystem operation failed for a reason other than the ones below
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The OS denied a delete operation
    #[error("permission denied: '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The target of a delete no longer exists.
    ///
    /// Every delete operation returns this same variant for a vanished
    /// path, so callers can refresh stale selection state uniformly.
    #[error("path no longer exists: '{path}'")]
    PathGone { path: PathBuf },

    /// An entire catalog root is unavailable (e.g. no home directory).
    /// This is the one condition that fails a whole scan command.
    #[error("scan root unavailable: {name}")]
    RootUnavailable { name: String },

    /// A path is on the protected list and may never be removed
    #[error("refusing to touch protected path: '{path}'")]
    Protected { path: PathBuf },

    /// A path was rejected by an operation's own validation
    #[error("invalid target '{path}': {reason}")]
    InvalidTarget { path: PathBuf, reason: String },
}

pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    /// Map an `io::Error` from a delete onto the variants above: the
    /// caller distinguishes "already gone" from "denied" by variant.
    pub fn from_delete_io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => EngineError::PathGone {
                path: path.to_path_buf(),
            },
            std::io::ErrorKind::PermissionDenied => EngineError::PermissionDenied {
                path: path.to_path_buf(),
            },
            _ => EngineError::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
