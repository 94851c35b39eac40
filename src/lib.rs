//! # Macsweep
//!
//! A disk-reclaim scan and cleanup engine for macOS.
//!
//! Macsweep walks well-known directory sets and reports what can be
//! reclaimed: application caches, developer tool caches, leftover data
//! from uninstalled apps, oversized files and folders, and duplicate
//! file content. A separate executor removes a user-selected subset,
//! tolerating partial failure.
//!
//! The engine is stateless: every scan re-walks the filesystem and
//! returns an immutable snapshot. Callers (the bundled CLI, or any other
//! presentation layer) own whatever session state they keep between
//! calls. The full command surface is re-exported from the crate root.

pub mod catalog;
pub mod cleaner;
pub mod cli;
pub mod common;
pub mod dedupe;
pub mod scanner;
pub mod system;

// The command surface consumed by presentation layers.
pub use cleaner::batch::{BatchDelete, BatchEvent, BatchSummary};
pub use cleaner::executor::{
    clean_developer_cache, delete_cache, delete_large_app_data, delete_orphan,
    move_duplicate_to_trash, move_file_to_trash,
};
pub use common::errors::{EngineError, EngineResult};
pub use dedupe::finder::scan_common_duplicates;
pub use scanner::caches::scan_all_caches;
pub use scanner::dev::{is_developer_user, scan_developer_caches};
pub use scanner::large::{scan_common_large_files, scan_large_app_data};
pub use scanner::orphans::scan_orphan_files;
pub use system::{get_system_info, reveal_in_finder};
