//! Single-path deletion operations.
//!
//! Every operation re-validates its target before acting: stale caller
//! state describing an already-removed path gets the same `PathGone`
//! answer from all of them, and protected paths are refused outright.
//! Caches are removed directly; user data goes to the trash so the user
//! can still recover it.

use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::common::errors::{EngineError, EngineResult};
use crate::common::safety;
use crate::scanner::walker;

/// Shared precondition for every delete operation
fn validate(path: &Path) -> EngineResult<()> {
    if safety::is_protected(path) {
        warn!(path = %path.display(), "refused protected path");
        return Err(EngineError::Protected {
            path: path.to_path_buf(),
        });
    }
    if !path.exists() {
        return Err(EngineError::PathGone {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn remove_path(path: &Path) -> EngineResult<()> {
    let result = if path.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| EngineError::from_delete_io(path, e))
}

/// Delete a cache directory permanently
pub fn delete_cache(path: &Path) -> EngineResult<()> {
    validate(path)?;
    if !path.is_dir() {
        return Err(EngineError::InvalidTarget {
            path: path.to_path_buf(),
            reason: "cache entries are directories".to_string(),
        });
    }
    debug!(path = %path.display(), "deleting cache");
    remove_path(path)
}

/// Empty a developer cache, keeping the directory itself so the tool
/// that owns it finds its expected layout. Returns the bytes freed.
/// Docker data is refused; `docker system prune` owns that lifecycle.
pub fn clean_developer_cache(path: &Path) -> EngineResult<u64> {
    validate(path)?;
    if path.to_string_lossy().contains("com.docker.docker") {
        return Err(EngineError::InvalidTarget {
            path: path.to_path_buf(),
            reason: "use 'docker system prune' to clean Docker data".to_string(),
        });
    }

    let size_before = walker::dir_size(path);
    let read_dir = std::fs::read_dir(path).map_err(|e| EngineError::from_delete_io(path, e))?;
    for entry in read_dir.filter_map(|e| e.ok()) {
        remove_path(&entry.path())?;
    }
    debug!(path = %path.display(), freed = size_before, "cleaned developer cache");
    Ok(size_before)
}

/// Delete an orphan file or directory permanently
pub fn delete_orphan(path: &Path) -> EngineResult<()> {
    validate(path)?;
    debug!(path = %path.display(), "deleting orphan");
    remove_path(path)
}

/// Move a large file to the trash
pub fn move_file_to_trash(path: &Path) -> EngineResult<PathBuf> {
    validate(path)?;
    let trash = default_trash_dir()?;
    move_to_trash_in(path, &trash)
}

/// Move one member of a duplicate group to the trash
pub fn move_duplicate_to_trash(path: &Path) -> EngineResult<PathBuf> {
    move_file_to_trash(path)
}

/// Move an app-data folder to the trash
pub fn delete_large_app_data(path: &Path) -> EngineResult<PathBuf> {
    move_file_to_trash(path)
}

fn default_trash_dir() -> EngineResult<PathBuf> {
    Ok(walker::home_dir()?.join(".Trash"))
}

/// Move a path into an explicit trash directory, suffixing the name on
/// collision the way Finder does.
pub fn move_to_trash_in(path: &Path, trash_dir: &Path) -> EngineResult<PathBuf> {
    std::fs::create_dir_all(trash_dir).map_err(|e| EngineError::Io {
        path: trash_dir.to_path_buf(),
        source: e,
    })?;

    let file_name = path
        .file_name()
        .ok_or_else(|| EngineError::InvalidTarget {
            path: path.to_path_buf(),
            reason: "path has no file name".to_string(),
        })?
        .to_string_lossy()
        .to_string();

    let mut dest = trash_dir.join(&file_name);
    let mut counter = 2u32;
    while dest.exists() {
        dest = trash_dir.join(trash_alias(&file_name, counter));
        counter += 1;
    }

    std::fs::rename(path, &dest).map_err(|e| EngineError::from_delete_io(path, e))?;
    debug!(path = %path.display(), dest = %dest.display(), "moved to trash");
    Ok(dest)
}

/// "report.pdf" -> "report 2.pdf"; extensionless names get the bare suffix
fn trash_alias(file_name: &str, counter: u32) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => format!("{stem} {counter}.{ext}"),
        _ => format!("{file_name} {counter}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_cache_removes_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("com.example.cache");
        std::fs::create_dir(&cache).unwrap();
        std::fs::write(cache.join("blob"), b"x").unwrap();

        delete_cache(&cache).unwrap();
        assert!(!cache.exists());
    }

    #[test]
    fn delete_cache_rejects_plain_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        std::fs::write(&file, b"x").unwrap();

        assert!(matches!(
            delete_cache(&file),
            Err(EngineError::InvalidTarget { .. })
        ));
        assert!(file.exists());
    }

    #[test]
    fn vanished_path_reports_path_gone_everywhere() {
        let gone = Path::new("/tmp/macsweep-definitely-gone-by-now");
        assert!(matches!(
            delete_cache(gone),
            Err(EngineError::PathGone { .. })
        ));
        assert!(matches!(
            clean_developer_cache(gone),
            Err(EngineError::PathGone { .. })
        ));
        assert!(matches!(
            delete_orphan(gone),
            Err(EngineError::PathGone { .. })
        ));
        assert!(matches!(
            move_file_to_trash(gone),
            Err(EngineError::PathGone { .. })
        ));
        assert!(matches!(
            move_duplicate_to_trash(gone),
            Err(EngineError::PathGone { .. })
        ));
        assert!(matches!(
            delete_large_app_data(gone),
            Err(EngineError::PathGone { .. })
        ));
    }

    #[test]
    fn protected_paths_are_refused() {
        assert!(matches!(
            delete_cache(Path::new("/System")),
            Err(EngineError::Protected { .. })
        ));
    }

    #[test]
    fn clean_developer_cache_keeps_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("registry");
        std::fs::create_dir(&cache).unwrap();
        std::fs::write(cache.join("a.crate"), vec![0u8; 1024]).unwrap();
        std::fs::create_dir(cache.join("index")).unwrap();
        std::fs::write(cache.join("index/meta"), b"m").unwrap();

        let freed = clean_developer_cache(&cache).unwrap();
        assert!(freed > 0);
        assert!(cache.exists());
        assert_eq!(std::fs::read_dir(&cache).unwrap().count(), 0);
    }

    #[test]
    fn docker_data_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let docker = dir.path().join("com.docker.docker");
        std::fs::create_dir(&docker).unwrap();

        assert!(matches!(
            clean_developer_cache(&docker),
            Err(EngineError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn trash_move_is_recoverable() {
        let dir = tempfile::tempdir().unwrap();
        let trash = dir.path().join("trash");
        let file = dir.path().join("movie.mp4");
        std::fs::write(&file, b"contents").unwrap();

        let dest = move_to_trash_in(&file, &trash).unwrap();
        assert!(!file.exists());
        assert_eq!(std::fs::read(dest).unwrap(), b"contents");
    }

    #[test]
    fn trash_collision_gets_suffixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let trash = dir.path().join("trash");

        let first = dir.path().join("report.pdf");
        std::fs::write(&first, b"one").unwrap();
        move_to_trash_in(&first, &trash).unwrap();

        let second = dir.path().join("report.pdf");
        std::fs::write(&second, b"two").unwrap();
        let dest = move_to_trash_in(&second, &trash).unwrap();

        assert_eq!(dest.file_name().unwrap(), "report 2.pdf");
        assert_eq!(std::fs::read(dest).unwrap(), b"two");
    }

    #[test]
    fn trash_alias_handles_extensionless_names() {
        assert_eq!(trash_alias("Data", 2), "Data 2");
        assert_eq!(trash_alias("archive.tar.gz", 3), "archive.tar 3.gz");
    }
}
