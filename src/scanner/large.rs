//! Threshold-filtered large file scan and largest-subfolder reporting.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog;
use crate::common::errors::EngineResult;
use crate::scanner::walker;

/// Category of a large file, derived from its extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileCategory {
    Video,
    Image,
    Audio,
    Archive,
    Document,
    Application,
    DiskImage,
    Other,
}

/// A file at or above the scan threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeFile {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub category: FileCategory,
    /// Unix timestamp, absent when the filesystem cannot say
    pub last_modified: Option<u64>,
    pub extension: String,
}

/// An oversized immediate subfolder of a heavy app-data root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LargeAppData {
    pub path: String,
    pub name: String,
    pub size: u64,
    /// Which app-data root it was found under
    pub location: String,
}

const VIDEO_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "avi", "mkv", "wmv", "flv", "webm", "m4v", "mpeg", "mpg", "3gp",
];

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "raw", "cr2", "nef", "arw", "heic",
    "heif", "webp", "psd", "svg",
];

const AUDIO_EXTENSIONS: &[&str] = &[
    "mp3", "wav", "flac", "aac", "m4a", "wma", "ogg", "aiff", "alac",
];

const ARCHIVE_EXTENSIONS: &[&str] = &["zip", "rar", "7z", "tar", "gz", "bz2", "xz", "iso", "pkg"];

const DOCUMENT_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "pages", "numbers", "keynote",
];

/// Look up the category for a file extension
pub fn categorize(extension: &str) -> FileCategory {
    let ext = extension.to_lowercase();
    let ext = ext.as_str();

    if VIDEO_EXTENSIONS.contains(&ext) {
        FileCategory::Video
    } else if IMAGE_EXTENSIONS.contains(&ext) {
        FileCategory::Image
    } else if AUDIO_EXTENSIONS.contains(&ext) {
        FileCategory::Audio
    } else if ARCHIVE_EXTENSIONS.contains(&ext) {
        FileCategory::Archive
    } else if DOCUMENT_EXTENSIONS.contains(&ext) {
        FileCategory::Document
    } else if ext == "app" {
        FileCategory::Application
    } else if ext == "dmg" {
        FileCategory::DiskImage
    } else {
        FileCategory::Other
    }
}

/// Recursively scan one directory for files at or above the threshold
pub fn scan_large_files(root: &Path, min_size_bytes: u64) -> Vec<LargeFile> {
    let mut results = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if walker::is_hidden(path) {
            continue;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(_) => continue, // vanished mid-walk
        };
        let size = metadata.len();
        if size < min_size_bytes {
            continue;
        }

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        let last_modified = metadata.modified().ok().and_then(|t| {
            t.duration_since(std::time::SystemTime::UNIX_EPOCH)
                .ok()
                .map(|d| d.as_secs())
        });

        results.push(LargeFile {
            path: path.to_string_lossy().to_string(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            size,
            category: categorize(&extension),
            last_modified,
            extension,
        });
    }

    results
}

/// Scan the common user data roots for files of at least `min_size_mb`,
/// largest first
pub fn scan_common_large_files(min_size_mb: u64) -> EngineResult<Vec<LargeFile>> {
    let home = walker::home_dir()?;
    Ok(scan_common_large_files_in(&home, min_size_mb))
}

/// Same as [`scan_common_large_files`] under an explicit home directory
pub fn scan_common_large_files_in(home: &Path, min_size_mb: u64) -> Vec<LargeFile> {
    let min_size_bytes = min_size_mb * 1024 * 1024;
    let mut all = Vec::new();

    for root in catalog::common_data_roots(home) {
        if root.exists() {
            all.extend(scan_large_files(&root, min_size_bytes));
        }
    }

    all.sort_by(|a, b| b.size.cmp(&a.size));
    debug!(count = all.len(), min_size_mb, "large file scan complete");
    all
}

/// Folders under 1 MB are noise in an app-data report
const APP_DATA_MIN_BYTES: u64 = 1024 * 1024;

fn scan_app_data_root(root: &Path, location: &str) -> Vec<LargeAppData> {
    let read_dir = match std::fs::read_dir(root) {
        Ok(rd) => rd,
        Err(_) => return Vec::new(),
    };

    let mut folders = Vec::new();
    for entry in read_dir.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_dir() || walker::is_hidden(&path) {
            continue;
        }

        let size = walker::dir_size(&path);
        if size < APP_DATA_MIN_BYTES {
            continue;
        }

        folders.push(LargeAppData {
            path: path.to_string_lossy().to_string(),
            name: entry.file_name().to_string_lossy().to_string(),
            size,
            location: location.to_string(),
        });
    }
    folders
}

/// Report the largest immediate subfolders across the heavy app-data
/// roots, descending, capped at the catalog's top-N
pub fn scan_large_app_data() -> EngineResult<Vec<LargeAppData>> {
    let home = walker::home_dir()?;
    Ok(scan_large_app_data_in(&home))
}

/// Same as [`scan_large_app_data`] under an explicit home directory
pub fn scan_large_app_data_in(home: &Path) -> Vec<LargeAppData> {
    let mut folders = Vec::new();
    for (location, root) in catalog::app_data_roots(home) {
        folders.extend(scan_app_data_root(&root, location));
    }

    folders.sort_by(|a, b| b.size.cmp(&a.size));
    folders.truncate(catalog::APP_DATA_TOP_N);
    folders
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_by_extension() {
        assert_eq!(categorize("jpg"), FileCategory::Image);
        assert_eq!(categorize("JPG"), FileCategory::Image);
        assert_eq!(categorize("mp4"), FileCategory::Video);
        assert_eq!(categorize("flac"), FileCategory::Audio);
        assert_eq!(categorize("docx"), FileCategory::Document);
        assert_eq!(categorize("zip"), FileCategory::Archive);
        assert_eq!(categorize("app"), FileCategory::Application);
        assert_eq!(categorize("dmg"), FileCategory::DiskImage);
        assert_eq!(categorize("weird"), FileCategory::Other);
    }

    #[test]
    fn threshold_filters_small_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("big.mp4"), vec![0u8; 3 * 1024 * 1024]).unwrap();
        std::fs::write(dir.path().join("small.txt"), vec![0u8; 1024]).unwrap();

        let files = scan_large_files(dir.path(), 1024 * 1024);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "big.mp4");
        assert_eq!(files[0].category, FileCategory::Video);
        assert_eq!(files[0].size, 3 * 1024 * 1024);
        assert!(files[0].last_modified.is_some());
    }

    #[test]
    fn hidden_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".hidden.mov"), vec![0u8; 2 * 1024 * 1024]).unwrap();

        let files = scan_large_files(dir.path(), 1024 * 1024);
        assert!(files.is_empty());
    }

    #[test]
    fn common_scan_sorts_descending_across_roots() {
        let home = tempfile::tempdir().unwrap();
        let downloads = home.path().join("Downloads");
        let documents = home.path().join("Documents");
        std::fs::create_dir_all(&downloads).unwrap();
        std::fs::create_dir_all(&documents).unwrap();
        std::fs::write(downloads.join("a.zip"), vec![0u8; 2 * 1024 * 1024]).unwrap();
        std::fs::write(documents.join("b.pdf"), vec![0u8; 4 * 1024 * 1024]).unwrap();

        let files = scan_common_large_files_in(home.path(), 1);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "b.pdf");
        assert_eq!(files[1].name, "a.zip");
    }

    #[test]
    fn app_data_cutoff_is_a_binary_megabyte() {
        let home = tempfile::tempdir().unwrap();
        let support = home.path().join("Library/Application Support");
        let under = support.join("JustUnder");
        let over = support.join("JustOver");
        std::fs::create_dir_all(&under).unwrap();
        std::fs::create_dir_all(&over).unwrap();
        // Physical sizes round up to whole blocks, so keep a margin on
        // both sides of the 1,048,576-byte line.
        std::fs::write(under.join("u.bin"), vec![0u8; 1_000_000]).unwrap();
        std::fs::write(over.join("o.bin"), vec![0u8; 1_100_000]).unwrap();

        let folders = scan_large_app_data_in(home.path());
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "JustOver");
    }

    #[test]
    fn app_data_reports_immediate_subfolders_descending() {
        let home = tempfile::tempdir().unwrap();
        let support = home.path().join("Library/Application Support");
        let small = support.join("TinyApp");
        let big = support.join("HeavyApp");
        std::fs::create_dir_all(&small).unwrap();
        std::fs::create_dir_all(&big).unwrap();
        std::fs::write(small.join("s.db"), vec![0u8; 64]).unwrap();
        std::fs::write(big.join("blob.bin"), vec![0u8; 3_000_000]).unwrap();

        let folders = scan_large_app_data_in(home.path());
        assert_eq!(folders.len(), 1, "sub-1MB folders are filtered out");
        assert_eq!(folders[0].name, "HeavyApp");
        assert_eq!(folders[0].location, "ApplicationSupport");
        assert!(folders[0].size >= 3_000_000);
    }
}
