//! Cache discovery and classification.
//!
//! Walks each catalog cache root, sizes every top-level child, and
//! classifies it through an ordered rule list. The rule order is the
//! contract: developer-tool patterns win over browser patterns, browsers
//! over system patterns, and anything left either looks like a generic
//! application cache or stays Unknown.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::catalog::{self, CacheRoot};
use crate::common::errors::EngineResult;
use crate::scanner::walker;

/// Types of cache found on macOS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheType {
    Browser,
    System,
    Application,
    Developer,
    Unknown,
}

/// A cache entry found on the system. Produced fresh on each scan;
/// the path is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub cache_type: CacheType,
    pub is_developer_related: bool,
    pub is_safe_to_delete: bool,
    pub description: String,
}

const DEVELOPER_PATTERNS: &[&str] = &[
    "com.apple.dt.Xcode",
    "org.cocoapods",
    "com.microsoft.VSCode",
    "JetBrains",
    "npm",
    "yarn",
    "cargo",
    "gradle",
    "maven",
    "homebrew",
    "pip",
    "composer",
    "go-build",
    "rustup",
    "CocoaPods",
    "com.docker",
    "Android",
];

const BROWSER_PATTERNS: &[&str] = &[
    "com.apple.Safari",
    "com.google.Chrome",
    "org.mozilla.firefox",
    "com.microsoft.edgemac",
    "com.brave.Browser",
    "com.operasoftware.Opera",
    "company.thebrowser.Browser",
];

const SYSTEM_PATTERNS: &[&str] = &["com.apple.", "CloudKit", "CoreSimulator"];

/// Ordered classification rules, evaluated top to bottom. First match
/// wins, which makes the Developer-before-Browser tie-break auditable.
const CLASSIFICATION_RULES: &[(CacheType, &[&str])] = &[
    (CacheType::Developer, DEVELOPER_PATTERNS),
    (CacheType::Browser, BROWSER_PATTERNS),
    (CacheType::System, SYSTEM_PATTERNS),
];

/// Caches that core OS functionality depends on. Deleting these logs the
/// user out of iCloud sync state or forces expensive rebuilds, so they
/// are never offered as safe regardless of classification.
const PROTECTED_CACHES: &[&str] = &[
    "com.apple.LaunchServices",
    "com.apple.iconservices",
    "com.apple.FontRegistry",
    "CloudKit",
    "CoreSimulator",
];

/// Classify a cache directory name through the ordered rule list
pub fn classify(name: &str) -> CacheType {
    for (cache_type, patterns) in CLASSIFICATION_RULES {
        if patterns.iter().any(|p| name.contains(p)) {
            return cache_type.clone();
        }
    }
    // Reverse-DNS style names are generic application caches; anything
    // else we cannot vouch for.
    if looks_like_bundle_id(name) {
        CacheType::Application
    } else {
        CacheType::Unknown
    }
}

fn looks_like_bundle_id(name: &str) -> bool {
    let segments: Vec<&str> = name.split('.').collect();
    segments.len() >= 2 && segments.iter().all(|s| !s.is_empty())
}

/// Whether a cache entry matches any developer-tool pattern
pub fn is_developer_cache(name: &str) -> bool {
    DEVELOPER_PATTERNS.iter().any(|p| name.contains(p))
}

/// Safe-to-delete defaults to true. System caches never qualify, and
/// neither does anything on the protected allowlist.
pub fn is_safe_to_delete(name: &str, cache_type: &CacheType) -> bool {
    if *cache_type == CacheType::System {
        return false;
    }
    !PROTECTED_CACHES.iter().any(|p| name.contains(p))
}

fn describe(name: &str, cache_type: &CacheType) -> String {
    match cache_type {
        CacheType::Browser => format!(
            "Browser cache for {}",
            name.split('.').next_back().unwrap_or(name)
        ),
        CacheType::Developer => "Developer tools cache".to_string(),
        CacheType::System => "System cache (use caution)".to_string(),
        CacheType::Application => "Application cache".to_string(),
        CacheType::Unknown => "Unknown cache type".to_string(),
    }
}

/// Scan a single cache root. Every top-level directory becomes one
/// entry; children are sized in parallel. A child that cannot be read
/// is skipped, the root's remaining entries still come back.
pub fn scan_cache_root(root: &CacheRoot) -> Vec<CacheEntry> {
    let read_dir = match std::fs::read_dir(&root.path) {
        Ok(rd) => rd,
        Err(e) => {
            debug!(root = %root.path.display(), error = %e, "cache root unreadable, skipping");
            return Vec::new();
        }
    };

    let children: Vec<_> = read_dir
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .collect();

    children
        .par_iter()
        .map(|entry| {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();
            let size = walker::dir_size(&path);

            let cache_type = if root.system {
                CacheType::System
            } else {
                classify(&name)
            };

            CacheEntry {
                path: path.to_string_lossy().to_string(),
                name: name.clone(),
                size,
                cache_type: cache_type.clone(),
                is_developer_related: is_developer_cache(&name),
                is_safe_to_delete: is_safe_to_delete(&name, &cache_type),
                description: describe(&name, &cache_type),
            }
        })
        .collect()
}

/// Scan every catalog cache root and return all entries, largest first.
///
/// Individual unreadable subtrees degrade to skips; only a missing home
/// directory fails the command.
pub fn scan_all_caches() -> EngineResult<Vec<CacheEntry>> {
    let home = walker::home_dir()?;
    scan_all_caches_in(&home)
}

/// Same as [`scan_all_caches`] but rooted at an explicit home directory
pub fn scan_all_caches_in(home: &Path) -> EngineResult<Vec<CacheEntry>> {
    let mut entries = Vec::new();
    for root in catalog::cache_roots(home) {
        entries.extend(scan_cache_root(&root));
    }
    entries.sort_by(|a, b| b.size.cmp(&a.size));
    debug!(count = entries.len(), "cache scan complete");
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_follows_rule_order() {
        assert_eq!(classify("com.apple.Safari"), CacheType::Browser);
        assert_eq!(classify("org.mozilla.firefox"), CacheType::Browser);
        assert_eq!(classify("com.apple.dt.Xcode"), CacheType::Developer);
        assert_eq!(classify("cargo"), CacheType::Developer);
        assert_eq!(classify("com.apple.System"), CacheType::System);
        assert_eq!(classify("com.myapp.Something"), CacheType::Application);
        assert_eq!(classify("randomfolder"), CacheType::Unknown);
    }

    #[test]
    fn developer_beats_browser_when_both_match() {
        // Synthetic name matching both lists outright
        assert_eq!(
            classify("com.apple.Safari-npm"),
            CacheType::Developer,
            "developer patterns must take priority over browser patterns"
        );
    }

    #[test]
    fn system_caches_are_never_safe() {
        assert!(!is_safe_to_delete("anything", &CacheType::System));
    }

    #[test]
    fn protected_caches_are_never_safe() {
        assert!(!is_safe_to_delete(
            "com.apple.LaunchServices-134",
            &CacheType::Application
        ));
        assert!(!is_safe_to_delete("CloudKit", &CacheType::Unknown));
    }

    #[test]
    fn ordinary_caches_default_to_safe() {
        assert!(is_safe_to_delete("com.spotify.client", &CacheType::Application));
        assert!(is_safe_to_delete("npm", &CacheType::Developer));
        assert!(is_safe_to_delete("misc-stuff", &CacheType::Unknown));
    }

    #[test]
    fn scan_cache_root_reports_each_child_dir() {
        let dir = tempfile::tempdir().unwrap();
        let safari = dir.path().join("com.apple.Safari");
        std::fs::create_dir(&safari).unwrap();
        std::fs::write(safari.join("Cache.db"), b"data").unwrap();
        // Plain files at the top level are not cache entries
        std::fs::write(dir.path().join("stray.txt"), b"x").unwrap();

        let root = CacheRoot {
            path: dir.path().to_path_buf(),
            system: false,
        };
        let entries = scan_cache_root(&root);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].cache_type, CacheType::Browser);
        assert!(entries[0].is_safe_to_delete);
        assert!(entries[0].size > 0);
    }

    #[test]
    fn scan_cache_root_skips_missing_root() {
        let root = CacheRoot {
            path: std::path::PathBuf::from("/no/such/cache/root"),
            system: false,
        };
        assert!(scan_cache_root(&root).is_empty());
    }

    #[test]
    fn system_root_forces_system_classification() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("whatever")).unwrap();

        let root = CacheRoot {
            path: dir.path().to_path_buf(),
            system: true,
        };
        let entries = scan_cache_root(&root);
        assert_eq!(entries[0].cache_type, CacheType::System);
        assert!(!entries[0].is_safe_to_delete);
    }
}
