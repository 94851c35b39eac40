//! Developer environment detection and named dev-cache reporting.
//!
//! Unlike the cache classifier, which walks whatever it finds, this
//! scanner iterates a fixed catalog. Entries with no on-disk match are
//! still reported with `exists: false` and size 0 so the presentation
//! layer can show the full picture.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::catalog;
use crate::common::errors::EngineResult;
use crate::scanner::walker;

/// A known developer cache location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeveloperCache {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub description: String,
    pub exists: bool,
    pub safe_to_clean: bool,
}

/// True when any developer-tool marker path exists on this machine
pub fn is_developer_user() -> bool {
    match walker::home_dir() {
        Ok(home) => is_developer_user_in(&home),
        Err(_) => false,
    }
}

/// Same as [`is_developer_user`] against an explicit home directory
pub fn is_developer_user_in(home: &Path) -> bool {
    catalog::developer_markers(home).iter().any(|p| p.exists())
}

/// Report every catalog entry, sized only when present, largest first.
/// Docker Desktop data is appended when found, flagged not cleanable
/// here because `docker system prune` owns that lifecycle.
pub fn scan_developer_caches() -> EngineResult<Vec<DeveloperCache>> {
    let home = walker::home_dir()?;
    Ok(scan_developer_caches_in(&home))
}

/// Same as [`scan_developer_caches`] against an explicit home directory
pub fn scan_developer_caches_in(home: &Path) -> Vec<DeveloperCache> {
    let mut caches: Vec<DeveloperCache> = catalog::developer_cache_catalog(home)
        .into_iter()
        .map(|spec| {
            let exists = spec.path.exists();
            let size = if exists { walker::dir_size(&spec.path) } else { 0 };
            DeveloperCache {
                name: spec.name.to_string(),
                path: spec.path.to_string_lossy().to_string(),
                size,
                description: spec.description.to_string(),
                exists,
                safe_to_clean: spec.safe_to_clean,
            }
        })
        .collect();

    let docker = catalog::docker_data_dir(home);
    if docker.exists() {
        caches.push(DeveloperCache {
            name: "Docker Desktop".to_string(),
            path: docker.to_string_lossy().to_string(),
            size: walker::dir_size(&docker),
            description: "Docker Desktop data (use 'docker system prune' to clean)".to_string(),
            exists: true,
            safe_to_clean: false,
        });
    }

    caches.sort_by(|a, b| b.size.cmp(&a.size));
    debug!(count = caches.len(), "developer cache scan complete");
    caches
}
