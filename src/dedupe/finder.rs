//! Two-phase duplicate grouping.
//!
//! Phase 1 buckets candidate files by exact byte size, which discards
//! the overwhelming majority outright: a file with a unique size has no
//! duplicate. Phase 2 confirms content equality by hash, preceded by a
//! 4 KB prefix-hash pruning pass inside each bucket. Member order within
//! a group is discovery order; the first file found is the retained
//! original, every deletion targets the rest.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::catalog;
use crate::common::errors::EngineResult;
use crate::dedupe::hasher;
use crate::scanner::walker;

/// A single member of a duplicate group
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateFile {
    pub path: String,
    pub name: String,
}

/// Files sharing identical content. `files[0]` is the retained copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateGroup {
    /// Content digest, the group key
    pub hash: String,
    pub files: Vec<DuplicateFile>,
    /// Byte size every member shares
    pub file_size: u64,
    /// `file_size * (files.len() - 1)`
    pub total_wasted: u64,
}

/// Walk the common data roots and group duplicate content of at least
/// `min_size_mb`, biggest waste first
pub fn scan_common_duplicates(min_size_mb: u64) -> EngineResult<Vec<DuplicateGroup>> {
    let home = walker::home_dir()?;
    Ok(scan_common_duplicates_in(&home, min_size_mb))
}

/// Same as [`scan_common_duplicates`] under an explicit home directory
pub fn scan_common_duplicates_in(home: &Path, min_size_mb: u64) -> Vec<DuplicateGroup> {
    let roots: Vec<PathBuf> = catalog::common_data_roots(home)
        .into_iter()
        .filter(|r| r.exists())
        .collect();
    find_duplicates(&roots, min_size_mb * 1024 * 1024)
}

/// Run the full pipeline over an explicit set of roots.
///
/// All roots feed one candidate set, so copies living in different
/// roots still group together.
pub fn find_duplicates(roots: &[PathBuf], min_size_bytes: u64) -> Vec<DuplicateGroup> {
    // Phase 1: size buckets, in discovery order
    let mut buckets: HashMap<u64, Vec<PathBuf>> = HashMap::new();
    for root in roots {
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
            let size = match entry.metadata() {
                Ok(m) => m.len(),
                Err(_) => continue,
            };
            if size >= min_size_bytes {
                buckets.entry(size).or_default().push(path.to_path_buf());
            }
        }
    }

    // Singleton buckets cannot hold duplicates
    buckets.retain(|_, files| files.len() >= 2);
    debug!(buckets = buckets.len(), "size bucketing complete");

    // Process buckets largest-size first so the final stable sort breaks
    // total_wasted ties the same way on every run.
    let mut buckets: Vec<(u64, Vec<PathBuf>)> = buckets.into_iter().collect();
    buckets.sort_by(|a, b| b.0.cmp(&a.0));

    let mut groups = Vec::new();
    for (size, files) in buckets {
        for candidate in prune_by_quick_hash(&files) {
            groups.extend(confirm_by_full_hash(&candidate, size));
        }
    }

    groups.sort_by(|a, b| b.total_wasted.cmp(&a.total_wasted));
    debug!(groups = groups.len(), "duplicate scan complete");
    groups
}

/// Split a size bucket by prefix hash, keeping sub-buckets of two or
/// more. Hashes compute in parallel; discovery order survives because
/// the parallel map preserves input order.
fn prune_by_quick_hash(files: &[PathBuf]) -> Vec<Vec<PathBuf>> {
    let hashed: Vec<(PathBuf, Option<String>)> = files
        .par_iter()
        .map(|p| (p.clone(), hasher::quick_hash(p).ok()))
        .collect();

    let mut by_hash: HashMap<String, Vec<PathBuf>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for (path, hash) in hashed {
        // Unreadable files drop out of the bucket without aborting
        let Some(hash) = hash else { continue };
        if !by_hash.contains_key(&hash) {
            order.push(hash.clone());
        }
        by_hash.entry(hash).or_default().push(path);
    }

    order
        .into_iter()
        .filter_map(|h| by_hash.remove(&h))
        .filter(|group| group.len() >= 2)
        .collect()
}

/// Full-hash a pruned candidate set and emit confirmed groups
fn confirm_by_full_hash(files: &[PathBuf], file_size: u64) -> Vec<DuplicateGroup> {
    let hashed: Vec<(PathBuf, Option<String>)> = files
        .par_iter()
        .map(|p| (p.clone(), hasher::full_hash(p).ok()))
        .collect();

    let mut by_hash: HashMap<String, Vec<PathBuf>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for (path, hash) in hashed {
        let Some(hash) = hash else { continue };
        if !by_hash.contains_key(&hash) {
            order.push(hash.clone());
        }
        by_hash.entry(hash).or_default().push(path);
    }

    order
        .into_iter()
        .filter_map(|hash| {
            let members = by_hash.remove(&hash)?;
            if members.len() < 2 {
                return None;
            }
            let files: Vec<DuplicateFile> = members
                .iter()
                .map(|p| DuplicateFile {
                    path: p.to_string_lossy().to_string(),
                    name: p
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                })
                .collect();
            let total_wasted = file_size * (files.len() as u64 - 1);
            Some(DuplicateGroup {
                hash,
                files,
                file_size,
                total_wasted,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_identical_content_and_skips_unique() {
        let dir = tempfile::tempdir().unwrap();
        let content_x = vec![7u8; 2 * 1024 * 1024];
        let content_y = vec![9u8; 2 * 1024 * 1024];
        std::fs::write(dir.path().join("a.bin"), &content_x).unwrap();
        std::fs::write(dir.path().join("b.bin"), &content_x).unwrap();
        std::fs::write(dir.path().join("c.bin"), &content_y).unwrap();

        let groups = find_duplicates(&[dir.path().to_path_buf()], 1024 * 1024);
        assert_eq!(groups.len(), 1, "same-size different-content must not group");
        let g = &groups[0];
        assert_eq!(g.files.len(), 2);
        assert_eq!(g.file_size, 2 * 1024 * 1024);
        assert_eq!(g.total_wasted, 2 * 1024 * 1024);
        let names: Vec<&str> = g.files.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"a.bin"));
        assert!(names.contains(&"b.bin"));
        assert!(!names.contains(&"c.bin"));
    }

    #[test]
    fn wasted_invariant_holds_for_larger_groups() {
        let dir = tempfile::tempdir().unwrap();
        let content = vec![1u8; 1024 * 1024];
        for name in ["one.dat", "two.dat", "three.dat"] {
            std::fs::write(dir.path().join(name), &content).unwrap();
        }

        let groups = find_duplicates(&[dir.path().to_path_buf()], 1024 * 1024);
        assert_eq!(groups.len(), 1);
        let g = &groups[0];
        assert_eq!(g.files.len(), 3);
        assert_eq!(g.total_wasted, g.file_size * (g.files.len() as u64 - 1));
    }

    #[test]
    fn threshold_excludes_small_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"tiny dup").unwrap();
        std::fs::write(dir.path().join("b.txt"), b"tiny dup").unwrap();

        let groups = find_duplicates(&[dir.path().to_path_buf()], 1024 * 1024);
        assert!(groups.is_empty());
    }

    #[test]
    fn duplicates_group_across_roots() {
        let root_a = tempfile::tempdir().unwrap();
        let root_b = tempfile::tempdir().unwrap();
        let content = vec![3u8; 1024 * 1024];
        std::fs::write(root_a.path().join("copy1.iso"), &content).unwrap();
        std::fs::write(root_b.path().join("copy2.iso"), &content).unwrap();

        let groups = find_duplicates(
            &[root_a.path().to_path_buf(), root_b.path().to_path_buf()],
            1024 * 1024,
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files.len(), 2);
    }

    #[test]
    fn equal_waste_groups_order_by_size_descending() {
        let dir = tempfile::tempdir().unwrap();
        // A 2 MB pair and a 1 MB triple both waste exactly 2 MB
        let big = vec![2u8; 2 * 1024 * 1024];
        std::fs::write(dir.path().join("pair_a.bin"), &big).unwrap();
        std::fs::write(dir.path().join("pair_b.bin"), &big).unwrap();
        let small = vec![4u8; 1024 * 1024];
        for name in ["trio_a.bin", "trio_b.bin", "trio_c.bin"] {
            std::fs::write(dir.path().join(name), &small).unwrap();
        }

        for _ in 0..5 {
            let groups = find_duplicates(&[dir.path().to_path_buf()], 1024 * 1024);
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0].total_wasted, groups[1].total_wasted);
            assert_eq!(groups[0].file_size, 2 * 1024 * 1024);
            assert_eq!(groups[1].file_size, 1024 * 1024);
        }
    }

    #[test]
    fn first_discovered_file_is_retained_original() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("later");
        std::fs::create_dir(&sub).unwrap();
        let content = vec![5u8; 1024 * 1024];
        // Sibling walk order is filesystem-dependent, so pin discovery
        // order by putting the original in an earlier root.
        let first_root = tempfile::tempdir().unwrap();
        std::fs::write(first_root.path().join("original.bin"), &content).unwrap();
        std::fs::write(sub.join("copy.bin"), &content).unwrap();

        let groups = find_duplicates(
            &[first_root.path().to_path_buf(), dir.path().to_path_buf()],
            1024 * 1024,
        );
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].files[0].name, "original.bin");
        assert_eq!(groups[0].files[1].name, "copy.bin");
    }
}
