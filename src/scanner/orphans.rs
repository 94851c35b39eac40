//! Leftover data detection.
//!
//! Cross-references top-level entries under each leftover root against
//! the set of installed applications. Anything that fails to match is an
//! orphan. Matching is a scored comparison over name tokens, so the
//! tie-break between "belongs to an app" and "left behind by one" is a
//! pair of explicit thresholds instead of ad-hoc string tests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

use crate::catalog;
use crate::common::errors::EngineResult;
use crate::scanner::walker;

/// Which leftover root produced an orphan entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrphanType {
    ApplicationSupport,
    Preferences,
    Containers,
    Caches,
    Logs,
    Other,
}

/// Data left behind under an app-support-style root with no matching
/// installed application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanFile {
    pub path: String,
    pub name: String,
    pub size: u64,
    pub orphan_type: OrphanType,
    pub possible_app_name: String,
}

/// Identity of an installed application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstalledApp {
    pub name: String,
    pub bundle_id: String,
}

/// Source of installed-application identities. The engine treats the
/// enumerator as an external collaborator; tests inject fixtures.
pub trait AppInventory {
    fn installed_apps(&self) -> Vec<InstalledApp>;
}

/// Production inventory: `.app` bundles in /Applications and
/// ~/Applications, bundle IDs read from each Info.plist.
pub struct BundleInventory;

impl AppInventory for BundleInventory {
    fn installed_apps(&self) -> Vec<InstalledApp> {
        let mut dirs = vec![std::path::PathBuf::from("/Applications")];
        if let Some(home) = dirs::home_dir() {
            dirs.push(home.join("Applications"));
        }

        let mut apps = Vec::new();
        for dir in dirs {
            let read_dir = match std::fs::read_dir(&dir) {
                Ok(rd) => rd,
                Err(_) => continue,
            };
            for entry in read_dir.filter_map(|e| e.ok()) {
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("app") {
                    continue;
                }
                let name = match path.file_stem() {
                    Some(stem) => stem.to_string_lossy().to_string(),
                    None => continue,
                };
                apps.push(InstalledApp {
                    bundle_id: bundle_id_of(&path).unwrap_or_default(),
                    name,
                });
            }
        }

        apps.sort_by(|a, b| a.name.cmp(&b.name));
        apps
    }
}

fn bundle_id_of(app_path: &Path) -> Option<String> {
    let info_plist = app_path.join("Contents/Info.plist");
    let value = plist::Value::from_file(info_plist).ok()?;
    value
        .as_dictionary()?
        .get("CFBundleIdentifier")?
        .as_string()
        .map(|s| s.to_string())
}

// ─── Scored name matching ────────────────────────────────────────────────────

/// Above this, an entry is considered owned by an installed app
pub const MATCH_THRESHOLD: f64 = 0.75;

/// Above this, the best candidate is worth suggesting as the app that
/// likely left the orphan behind
pub const SUGGEST_THRESHOLD: f64 = 0.3;

/// Tokens carrying no identity: reverse-DNS boilerplate and file suffixes
const STOP_TOKENS: &[&str] = &["com", "org", "net", "io", "co", "plist"];

/// Lowercase and split on separators, dropping boilerplate tokens
pub fn tokenize(name: &str) -> BTreeSet<String> {
    name.to_lowercase()
        .split(['.', '-', '_', ' '])
        .filter(|t| !t.is_empty() && !STOP_TOKENS.contains(t))
        .map(|t| t.to_string())
        .collect()
}

/// Overlap coefficient between two token sets: shared tokens divided by
/// the smaller set's size. 1.0 means one side is fully contained in the
/// other ("Firefox Profiles" vs "Firefox").
pub fn similarity(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let shared = a.intersection(b).count();
    shared as f64 / a.len().min(b.len()) as f64
}

/// Score an entry name against one app: the better of its similarity to
/// the app's display name and to its bundle identifier.
pub fn score_against(entry_tokens: &BTreeSet<String>, app: &InstalledApp) -> f64 {
    let name_score = similarity(entry_tokens, &tokenize(&app.name));
    let bundle_score = similarity(entry_tokens, &tokenize(&app.bundle_id));
    name_score.max(bundle_score)
}

/// Find the installed app most similar to an entry name
pub fn best_match<'a>(name: &str, apps: &'a [InstalledApp]) -> Option<(&'a InstalledApp, f64)> {
    let entry_tokens = tokenize(name);
    apps.iter()
        .map(|app| (app, score_against(&entry_tokens, app)))
        .max_by(|(_, x), (_, y)| x.total_cmp(y))
}

// ─── Scanning ────────────────────────────────────────────────────────────────

fn orphan_type_for(label: &str) -> OrphanType {
    match label {
        "Application Support" => OrphanType::ApplicationSupport,
        "Preferences" => OrphanType::Preferences,
        "Containers" => OrphanType::Containers,
        "Caches" => OrphanType::Caches,
        "Logs" => OrphanType::Logs,
        _ => OrphanType::Other,
    }
}

/// Scan every leftover root for entries not matching any installed app
pub fn scan_orphan_files() -> EngineResult<Vec<OrphanFile>> {
    scan_orphan_files_with(&BundleInventory)
}

/// Same scan, with the installed-app enumerator injected
pub fn scan_orphan_files_with(inventory: &dyn AppInventory) -> EngineResult<Vec<OrphanFile>> {
    let home = walker::home_dir()?;
    let apps = inventory.installed_apps();
    Ok(scan_orphan_roots(&home, &apps))
}

/// Walk the leftover roots under an explicit home against a fixed set of
/// installed apps. Unreadable roots and entries are skipped.
pub fn scan_orphan_roots(home: &Path, apps: &[InstalledApp]) -> Vec<OrphanFile> {
    let mut orphans = Vec::new();

    for (label, root) in catalog::leftover_roots(home) {
        let read_dir = match std::fs::read_dir(&root) {
            Ok(rd) => rd,
            Err(_) => continue,
        };
        let orphan_type = orphan_type_for(label);

        for entry in read_dir.filter_map(|e| e.ok()) {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // Hidden entries and Apple's own data are out of bounds
            if name.starts_with('.') || name.starts_with("com.apple.") {
                continue;
            }

            let matched = best_match(&name, apps);
            if matched.map(|(_, score)| score >= MATCH_THRESHOLD).unwrap_or(false) {
                continue; // belongs to an installed app
            }

            let size = walker::entry_size(&path);
            if size == 0 {
                continue;
            }

            let possible_app_name = match matched {
                Some((app, score)) if score >= SUGGEST_THRESHOLD => app.name.clone(),
                _ => "Unknown".to_string(),
            };

            orphans.push(OrphanFile {
                path: path.to_string_lossy().to_string(),
                name,
                size,
                orphan_type: orphan_type.clone(),
                possible_app_name,
            });
        }
    }

    orphans.sort_by(|a, b| b.size.cmp(&a.size));
    debug!(count = orphans.len(), "orphan scan complete");
    orphans
}
