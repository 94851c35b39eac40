use colored::*;
use serde::Serialize;

use crate::cleaner::batch::BatchSummary;
use crate::common::format::{self, format_path, format_size, format_size_colored};
use crate::dedupe::finder::DuplicateGroup;
use crate::scanner::caches::{CacheEntry, CacheType};
use crate::scanner::dev::DeveloperCache;
use crate::scanner::large::{FileCategory, LargeAppData, LargeFile};
use crate::scanner::orphans::{OrphanFile, OrphanType};
use crate::system::SystemInfo;

/// Print any serializable result as pretty JSON
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing results: {}", e),
    }
}

/// Print host and disk usage
pub fn print_system_info(info: &SystemInfo) {
    println!();
    println!("  {} {}", "💻", info.hostname.bold());
    println!("{}", "─".repeat(60).dimmed());
    println!("  User:   {}", info.username);
    println!("  Home:   {}", info.home_directory);
    println!();

    let usage = &info.disk_usage;
    println!(
        "  {} Disk: {} used of {} ({:.1}%)",
        "💾",
        format_size(usage.used_bytes),
        format_size(usage.total_bytes),
        usage.used_percentage,
    );
    println!(
        "  {} Free: {}",
        "  ",
        format_size_colored(usage.free_bytes)
    );
    println!();
}

fn cache_type_label(cache_type: &CacheType) -> ColoredString {
    match cache_type {
        CacheType::Developer => "dev".cyan(),
        CacheType::Browser => "browser".blue(),
        CacheType::System => "system".red(),
        CacheType::Application => "app".normal(),
        CacheType::Unknown => "unknown".dimmed(),
    }
}

/// Print cache scan results
pub fn print_cache_entries(entries: &[CacheEntry]) {
    println!();
    println!("  {} Cache Scan", "🧹");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    if entries.is_empty() {
        println!("  {} No caches found.", "✨");
        println!();
        return;
    }

    println!(
        "  {:<42} {:>10} {:>8}  {}",
        "Name".dimmed(),
        "Size".dimmed(),
        "Type".dimmed(),
        "Safe".dimmed(),
    );
    println!("  {}", "─".repeat(68).dimmed());

    for entry in entries {
        let safe = if entry.is_safe_to_delete {
            "✓".green().to_string()
        } else {
            "✗".red().to_string()
        };
        println!(
            "  {:<42} {:>10} {:>8}  {}",
            format::truncate(&entry.name, 42),
            format_size(entry.size),
            cache_type_label(&entry.cache_type),
            safe,
        );
    }

    let total: u64 = entries.iter().map(|e| e.size).sum();
    let safe_total: u64 = entries
        .iter()
        .filter(|e| e.is_safe_to_delete)
        .map(|e| e.size)
        .sum();
    println!();
    println!("{}", "─".repeat(70).dimmed());
    println!(
        "  {} {} in {}, {} safe to delete",
        "💾",
        format_size_colored(total),
        format::format_count(entries.len(), "cache"),
        format_size_colored(safe_total),
    );
    println!(
        "  {} Delete with: {}",
        "💡",
        "macsweep caches delete <PATH>...".cyan()
    );
    println!();
}

/// Print the developer machine check
pub fn print_dev_status(is_developer: bool) {
    println!();
    if is_developer {
        println!(
            "  {} Developer tools detected — run {} for details",
            "🔧",
            "macsweep dev scan".cyan()
        );
    } else {
        println!("  {} No developer tool markers found on this machine.", "✨");
    }
    println!();
}

/// Print developer cache report
pub fn print_dev_caches(caches: &[DeveloperCache]) {
    println!();
    println!("  {} Developer Caches", "🔧");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    let present: Vec<&DeveloperCache> = caches.iter().filter(|c| c.exists).collect();
    if present.is_empty() {
        println!("  No developer caches found.");
        println!();
        return;
    }

    for cache in &present {
        let marker = if cache.safe_to_clean {
            "●".green()
        } else {
            "●".yellow()
        };
        println!(
            "  {} {:<28} {:>10}  {}",
            marker,
            cache.name,
            format_size(cache.size),
            cache.description.dimmed(),
        );
        println!(
            "      {} {}",
            "↳".dimmed(),
            format_path(std::path::Path::new(&cache.path)).dimmed()
        );
    }

    let total: u64 = present.iter().map(|c| c.size).sum();
    let caution = present.iter().filter(|c| !c.safe_to_clean).count();
    println!();
    println!("{}", "─".repeat(70).dimmed());
    println!("  {} Total: {}", "💾", format_size_colored(total));
    if caution > 0 {
        println!(
            "  {} {} marked {} — review before cleaning",
            "⚠".yellow(),
            format::format_count(caution, "item"),
            "●".yellow(),
        );
    }
    println!(
        "  {} Clean with: {}",
        "💡",
        "macsweep dev clean <PATH>...".cyan()
    );
    println!();
}

fn orphan_type_label(orphan_type: &OrphanType) -> &'static str {
    match orphan_type {
        OrphanType::ApplicationSupport => "App Support",
        OrphanType::Preferences => "Preferences",
        OrphanType::Containers => "Containers",
        OrphanType::Caches => "Caches",
        OrphanType::Logs => "Logs",
        OrphanType::Other => "Other",
    }
}

/// Print orphaned app data
pub fn print_orphans(orphans: &[OrphanFile]) {
    println!();
    println!("  {} Orphaned App Data", "👻");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    if orphans.is_empty() {
        println!("  {} No orphaned data found.", "✨");
        println!();
        return;
    }

    println!(
        "  {:<32} {:>10} {:<14} {}",
        "Name".dimmed(),
        "Size".dimmed(),
        "Location".dimmed(),
        "Possible App".dimmed(),
    );
    println!("  {}", "─".repeat(68).dimmed());

    for orphan in orphans {
        println!(
            "  {:<32} {:>10} {:<14} {}",
            format::truncate(&orphan.name, 32),
            format_size(orphan.size),
            orphan_type_label(&orphan.orphan_type).dimmed(),
            orphan.possible_app_name.dimmed(),
        );
    }

    let total: u64 = orphans.iter().map(|o| o.size).sum();
    println!();
    println!("{}", "─".repeat(70).dimmed());
    println!(
        "  {} {} across {}",
        "💾",
        format_size_colored(total),
        format::format_count(orphans.len(), "item"),
    );
    println!();
}

fn category_label(category: &FileCategory) -> &'static str {
    match category {
        FileCategory::Video => "Video",
        FileCategory::Image => "Image",
        FileCategory::Audio => "Audio",
        FileCategory::Archive => "Archive",
        FileCategory::Document => "Document",
        FileCategory::Application => "App",
        FileCategory::DiskImage => "Disk Image",
        FileCategory::Other => "Other",
    }
}

/// Print large file scan results
pub fn print_large_files(files: &[LargeFile], min_size_mb: u64) {
    println!();
    println!("  {} Large Files (≥ {} MB)", "📦", min_size_mb);
    println!("{}", "─".repeat(80).dimmed());
    println!();

    if files.is_empty() {
        println!("  No files at or above the threshold.");
        println!();
        return;
    }

    println!(
        "  {:<36} {:>10} {:<11} {:<11} {}",
        "Name".dimmed(),
        "Size".dimmed(),
        "Category".dimmed(),
        "Modified".dimmed(),
        "Path".dimmed(),
    );
    println!("  {}", "─".repeat(78).dimmed());

    for file in files {
        println!(
            "  {:<36} {:>10} {:<11} {:<11} {}",
            format::truncate(&file.name, 36),
            format_size(file.size),
            category_label(&file.category).dimmed(),
            format::format_timestamp(file.last_modified).dimmed(),
            format_path(std::path::Path::new(&file.path)).dimmed(),
        );
    }

    let total: u64 = files.iter().map(|f| f.size).sum();
    println!();
    println!("{}", "─".repeat(80).dimmed());
    println!(
        "  {} {} in {}",
        "💾",
        format_size_colored(total),
        format::format_count(files.len(), "file"),
    );
    println!(
        "  {} Move to trash with: {}",
        "💡",
        "macsweep large trash <PATH>...".cyan()
    );
    println!();
}

/// Print the largest app data folders
pub fn print_app_data(folders: &[LargeAppData]) {
    println!();
    println!("  {} Largest App Data Folders", "📁");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    if folders.is_empty() {
        println!("  Nothing above the reporting threshold.");
        println!();
        return;
    }

    println!(
        "  {:<36} {:>10}  {}",
        "Name".dimmed(),
        "Size".dimmed(),
        "Location".dimmed(),
    );
    println!("  {}", "─".repeat(68).dimmed());

    for folder in folders {
        println!(
            "  {:<36} {:>10}  {}",
            format::truncate(&folder.name, 36),
            format_size(folder.size),
            folder.location.dimmed(),
        );
    }

    let total: u64 = folders.iter().map(|f| f.size).sum();
    println!();
    println!("{}", "─".repeat(70).dimmed());
    println!("  {} Total: {}", "💾", format_size_colored(total));
    println!();
}

/// Print duplicate groups; the first member of each group is the keeper
pub fn print_dup_groups(groups: &[DuplicateGroup]) {
    println!();
    println!("  {} Duplicate Files", "👯");
    println!("{}", "─".repeat(70).dimmed());
    println!();

    if groups.is_empty() {
        println!("  {} No duplicates found!", "✨");
        println!();
        return;
    }

    for (i, group) in groups.iter().enumerate() {
        println!(
            "  Group {} — {} files of {}, {} wasted",
            (i + 1).to_string().bold(),
            group.files.len(),
            format_size(group.file_size),
            format_size(group.total_wasted),
        );

        for (j, member) in group.files.iter().enumerate() {
            let label = if j == 0 { "keep →" } else { " dup →" };
            let path = format_path(std::path::Path::new(&member.path));
            let colored_path = if j == 0 {
                path.green().to_string()
            } else {
                path.dimmed().to_string()
            };
            println!("    {} {}", label.dimmed(), colored_path);
        }
        println!();
    }

    let total_wasted: u64 = groups.iter().map(|g| g.total_wasted).sum();
    println!("{}", "─".repeat(70).dimmed());
    println!(
        "  {} {}, {} recoverable",
        "💾",
        format::format_count(groups.len(), "group"),
        format_size_colored(total_wasted),
    );
    println!(
        "  {} Trash the extra copies with: {}",
        "💡",
        "macsweep dup trash <PATH>...".cyan()
    );
    println!();
}

/// Print the outcome of a batch delete
pub fn print_batch_summary(summary: &BatchSummary) {
    println!();
    if summary.fail_count == 0 {
        println!(
            "  {} {} deleted",
            "✓".green(),
            format::format_count(summary.success_count, "item"),
        );
    } else {
        println!(
            "  {} {} deleted, {} failed",
            "⚠".yellow(),
            format::format_count(summary.success_count, "item"),
            summary.fail_count.to_string().red(),
        );
        for path in &summary.failed_paths {
            println!("    {} {}", "✗".red(), format_path(path).dimmed());
        }
    }
    println!();
}
