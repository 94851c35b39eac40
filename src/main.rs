use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

use macsweep::cli::args::{
    AppDataAction, CacheAction, Cli, Commands, ConfigAction, DevAction, DupAction, LargeAction,
    OrphanAction, OutputFormat,
};
use macsweep::cli::output;
use macsweep::cleaner::batch::{BatchDelete, BatchSummary};
use macsweep::cleaner::executor;
use macsweep::common::config::Config;
use macsweep::common::errors::EngineResult;
use macsweep::common::format;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter("macsweep=debug")
            .init();
    }

    match cli.command {
        Commands::Info => cmd_info(&cli),

        Commands::Caches { ref action } => match action {
            CacheAction::Scan => cmd_caches_scan(&cli),
            CacheAction::Delete { paths } => {
                run_delete_batch(&cli, paths.clone(), "Deleting caches", |p| {
                    executor::delete_cache(p)
                })
            }
        },

        Commands::Dev { ref action } => match action {
            DevAction::Status => cmd_dev_status(&cli),
            DevAction::Scan => cmd_dev_scan(&cli),
            DevAction::Clean { paths } => cmd_dev_clean(&cli, paths.clone()),
        },

        Commands::Orphans { ref action } => match action {
            OrphanAction::Scan => cmd_orphans_scan(&cli),
            OrphanAction::Delete { paths } => {
                run_delete_batch(&cli, paths.clone(), "Deleting orphans", |p| {
                    executor::delete_orphan(p)
                })
            }
        },

        Commands::Large { ref action } => match action {
            LargeAction::Scan { min_size } => cmd_large_scan(&cli, *min_size),
            LargeAction::Trash { paths } => {
                run_delete_batch(&cli, paths.clone(), "Moving to trash", |p| {
                    executor::move_file_to_trash(p).map(|_| ())
                })
            }
        },

        Commands::Appdata { ref action } => match action {
            AppDataAction::Scan => cmd_appdata_scan(&cli),
            AppDataAction::Trash { paths } => {
                run_delete_batch(&cli, paths.clone(), "Moving to trash", |p| {
                    executor::delete_large_app_data(p).map(|_| ())
                })
            }
        },

        Commands::Dup { ref action } => match action {
            DupAction::Scan { min_size } => cmd_dup_scan(&cli, *min_size),
            DupAction::Trash { paths } => {
                run_delete_batch(&cli, paths.clone(), "Trashing duplicates", |p| {
                    executor::move_duplicate_to_trash(p).map(|_| ())
                })
            }
        },

        Commands::Reveal { ref path } => {
            macsweep::reveal_in_finder(path)?;
            Ok(())
        }

        Commands::Config { ref action } => cmd_config(action),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            let mut cmd = Cli::command();
            let shell = match shell {
                macsweep::cli::args::CompletionShell::Bash => clap_complete::Shell::Bash,
                macsweep::cli::args::CompletionShell::Zsh => clap_complete::Shell::Zsh,
                macsweep::cli::args::CompletionShell::Fish => clap_complete::Shell::Fish,
            };
            clap_complete::generate(shell, &mut cmd, "macsweep", &mut std::io::stdout());
            Ok(())
        }
    }
}

// ─── Info ─────────────────────────────────────────────────────────────────────

fn cmd_info(cli: &Cli) -> Result<()> {
    let info = macsweep::get_system_info()?;
    match cli.format {
        OutputFormat::Human => output::print_system_info(&info),
        OutputFormat::Json => output::print_json(&info),
    }
    Ok(())
}

// ─── Caches ───────────────────────────────────────────────────────────────────

fn cmd_caches_scan(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let spinner = scan_spinner(cli, "Scanning caches...");
    let mut entries = macsweep::scan_all_caches()?;
    entries.retain(|e| !config.is_excluded(Path::new(&e.path)));
    finish_spinner(spinner);

    match cli.format {
        OutputFormat::Human => output::print_cache_entries(&entries),
        OutputFormat::Json => output::print_json(&entries),
    }
    Ok(())
}

// ─── Dev ──────────────────────────────────────────────────────────────────────

fn cmd_dev_status(cli: &Cli) -> Result<()> {
    let is_developer = macsweep::is_developer_user();
    match cli.format {
        OutputFormat::Human => output::print_dev_status(is_developer),
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({ "is_developer": is_developer }))
        }
    }
    Ok(())
}

fn cmd_dev_scan(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let spinner = scan_spinner(cli, "Scanning developer caches...");
    let mut caches = macsweep::scan_developer_caches()?;
    caches.retain(|c| !config.is_excluded(Path::new(&c.path)));
    finish_spinner(spinner);

    match cli.format {
        OutputFormat::Human => output::print_dev_caches(&caches),
        OutputFormat::Json => output::print_json(&caches),
    }
    Ok(())
}

fn cmd_dev_clean(cli: &Cli, paths: Vec<PathBuf>) -> Result<()> {
    let mut freed = 0u64;
    let summary = drive_batch(cli, paths, "Cleaning dev caches", |p| {
        executor::clean_developer_cache(p).map(|bytes| freed += bytes)
    });

    if !cli.quiet && matches!(cli.format, OutputFormat::Human) {
        output::print_batch_summary(&summary);
        println!("  {} Freed {}", "💾", format::format_size_colored(freed));
        println!();
    }
    if matches!(cli.format, OutputFormat::Json) {
        output::print_json(&serde_json::json!({
            "success_count": summary.success_count,
            "fail_count": summary.fail_count,
            "failed_paths": summary.failed_paths,
            "bytes_freed": freed,
        }));
    }
    Ok(())
}

// ─── Orphans ──────────────────────────────────────────────────────────────────

fn cmd_orphans_scan(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let spinner = scan_spinner(cli, "Scanning for orphaned app data...");
    let mut orphans = macsweep::scan_orphan_files()?;
    orphans.retain(|o| !config.is_excluded(Path::new(&o.path)));
    finish_spinner(spinner);

    match cli.format {
        OutputFormat::Human => output::print_orphans(&orphans),
        OutputFormat::Json => output::print_json(&orphans),
    }
    Ok(())
}

// ─── Large ────────────────────────────────────────────────────────────────────

fn cmd_large_scan(cli: &Cli, min_size: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let min_size_mb = min_size.unwrap_or(config.large_file_min_mb);

    let spinner = scan_spinner(cli, "Scanning for large files...");
    let mut files = macsweep::scan_common_large_files(min_size_mb)?;
    files.retain(|f| !config.is_excluded(Path::new(&f.path)));
    finish_spinner(spinner);

    match cli.format {
        OutputFormat::Human => output::print_large_files(&files, min_size_mb),
        OutputFormat::Json => output::print_json(&files),
    }
    Ok(())
}

fn cmd_appdata_scan(cli: &Cli) -> Result<()> {
    let config = Config::load()?;
    let spinner = scan_spinner(cli, "Sizing app data folders...");
    let mut folders = macsweep::scan_large_app_data()?;
    folders.retain(|f| !config.is_excluded(Path::new(&f.path)));
    folders.truncate(config.app_data_top_n);
    finish_spinner(spinner);

    match cli.format {
        OutputFormat::Human => output::print_app_data(&folders),
        OutputFormat::Json => output::print_json(&folders),
    }
    Ok(())
}

// ─── Dup ──────────────────────────────────────────────────────────────────────

fn cmd_dup_scan(cli: &Cli, min_size: Option<u64>) -> Result<()> {
    let config = Config::load()?;
    let min_size_mb = min_size.unwrap_or(config.duplicate_min_mb);

    let spinner = scan_spinner(cli, "Hashing candidate files...");
    let mut groups = macsweep::scan_common_duplicates(min_size_mb)?;
    // Dropping excluded members can shrink a group below pair size
    for group in &mut groups {
        group.files.retain(|f| !config.is_excluded(Path::new(&f.path)));
        group.total_wasted = group.file_size * (group.files.len().saturating_sub(1)) as u64;
    }
    groups.retain(|g| g.files.len() >= 2);
    finish_spinner(spinner);

    match cli.format {
        OutputFormat::Human => output::print_dup_groups(&groups),
        OutputFormat::Json => output::print_json(&groups),
    }
    Ok(())
}

// ─── Config ───────────────────────────────────────────────────────────────────

fn cmd_config(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load()?;
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        ConfigAction::Reset => {
            let config = Config::default();
            config.save()?;
            println!("  {} Configuration reset to defaults", "✓".green());
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            match key.as_str() {
                "large_file_min_mb" => config.large_file_min_mb = value.parse()?,
                "duplicate_min_mb" => config.duplicate_min_mb = value.parse()?,
                "app_data_top_n" => config.app_data_top_n = value.parse()?,
                _ => anyhow::bail!("Unknown config key: {key}"),
            }
            config.save()?;
            println!("  {} Set {} = {}", "✓".green(), key, value);
            Ok(())
        }
    }
}

// ─── Batch driver ─────────────────────────────────────────────────────────────

fn run_delete_batch<F>(cli: &Cli, paths: Vec<PathBuf>, label: &str, op: F) -> Result<()>
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    let summary = drive_batch(cli, paths, label, op);

    match cli.format {
        OutputFormat::Human => {
            if !cli.quiet {
                output::print_batch_summary(&summary);
            }
        }
        OutputFormat::Json => {
            output::print_json(&serde_json::json!({
                "success_count": summary.success_count,
                "fail_count": summary.fail_count,
                "failed_paths": summary.failed_paths,
            }));
        }
    }
    Ok(())
}

/// Step the batch one item at a time so progress and per-item failures
/// surface as they happen rather than at the end.
fn drive_batch<F>(cli: &Cli, paths: Vec<PathBuf>, label: &str, op: F) -> BatchSummary
where
    F: FnMut(&Path) -> EngineResult<()>,
{
    let show_progress = !cli.quiet && matches!(cli.format, OutputFormat::Human);
    let mut batch = BatchDelete::new(paths, op);

    let pb = if show_progress {
        let pb = ProgressBar::new(batch.total() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.red} [{bar:40.red/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("━━░"),
        );
        pb.set_message(label.to_string());
        Some(pb)
    } else {
        None
    };

    let mut summary = BatchSummary::default();
    while let Some((path, event)) = batch.step() {
        if let Err(ref e) = event.outcome {
            let line = format!(
                "  {} {} — {}",
                "✗".red(),
                format::format_path(&path).dimmed(),
                e
            );
            match pb {
                Some(ref pb) => pb.println(line),
                None => eprintln!("{line}"),
            }
        }
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
        summary.record(&path, &event);
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    summary
}

// ─── Progress helpers ─────────────────────────────────────────────────────────

fn scan_spinner(cli: &Cli, message: &str) -> Option<ProgressBar> {
    if cli.quiet || !matches!(cli.format, OutputFormat::Human) {
        return None;
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    Some(pb)
}

fn finish_spinner(pb: Option<ProgressBar>) {
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
}
