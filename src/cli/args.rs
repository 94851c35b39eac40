use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command-line interface definition for macsweep
#[derive(Parser, Debug)]
#[command(
    name = "macsweep",
    version,
    about = "Scan for reclaimable disk space and clean it up safely",
    after_help = "EXAMPLES:\n  \
        macsweep info                         Show host and disk usage\n  \
        macsweep caches scan                  List application caches\n  \
        macsweep caches delete <PATH>...      Delete selected caches\n  \
        macsweep dev scan                     Report developer tool caches\n  \
        macsweep orphans scan                 Find leftovers from removed apps\n  \
        macsweep large scan --min-size 200    Files of 200 MB and up\n  \
        macsweep appdata scan                 Largest app data folders\n  \
        macsweep dup scan --min-size 50       Duplicate files of 50 MB and up\n  \
        macsweep dup trash <PATH>...          Move duplicate copies to trash\n  \
        macsweep config set duplicate_min_mb 50   Change a default threshold\n  \
        macsweep reveal <PATH>                Show a path in Finder"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(long, global = true, default_value = "human")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode, minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show host and disk usage information
    Info,

    /// Application and system caches
    Caches {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Developer tool caches
    Dev {
        #[command(subcommand)]
        action: DevAction,
    },

    /// Leftover data from uninstalled applications
    Orphans {
        #[command(subcommand)]
        action: OrphanAction,
    },

    /// Large files in common user folders
    Large {
        #[command(subcommand)]
        action: LargeAction,
    },

    /// Largest application data folders
    Appdata {
        #[command(subcommand)]
        action: AppDataAction,
    },

    /// Duplicate files
    Dup {
        #[command(subcommand)]
        action: DupAction,
    },

    /// Reveal a path in Finder
    Reveal { path: PathBuf },

    /// View or edit configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Scan all cache roots
    Scan,
    /// Delete the given cache directories
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DevAction {
    /// Check whether this machine looks like a developer machine
    Status,
    /// Report every known developer cache location
    Scan,
    /// Empty the given developer caches (directories are kept)
    Clean {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum OrphanAction {
    /// Find leftover data with no matching installed app
    Scan,
    /// Delete the given orphan entries
    Delete {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LargeAction {
    /// Find files at or above the size threshold
    Scan {
        /// Minimum file size in MB
        #[arg(long, value_name = "MB")]
        min_size: Option<u64>,
    },
    /// Move the given files to the trash
    Trash {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppDataAction {
    /// Report the largest app data folders
    Scan,
    /// Move the given folders to the trash
    Trash {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DupAction {
    /// Group duplicate files by content
    Scan {
        /// Minimum file size in MB
        #[arg(long, value_name = "MB")]
        min_size: Option<u64>,
    },
    /// Move the given duplicate copies to the trash
    Trash {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active configuration
    Show,
    /// Reset configuration to defaults
    Reset,
    /// Set a configuration value
    Set { key: String, value: String },
}

#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
