//! Static registry of the directory sets each scanner examines.
//!
//! Every function takes the home directory explicitly so scanners stay
//! testable against a temp tree. Resolving the real home (and failing
//! the whole command when there is none) is the scanners' job.

use std::path::{Path, PathBuf};

/// A cache root plus whether everything under it is system-owned
#[derive(Debug, Clone)]
pub struct CacheRoot {
    pub path: PathBuf,
    /// Entries under a system root always classify as System caches
    pub system: bool,
}

/// Roots walked by the cache classifier
pub fn cache_roots(home: &Path) -> Vec<CacheRoot> {
    vec![
        CacheRoot {
            path: home.join("Library/Caches"),
            system: false,
        },
        CacheRoot {
            path: PathBuf::from("/Library/Caches"),
            system: true,
        },
    ]
}

/// Leftover roots examined by the orphan detector, with the label the
/// detector maps onto `OrphanType`.
pub fn leftover_roots(home: &Path) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("Application Support", home.join("Library/Application Support")),
        ("Preferences", home.join("Library/Preferences")),
        ("Containers", home.join("Library/Containers")),
        ("Caches", home.join("Library/Caches")),
        ("Logs", home.join("Library/Logs")),
    ]
}

/// Common user data roots for large-file and duplicate scans
pub fn common_data_roots(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join("Downloads"),
        home.join("Desktop"),
        home.join("Documents"),
        home.join("Movies"),
        home.join("Music"),
        home.join("Pictures"),
    ]
}

/// Heavy app-data roots for the largest-subfolders scan
pub fn app_data_roots(home: &Path) -> Vec<(&'static str, PathBuf)> {
    vec![
        ("ApplicationSupport", home.join("Library/Application Support")),
        ("Containers", home.join("Library/Containers")),
        ("Caches", home.join("Library/Caches")),
    ]
}

/// How many app-data subfolders the scan reports
pub const APP_DATA_TOP_N: usize = 50;

/// A fixed developer-cache catalog entry. `safe_to_clean` is a static
/// property of the entry, never derived from the path: registries and
/// build artifacts regenerate cheaply, archives and local repositories
/// do not.
#[derive(Debug, Clone)]
pub struct DevCacheSpec {
    pub name: &'static str,
    pub path: PathBuf,
    pub description: &'static str,
    pub safe_to_clean: bool,
}

/// The named developer cache locations the dev scanner reports on,
/// present on disk or not.
pub fn developer_cache_catalog(home: &Path) -> Vec<DevCacheSpec> {
    vec![
        DevCacheSpec {
            name: "npm Cache",
            path: home.join(".npm"),
            description: "Node.js package manager cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Yarn Cache",
            path: home.join(".yarn/cache"),
            description: "Yarn package manager cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "pnpm Store",
            path: home.join(".pnpm-store"),
            description: "pnpm package manager store",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Cargo Cache",
            path: home.join(".cargo/registry/cache"),
            description: "Rust package registry cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "CocoaPods Cache",
            path: home.join("Library/Caches/CocoaPods"),
            description: "iOS dependency manager cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Xcode DerivedData",
            path: home.join("Library/Developer/Xcode/DerivedData"),
            description: "Xcode build artifacts, regenerated on next build",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Xcode Archives",
            path: home.join("Library/Developer/Xcode/Archives"),
            description: "Xcode archived builds, keep if you ship from this machine",
            safe_to_clean: false,
        },
        DevCacheSpec {
            name: "Gradle Cache",
            path: home.join(".gradle/caches"),
            description: "Android/Java build cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Maven Repository",
            path: home.join(".m2/repository"),
            description: "Maven dependencies, may include locally installed artifacts",
            safe_to_clean: false,
        },
        DevCacheSpec {
            name: "Homebrew Cache",
            path: home.join("Library/Caches/Homebrew"),
            description: "Homebrew package downloads",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "pip Cache",
            path: home.join("Library/Caches/pip"),
            description: "Python package cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "VS Code Cache",
            path: home.join("Library/Application Support/Code/Cache"),
            description: "Visual Studio Code cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Android SDK Cache",
            path: home.join("Library/Android/sdk/.temp"),
            description: "Android SDK temporary files",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Composer Cache",
            path: home.join(".composer/cache"),
            description: "PHP Composer package cache",
            safe_to_clean: true,
        },
        DevCacheSpec {
            name: "Go Modules Cache",
            path: home.join("go/pkg/mod/cache"),
            description: "Go modules cache",
            safe_to_clean: true,
        },
    ]
}

/// Docker Desktop data lives outside the catalog: it is reported when
/// present but never flagged cleanable here, `docker system prune` owns it.
pub fn docker_data_dir(home: &Path) -> PathBuf {
    home.join("Library/Containers/com.docker.docker/Data")
}

/// Marker paths whose presence identifies a developer machine
pub fn developer_markers(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(".npm"),
        home.join(".cargo"),
        home.join(".gradle"),
        home.join("Library/Developer/Xcode"),
        home.join(".git"),
        PathBuf::from("/Applications/Xcode.app"),
        PathBuf::from("/Applications/Visual Studio Code.app"),
    ]
}
