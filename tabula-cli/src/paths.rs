//! Platform-specific directory paths.
//!
//! Uses XDG on Linux, standard locations on macOS/Windows.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const QUALIFIER: &str = "org";
const ORGANIZATION: &str = "tabula";
const APPLICATION: &str = "tabula";

/// Get project directories, or None if home directory cannot be determined.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
}

/// Get the cache directory, where logs go by default.
///
/// - Linux: `$XDG_CACHE_HOME/tabula` or `~/.cache/tabula`
/// - macOS: `~/Library/Caches/org.tabula.tabula`
/// - Windows: `C:\Users\<User>\AppData\Local\tabula\tabula\cache`
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Get the config directory.
///
/// - Linux: `$XDG_CONFIG_HOME/tabula` or `~/.config/tabula`
/// - macOS: `~/Library/Application Support/org.tabula.tabula`
/// - Windows: `C:\Users\<User>\AppData\Roaming\tabula\tabula\config`
pub fn config_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the settings file.
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.json"))
}

/// Get the path to the latest log file.
pub fn log_file() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join("latest.log"))
}

/// Old log files kept next to the current one.
const MAX_OLD_LOGS: usize = 10;

/// Archive an existing log at `log` as `<stem>-<timestamp>.log`, then prune
/// archives of the same stem beyond [`MAX_OLD_LOGS`].
///
/// Failures are ignored; a missing archive never blocks startup.
pub fn rotate_logs(log: &Path) {
    let Some(dir) = log.parent() else { return };
    let Some(stem) = log.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
        return;
    };

    if log.exists() {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let _ = fs::rename(log, archive_path(dir, &stem, &timestamp));
    }

    prune_archives(dir, &format!("{}-", stem));
}

/// First unused archive name; runs within the same second get a counter.
fn archive_path(dir: &Path, stem: &str, timestamp: &str) -> PathBuf {
    let first = dir.join(format!("{}-{}.log", stem, timestamp));
    if !first.exists() {
        return first;
    }
    (1..)
        .map(|n| dir.join(format!("{}-{}-{}.log", stem, timestamp, n)))
        .find(|path| !path.exists())
        .unwrap_or(first)
}

fn prune_archives(dir: &Path, prefix: &str) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<_> = entries
        .filter_map(Result::ok)
        .filter(|e| {
            let name = e.file_name();
            let name = name.to_string_lossy();
            name.starts_with(prefix) && name.ends_with(".log")
        })
        .collect();
    if archives.len() <= MAX_OLD_LOGS {
        return;
    }

    // Oldest first
    archives.sort_by_key(|e| e.metadata().and_then(|m| m.modified()).ok());
    let excess = archives.len() - MAX_OLD_LOGS;
    for entry in archives.iter().take(excess) {
        let _ = fs::remove_file(entry.path());
    }
}
