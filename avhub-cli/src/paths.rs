//! Where the CLI keeps its logs.
//!
//! Logs live in the platform cache directory (XDG on Linux). The running
//! process writes `latest.log`; older runs are archived under their start
//! time and pruned.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use directories::ProjectDirs;

const LATEST_LOG: &str = "latest.log";

/// Archived logs kept besides `latest.log`.
const KEPT_LOGS: usize = 25;

/// `~/.cache/avhub` on Linux, `~/Library/Caches/org.avhub.avhub` on macOS,
/// `%LOCALAPPDATA%\avhub\avhub\cache` on Windows.
fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "avhub", "avhub").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Archives the previous run's log and returns the path for this run's.
///
/// `None` if no home directory is known or the directory cannot be created.
pub fn prepare_log_file() -> Option<PathBuf> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;
    archive_latest(&dir, &chrono::Local::now().format("%Y%m%d_%H%M%S").to_string());
    prune_archives(&dir, KEPT_LOGS);
    Some(dir.join(LATEST_LOG))
}

/// Renames `latest.log` in `dir` to `<stamp>.log`.
fn archive_latest(dir: &Path, stamp: &str) {
    let latest = dir.join(LATEST_LOG);
    if latest.exists() {
        let _ = fs::rename(&latest, dir.join(format!("{stamp}.log")));
    }
}

/// Deletes all but the newest `keep` archived logs in `dir`.
fn prune_archives(dir: &Path, keep: usize) {
    let Ok(entries) = fs::read_dir(dir) else { return };

    let mut archives: Vec<_> = entries
        .flatten()
        .filter(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.ends_with(".log") && name != LATEST_LOG
        })
        .collect();
    if archives.len() <= keep {
        return;
    }

    // Oldest first; same-second writes fall back to the stamped name
    archives.sort_by_key(|entry| {
        (
            entry.metadata().and_then(|m| m.modified()).ok(),
            entry.file_name(),
        )
    });
    let excess = archives.len() - keep;
    for entry in &archives[..excess] {
        let _ = fs::remove_file(entry.path());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("avhub-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn listing(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_archive_latest() {
        let dir = scratch("archive");
        archive_latest(&dir, "20240101_000000");
        assert!(listing(&dir).is_empty());

        fs::write(dir.join(LATEST_LOG), "run 1").unwrap();
        archive_latest(&dir, "20240101_000000");
        assert_eq!(listing(&dir), ["20240101_000000.log"]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_prune_keeps_newest_and_latest() {
        let dir = scratch("prune");
        for name in ["20240101_000000.log", "20240102_000000.log", "20240103_000000.log"] {
            fs::write(dir.join(name), "").unwrap();
            std::thread::sleep(std::time::Duration::from_millis(20));
        }
        fs::write(dir.join(LATEST_LOG), "").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();

        prune_archives(&dir, 2);

        assert_eq!(
            listing(&dir),
            ["20240102_000000.log", "20240103_000000.log", "latest.log", "notes.txt"]
        );
        fs::remove_dir_all(&dir).unwrap();
    }
}
