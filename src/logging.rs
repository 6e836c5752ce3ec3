//! File logging.
//!
//! The TUI owns the terminal, so traces go to a file. Each run gets its own
//! file with a random suffix. The filter is read from `PLANCHETTE_LOG`, then
//! `RUST_LOG`, and defaults to `info`.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use rand::Rng;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PLANCHETTE_LOG";

/// Builds a fresh log file path inside `dir`.
pub fn log_file_path(dir: &Path) -> PathBuf {
    let suffix: u32 = rand::rng().random();
    dir.join(format!("planchette-{:08x}.log", suffix))
}

/// Creates `dir` if needed and opens a new log file in it.
pub fn open_log_file(dir: &Path) -> Result<(PathBuf, File)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let path = log_file_path(dir);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    Ok((path, file))
}

/// Resolves the log filter from the environment.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to a new file in `dir`.
///
/// Returns the path of the log file.
pub fn init(dir: &Path) -> Result<PathBuf> {
    let (path, file) = open_log_file(dir)?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_path_shape() {
        let dir = Path::new("/tmp/logs");
        let path = log_file_path(dir);
        assert_eq!(path.parent(), Some(dir));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("planchette-"));
        assert!(name.ends_with(".log"));
    }

    #[test]
    fn test_open_log_file_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("logs");
        let (path, _file) = open_log_file(&dir).unwrap();
        assert!(path.exists());
        assert!(path.starts_with(&dir));
    }
}
