//! Platform directory resolution.
//!
//! Configuration lives in the OS config directory (XDG on Linux, Known
//! Folders on Windows, Library on macOS) unless overridden on the command
//! line; logs go next to it.

use std::io;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "lantern";

/// Where the application reads config and writes logs.
#[derive(Clone, Debug)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    /// JSON log file in debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolves directories, honouring a config directory override.
    ///
    /// Falls back to the working directory when the OS exposes no config
    /// directory.
    pub fn resolve(config_override: Option<&Path>) -> Self {
        let config_dir = match config_override {
            Some(dir) => dir.to_path_buf(),
            None => lantern_config::default_config_dir(),
        };
        let log_dir = dirs::data_local_dir()
            .map(|d| d.join(APP_NAME))
            .unwrap_or_else(|| config_dir.clone())
            .join("logs");
        Self {
            config_dir,
            log_dir,
        }
    }

    /// Directories rooted under `root`, for tests.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Creates both directories.
    pub fn create_dirs(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}
