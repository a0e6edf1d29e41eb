//! Startup configuration.
//!
//! Everything has a default so the program runs with no setup when the
//! model file sits next to the executable. Environment variables override:
//!
//! - `FLOODWATCH_ASSET_DIR`: directory holding the model and banner
//! - `FLOODWATCH_MODEL_PATH`, `FLOODWATCH_BANNER_PATH`: per-file overrides
//! - `FLOODWATCH_LOG_MODE`: `file`, `stdout` or `auto`
//! - `FLOODWATCH_LOG_FILE`: log path for file mode

use std::path::{Path, PathBuf};

use crate::FloodwatchError;

/// Model file expected in the asset directory.
pub const MODEL_FILE_NAME: &str = "flood_xgboost_model.json";

/// Optional banner expected in the asset directory.
pub const BANNER_FILE_NAME: &str = "flood_banner.txt";

const DEFAULT_LOG_FILE: &str = "floodwatch.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether the terminal is interactive.
    #[must_use]
    pub fn use_file(self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub banner_path: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl AppConfig {
    /// Assets live in `asset_dir`; logging uses the defaults.
    #[must_use]
    pub fn with_asset_dir(asset_dir: &Path) -> Self {
        Self {
            model_path: asset_dir.join(MODEL_FILE_NAME),
            banner_path: asset_dir.join(BANNER_FILE_NAME),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }

    /// Read configuration from the process environment.
    ///
    /// # Errors
    /// Returns error if no asset directory is configured and the
    /// executable's directory cannot be determined.
    pub fn from_env() -> Result<Self, FloodwatchError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, FloodwatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let asset_dir = match lookup("FLOODWATCH_ASSET_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => executable_dir()?,
        };

        let mut config = Self::with_asset_dir(&asset_dir);
        if let Some(path) = lookup("FLOODWATCH_MODEL_PATH") {
            config.model_path = PathBuf::from(path);
        }
        if let Some(path) = lookup("FLOODWATCH_BANNER_PATH") {
            config.banner_path = PathBuf::from(path);
        }
        if let Some(mode) = lookup("FLOODWATCH_LOG_MODE") {
            config.log_mode = LogMode::parse(&mode);
        }
        if let Some(file) = lookup("FLOODWATCH_LOG_FILE") {
            config.log_file = PathBuf::from(file);
        }

        Ok(config)
    }
}

fn executable_dir() -> Result<PathBuf, FloodwatchError> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        FloodwatchError::Config(format!("Executable path {exe:?} has no parent directory"))
    })
}
