use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override from the `MOVIEFLIX_HOME` environment variable
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var("MOVIEFLIX_HOME").ok().filter(|v| !v.is_empty()).map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("movieflix");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, logs in a subdirectory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            log_dir: base.join("logs"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Durable client key-value store (session token, selected profile, API keys)
    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("movieflix.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = base_path_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/movieflix on Linux)
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".movieflix")))
    }
}
