use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub recommendations: RecommendationConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Recommendation / auth / catalog backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Size hint sent as `top_k` with every recommendation request
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchConfig {
    #[serde(default)]
    pub provider: SearchProviderKind,
}

/// Which service answers free-text search
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchProviderKind {
    /// The backend's `/search` route
    #[default]
    Backend,
    /// TMDB's `/search/movie`, needs an API key in the credential store
    Tmdb,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_tmdb_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Write logs to this file (rotated daily) instead of stderr
    #[serde(default)]
    pub file: Option<PathBuf>,
}

pub fn default_api_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_top_k() -> u32 {
    10
}

fn default_tmdb_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
        }
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_tmdb_base_url(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if present, otherwise defaults; then apply env overrides
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            Self::load_from_file(path)?
        } else {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("MOVIEFLIX_API_BASE_URL") {
            if !base_url.is_empty() {
                self.api.base_url = base_url;
            }
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_http_url(&self.api.base_url) {
            return Err(anyhow::anyhow!("api.base_url must be an http(s) URL, got '{}'", self.api.base_url));
        }

        if self.recommendations.top_k == 0 {
            return Err(anyhow::anyhow!("recommendations.top_k must be at least 1"));
        }

        if self.search.provider == SearchProviderKind::Tmdb && !is_http_url(&self.tmdb.base_url) {
            return Err(anyhow::anyhow!("search.provider is tmdb but tmdb.base_url is not an http(s) URL"));
        }

        Ok(())
    }

    /// Backend base URL without a trailing slash
    pub fn api_base_url(&self) -> &str {
        self.api.base_url.trim_end_matches('/')
    }
}

fn is_http_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_load_and_save() {
        let file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.api.base_url = "https://recs.example.com/".to_string();
        config.recommendations.top_k = 5;
        config.search.provider = SearchProviderKind::Tmdb;

        let path = file.path().to_path_buf();
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.api_base_url(), "https://recs.example.com");
        assert_eq!(loaded.recommendations.top_k, 5);
        assert_eq!(loaded.search.provider, SearchProviderKind::Tmdb);
        assert_eq!(loaded.tmdb.base_url, "https://api.themoviedb.org/3");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("[search]\nprovider = \"backend\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.recommendations.top_k, 10);
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.search.provider, SearchProviderKind::Backend);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.recommendations.top_k = 0;
        assert!(config.validate().is_err());

        config.recommendations.top_k = 10;
        config.api.base_url = "localhost:8000".to_string();
        assert!(config.validate().is_err());
    }
}
