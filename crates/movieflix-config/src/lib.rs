pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{
    default_api_base_url, ApiConfig, Config, LoggingConfig, RecommendationConfig, SearchConfig,
    SearchProviderKind, TmdbConfig,
};
pub use credentials::{CredentialStore, SharedCredentials};
pub use paths::{base_path_override, PathManager};
