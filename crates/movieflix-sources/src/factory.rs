use crate::backend::BackendClient;
use crate::error::{SourceError, SourceResult};
use crate::tmdb::TmdbClient;
use crate::traits::SearchProvider;
use movieflix_config::{Config, SearchProviderKind, SharedCredentials};
use std::sync::Arc;
use tracing::debug;

/// Pick the search provider named in `[search] provider`
///
/// The backend route needs nothing extra. TMDB needs an API key from the
/// credential store or `TMDB_API_KEY`; it is never read from the config file.
pub fn create_search_provider(
    config: &Config,
    credentials: &SharedCredentials,
    backend: &BackendClient,
) -> SourceResult<Arc<dyn SearchProvider>> {
    match config.search.provider {
        SearchProviderKind::Backend => {
            debug!("Using backend search provider");
            Ok(Arc::new(backend.clone()))
        }
        SearchProviderKind::Tmdb => {
            let client = create_tmdb_client(config, credentials)?;
            debug!("Using TMDB search provider");
            Ok(Arc::new(client))
        }
    }
}

/// TMDB client keyed from the credential store or `TMDB_API_KEY`
pub fn create_tmdb_client(config: &Config, credentials: &SharedCredentials) -> SourceResult<TmdbClient> {
    let api_key = credentials
        .lock()
        .map_err(|_| SourceError::Storage("credential store lock poisoned".to_string()))?
        .get_tmdb_api_key()
        .ok_or_else(|| {
            SourceError::NotConfigured(
                "TMDB needs an API key. Run `movieflix config set --tmdb-api-key <KEY>` or set TMDB_API_KEY"
                    .to_string(),
            )
        })?;
    Ok(TmdbClient::new(config.tmdb.base_url.clone(), api_key))
}
