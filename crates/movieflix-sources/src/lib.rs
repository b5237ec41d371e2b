pub mod backend;
pub mod error;
pub mod factory;
pub mod tmdb;
pub mod traits;

pub use backend::BackendClient;
pub use error::{SourceError, SourceResult, SESSION_EXPIRED_MESSAGE};
pub use factory::{create_search_provider, create_tmdb_client};
pub use tmdb::{MovieDetails, TimeWindow, TmdbClient, TmdbPage};
pub use traits::{CatalogSource, RecommendationSource, SearchProvider, WatchHistorySource};
pub use reqwest::StatusCode;
