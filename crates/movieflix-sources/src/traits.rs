use crate::error::SourceResult;
use async_trait::async_trait;
use movieflix_models::{
    CatalogMovie, MovieFilters, MovieListResponse, Recommendation, SearchResult, WatchHistoryEntry,
};

/// Per-user recommendation payloads
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Fetch watched items and top recommendations for `user_id`.
    /// `top_k` is a result-size hint; `None` lets the server decide.
    async fn fetch_recommendation(&self, user_id: u64, top_k: Option<u32>) -> SourceResult<Recommendation>;
}

/// Free-text movie lookup
#[async_trait]
pub trait SearchProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    async fn search(&self, query: &str) -> SourceResult<Vec<SearchResult>>;
}

/// Paginated, filterable movie catalog
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn list_movies(&self, filters: &MovieFilters) -> SourceResult<MovieListResponse>;
    async fn get_movie(&self, movie_id: u64) -> SourceResult<CatalogMovie>;
    async fn rate_movie(&self, movie_id: u64, rating: u8) -> SourceResult<()>;
}

/// Signed-in user's watch history
#[async_trait]
pub trait WatchHistorySource: Send + Sync {
    async fn watch_history(&self) -> SourceResult<Vec<WatchHistoryEntry>>;
    async fn add_to_watch_history(&self, movie_id: u64) -> SourceResult<()>;
}
