use super::client::BackendClient;
use crate::error::SourceResult;
use crate::traits::{CatalogSource, RecommendationSource, SearchProvider, WatchHistorySource};
use async_trait::async_trait;
use movieflix_models::{
    CatalogMovie, MovieFilters, MovieListResponse, Recommendation, SearchResult, UserProfile,
    UserWatchHistory, WatchHistoryEntry,
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// Hit returned by the backend `/search` route
///
/// The backend reuses its recommendation item shape, so the id may arrive as
/// `asin`, as a numeric `id`, or both.
#[derive(Debug, Deserialize)]
struct BackendSearchHit {
    #[serde(default)]
    asin: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    title: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    year: Option<i32>,
}

impl BackendSearchHit {
    fn into_result(self) -> SearchResult {
        let external_id = self
            .asin
            .filter(|a| !a.is_empty())
            .or_else(|| {
                self.id.map(|v| match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
            })
            .unwrap_or_default();

        SearchResult {
            external_id,
            title: self.title,
            image_url: self.image_url.filter(|u| !u.is_empty()),
            year: self.year,
        }
    }
}

impl BackendClient {
    /// `GET /recommend?id={user_id}&top_k={n}`
    pub async fn recommend(&self, user_id: u64, top_k: Option<u32>) -> SourceResult<Recommendation> {
        let mut query = vec![("id", user_id.to_string())];
        if let Some(k) = top_k {
            query.push(("top_k", k.to_string()));
        }
        let recommendation: Recommendation = self.get_json("/recommend", &query).await?;
        debug!(
            user_id,
            watched = recommendation.watched_items.len(),
            recommended = recommendation.top_recommendations.len(),
            "Fetched recommendation"
        );
        Ok(recommendation)
    }

    /// `GET /search?query={q}`
    pub async fn search_titles(&self, query: &str) -> SourceResult<Vec<SearchResult>> {
        let hits: Vec<BackendSearchHit> = self.get_json("/search", &[("query", query.to_string())]).await?;
        Ok(hits.into_iter().map(BackendSearchHit::into_result).collect())
    }

    /// `GET /api/movies` with the filter set as query parameters
    pub async fn get_movies(&self, filters: &MovieFilters) -> SourceResult<MovieListResponse> {
        self.get_json("/api/movies", &filters.to_query_pairs()).await
    }

    /// `GET /api/movies/{id}`
    pub async fn get_movie(&self, movie_id: u64) -> SourceResult<CatalogMovie> {
        self.get_json(&format!("/api/movies/{}", movie_id), &[]).await
    }

    /// `POST /api/movies/{id}/rate`
    pub async fn rate_movie(&self, movie_id: u64, rating: u8) -> SourceResult<()> {
        self.post_no_content(&format!("/api/movies/{}/rate", movie_id), &json!({ "rating": rating }))
            .await
    }

    /// `GET /api/recommendations/hybrid` for the signed-in user
    pub async fn hybrid_recommendations(&self) -> SourceResult<Vec<CatalogMovie>> {
        self.get_json("/api/recommendations/hybrid", &[]).await
    }

    /// `POST /api/preferences/watch-history`
    pub async fn add_to_watch_history(&self, movie_id: u64) -> SourceResult<()> {
        self.post_no_content("/api/preferences/watch-history", &json!({ "movieId": movie_id }))
            .await
    }

    /// `GET /api/preferences/watch-history`
    pub async fn get_watch_history(&self) -> SourceResult<Vec<WatchHistoryEntry>> {
        self.get_json("/api/preferences/watch-history", &[]).await
    }

    /// `GET /users`
    pub async fn list_users(&self) -> SourceResult<Vec<UserProfile>> {
        self.get_json("/users", &[]).await
    }

    /// `GET /users/{id}/watch-history`
    pub async fn user_watch_history(&self, user_id: u64) -> SourceResult<Vec<UserWatchHistory>> {
        self.get_json(&format!("/users/{}/watch-history", user_id), &[]).await
    }
}

#[async_trait]
impl RecommendationSource for BackendClient {
    async fn fetch_recommendation(&self, user_id: u64, top_k: Option<u32>) -> SourceResult<Recommendation> {
        self.recommend(user_id, top_k).await
    }
}

#[async_trait]
impl SearchProvider for BackendClient {
    fn provider_name(&self) -> &str {
        "backend"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<SearchResult>> {
        self.search_titles(query).await
    }
}

#[async_trait]
impl CatalogSource for BackendClient {
    async fn list_movies(&self, filters: &MovieFilters) -> SourceResult<MovieListResponse> {
        self.get_movies(filters).await
    }

    async fn get_movie(&self, movie_id: u64) -> SourceResult<CatalogMovie> {
        BackendClient::get_movie(self, movie_id).await
    }

    async fn rate_movie(&self, movie_id: u64, rating: u8) -> SourceResult<()> {
        BackendClient::rate_movie(self, movie_id, rating).await
    }
}

#[async_trait]
impl WatchHistorySource for BackendClient {
    async fn watch_history(&self) -> SourceResult<Vec<WatchHistoryEntry>> {
        self.get_watch_history().await
    }

    async fn add_to_watch_history(&self, movie_id: u64) -> SourceResult<()> {
        BackendClient::add_to_watch_history(self, movie_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_hit_prefers_asin() {
        let hit: BackendSearchHit =
            serde_json::from_str(r#"{"asin": "B00X", "id": 4, "title": "Alien"}"#).unwrap();
        assert_eq!(hit.into_result().external_id, "B00X");
    }

    #[test]
    fn test_search_hit_falls_back_to_numeric_id() {
        let hit: BackendSearchHit =
            serde_json::from_str(r#"{"id": 42, "title": "Alien", "image_url": ""}"#).unwrap();
        let result = hit.into_result();
        assert_eq!(result.external_id, "42");
        assert_eq!(result.image_url, None);
    }
}
