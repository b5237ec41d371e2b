use super::api::{self, GenreList, MovieDetails, TimeWindow, TmdbPage};
use crate::backend::client::create_http_client;
use crate::error::{SourceError, SourceResult};
use crate::traits::SearchProvider;
use async_trait::async_trait;
use movieflix_models::{Genre, SearchResult};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

/// TMDB v3 metadata API, authenticated by an `api_key` query parameter
#[derive(Clone)]
pub struct TmdbClient {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl TmdbClient {
    pub fn new(base_url: impl Into<String>, api_key: String) -> Self {
        Self {
            client: Arc::new(create_http_client()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// `endpoint` may already carry a query string; the key is appended
    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> SourceResult<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(endpoint, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn popular(&self, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/movie/popular?page={}", page)).await
    }

    pub async fn trending(&self, window: TimeWindow, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/trending/movie/{}?page={}", window.as_str(), page)).await
    }

    pub async fn top_rated(&self, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/movie/top_rated?page={}", page)).await
    }

    pub async fn now_playing(&self, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/movie/now_playing?page={}", page)).await
    }

    pub async fn upcoming(&self, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/movie/upcoming?page={}", page)).await
    }

    pub async fn details(&self, movie_id: u64) -> SourceResult<MovieDetails> {
        self.fetch(&format!("/movie/{}", movie_id)).await
    }

    pub async fn similar(&self, movie_id: u64, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/movie/{}/similar?page={}", movie_id, page)).await
    }

    pub async fn search_movies(&self, query: &str, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/search/movie?query={}&page={}", urlencoding::encode(query), page))
            .await
    }

    pub async fn by_genre(&self, genre_id: u32, page: u32) -> SourceResult<TmdbPage> {
        self.fetch(&format!("/discover/movie?with_genres={}&page={}", genre_id, page))
            .await
    }

    pub async fn genres(&self) -> SourceResult<Vec<Genre>> {
        let list: GenreList = self.fetch("/genre/movie/list").await?;
        Ok(list.genres)
    }
}

#[async_trait]
impl SearchProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn search(&self, query: &str) -> SourceResult<Vec<SearchResult>> {
        let page = self.search_movies(query, 1).await?;
        Ok(page.results.into_iter().map(api::to_search_result).collect())
    }
}
