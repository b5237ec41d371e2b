//! Paginated backend catalog browsing

use crate::recommendation::LoadStatus;
use anyhow::{anyhow, bail, Result};
use movieflix_models::{CatalogMovie, MovieFilters};
use movieflix_sources::CatalogSource;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const CATALOG_LOAD_ERROR: &str = "Failed to load movies. Please try again later.";
pub const CATALOG_EMPTY_MESSAGE: &str = "No movies found. Try adjusting your search.";

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CatalogPage {
    pub movies: Vec<CatalogMovie>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
    pub status: LoadStatus,
}

impl CatalogPage {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

pub struct CatalogBrowser<S: ?Sized> {
    source: Arc<S>,
    filters: MovieFilters,
    page: CatalogPage,
}

impl<S: CatalogSource + ?Sized> CatalogBrowser<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self::with_filters(source, MovieFilters::default())
    }

    pub fn with_filters(source: Arc<S>, filters: MovieFilters) -> Self {
        Self {
            source,
            filters,
            page: CatalogPage::default(),
        }
    }

    pub fn filters(&self) -> &MovieFilters {
        &self.filters
    }

    pub fn page(&self) -> &CatalogPage {
        &self.page
    }

    /// Fetch the page described by the current filters
    pub async fn load(&mut self) -> &CatalogPage {
        self.page.status = LoadStatus::Loading;

        match self.source.list_movies(&self.filters).await {
            Ok(response) => {
                debug!(page = response.page, total = response.total, "Loaded catalog page");
                self.page = CatalogPage {
                    movies: response.movies,
                    total: response.total,
                    page: response.page,
                    total_pages: response.total_pages,
                    status: LoadStatus::Ready,
                };
            }
            Err(e) => {
                warn!(error = %e, "Catalog request failed");
                let message = if e.is_unauthorized() {
                    e.user_message()
                } else {
                    CATALOG_LOAD_ERROR.to_string()
                };
                self.page = CatalogPage {
                    status: LoadStatus::Failed(message),
                    ..CatalogPage::default()
                };
            }
        }
        &self.page
    }

    /// New search text always restarts at page 1
    pub async fn submit_search(&mut self, query: &str) -> &CatalogPage {
        let query = query.trim();
        self.filters.search = if query.is_empty() { None } else { Some(query.to_string()) };
        self.filters.page = Some(1);
        self.load().await
    }

    pub async fn go_to_page(&mut self, page: u32) -> &CatalogPage {
        self.filters.page = Some(page.max(1));
        self.load().await
    }

    /// Submit a 1-5 star rating, then refresh the current page
    pub async fn rate(&mut self, movie_id: u64, rating: u8) -> Result<()> {
        validate_rating(rating)?;
        self.source
            .rate_movie(movie_id, rating)
            .await
            .map_err(|e| anyhow!("Failed to rate movie {}: {}", movie_id, e.user_message()))?;
        info!(movie_id, rating, "Rated movie");
        self.load().await;
        Ok(())
    }
}

pub fn validate_rating(rating: u8) -> Result<()> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        bail!("Rating must be between {} and {}, got {}", MIN_RATING, MAX_RATING, rating);
    }
    Ok(())
}
