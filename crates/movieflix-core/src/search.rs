//! Free-text search state, independent of recommendation loading

use crate::recommendation::LoadStatus;
use movieflix_models::SearchResult;
use movieflix_sources::SearchProvider;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const SEARCH_ERROR_PREFIX: &str = "Search failed";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SearchView {
    pub query: Option<String>,
    pub status: LoadStatus,
    pub results: Vec<SearchResult>,
}

struct SearchState {
    view: SearchView,
    /// Bumped on every submission; responses carrying an older value are dropped
    generation: u64,
}

/// Runs searches against one provider; the latest submitted query wins
#[derive(Clone)]
pub struct SearchAdapter {
    provider: Arc<dyn SearchProvider>,
    state: Arc<Mutex<SearchState>>,
}

impl SearchAdapter {
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            state: Arc::new(Mutex::new(SearchState {
                view: SearchView::default(),
                generation: 0,
            })),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.provider_name()
    }

    pub async fn view(&self) -> SearchView {
        self.state.lock().await.view.clone()
    }

    /// Submit a query; a blank query clears the results without a request
    pub async fn submit(&self, query: &str) -> SearchView {
        let query = query.trim().to_string();

        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            if query.is_empty() {
                state.view = SearchView::default();
                return state.view.clone();
            }
            state.view.query = Some(query.clone());
            state.view.status = LoadStatus::Loading;
            state.generation
        };

        let result = self.provider.search(&query).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            debug!(query = %query, "Discarding superseded search response");
            return state.view.clone();
        }

        match result {
            Ok(results) => {
                debug!(query = %query, provider = self.provider.provider_name(), hits = results.len(), "Search finished");
                state.view.results = results;
                state.view.status = LoadStatus::Ready;
            }
            Err(e) => {
                warn!(query = %query, error = %e, "Search failed");
                state.view.results.clear();
                state.view.status = LoadStatus::Failed(format!("{}: {}", SEARCH_ERROR_PREFIX, e.user_message()));
            }
        }
        state.view.clone()
    }
}
