use crate::recommendation::LoadStatus;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use movieflix_models::CatalogMovie;
use movieflix_sources::{CatalogSource, SourceResult, WatchHistorySource};
use serde::Serialize;
use tracing::{debug, instrument, warn};

pub const HISTORY_LOAD_ERROR: &str = "Failed to load watch history";
pub const HISTORY_EMPTY_MESSAGE: &str = "No movies in your watch history yet";

/// A history entry joined with its catalog details
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WatchedMovie {
    pub movie: CatalogMovie,
    pub watched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WatchHistoryView {
    pub status: LoadStatus,
    pub entries: Vec<WatchedMovie>,
}

/// Load the signed-in user's history and resolve every entry's details
///
/// Details are fetched concurrently. One failed lookup fails the whole view,
/// so a partial list is never shown.
#[instrument(skip(source))]
pub async fn load_watch_history<S>(source: &S) -> WatchHistoryView
where
    S: WatchHistorySource + CatalogSource + ?Sized,
{
    match fetch_entries(source).await {
        Ok(entries) => {
            debug!(count = entries.len(), "Loaded watch history");
            WatchHistoryView {
                status: LoadStatus::Ready,
                entries,
            }
        }
        Err(e) => {
            warn!(error = %e, "Watch history request failed");
            let message = if e.is_unauthorized() {
                e.user_message()
            } else {
                HISTORY_LOAD_ERROR.to_string()
            };
            WatchHistoryView {
                status: LoadStatus::Failed(message),
                entries: Vec::new(),
            }
        }
    }
}

async fn fetch_entries<S>(source: &S) -> SourceResult<Vec<WatchedMovie>>
where
    S: WatchHistorySource + CatalogSource + ?Sized,
{
    let history = source.watch_history().await?;
    let details = try_join_all(history.iter().map(|entry| source.get_movie(entry.movie_id))).await?;

    Ok(history
        .into_iter()
        .zip(details)
        .map(|(entry, movie)| WatchedMovie {
            movie,
            watched_at: entry.watched_at,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use movieflix_models::{MovieFilters, MovieListResponse, WatchHistoryEntry};
    use movieflix_sources::{SourceError, StatusCode};

    struct FakeHistory {
        entries: Vec<WatchHistoryEntry>,
        missing_movie: Option<u64>,
    }

    #[async_trait]
    impl WatchHistorySource for FakeHistory {
        async fn watch_history(&self) -> SourceResult<Vec<WatchHistoryEntry>> {
            Ok(self.entries.clone())
        }

        async fn add_to_watch_history(&self, _movie_id: u64) -> SourceResult<()> {
            Ok(())
        }
    }

    #[async_trait]
    impl CatalogSource for FakeHistory {
        async fn list_movies(&self, _filters: &MovieFilters) -> SourceResult<MovieListResponse> {
            unimplemented!()
        }

        async fn get_movie(&self, movie_id: u64) -> SourceResult<CatalogMovie> {
            if self.missing_movie == Some(movie_id) {
                return Err(SourceError::Status {
                    status: StatusCode::NOT_FOUND,
                    body: String::new(),
                });
            }
            Ok(CatalogMovie {
                id: movie_id,
                title: format!("Movie {}", movie_id),
                description: String::new(),
                release_year: None,
                genres: vec![],
                poster_url: None,
                average_rating: 0.0,
                total_ratings: 0,
            })
        }

        async fn rate_movie(&self, _movie_id: u64, _rating: u8) -> SourceResult<()> {
            Ok(())
        }
    }

    fn entry(movie_id: u64, day: u32) -> WatchHistoryEntry {
        WatchHistoryEntry {
            movie_id,
            watched_at: Utc.with_ymd_and_hms(2024, 5, day, 20, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_entries_keep_history_order() {
        let source = FakeHistory {
            entries: vec![entry(3, 2), entry(1, 1)],
            missing_movie: None,
        };
        let view = load_watch_history(&source).await;
        assert_eq!(view.status, LoadStatus::Ready);
        let ids: Vec<u64> = view.entries.iter().map(|e| e.movie.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(view.entries[0].watched_at, entry(3, 2).watched_at);
    }

    #[tokio::test]
    async fn test_one_failed_lookup_fails_the_view() {
        let source = FakeHistory {
            entries: vec![entry(3, 2), entry(1, 1)],
            missing_movie: Some(1),
        };
        let view = load_watch_history(&source).await;
        assert!(view.entries.is_empty());
        assert_eq!(view.status.error(), Some(HISTORY_LOAD_ERROR));
    }
}
