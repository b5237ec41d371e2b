use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry of the signed-in user's watch history (`/api/preferences/watch-history`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryEntry {
    pub movie_id: u64,
    pub watched_at: DateTime<Utc>,
}

/// Entry of a profile's watch history (`/users/{id}/watch-history`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserWatchHistory {
    pub movie_id: u64,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub rating: f64,
    pub watched_at: DateTime<Utc>,
}
