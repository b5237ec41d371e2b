use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A selectable viewer profile on the "Who's watching?" screen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub watched_count: u32,
    pub last_active: Option<DateTime<Utc>>,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
}
