use serde::{Deserialize, Serialize};

/// One entry in either list of a recommendation payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationItem {
    pub item_index: u64,
    pub asin: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Server-computed personalization result for one user
///
/// The two lists are disjoint in intent (watched vs. suggested) but the client
/// does not enforce it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub user_index: u64,
    #[serde(default)]
    pub watched_items: Vec<RecommendationItem>,
    #[serde(default)]
    pub top_recommendations: Vec<RecommendationItem>,
}
