use serde::{Deserialize, Serialize};

/// A movie as served by the backend catalog (`/api/movies`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_ratings: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieListResponse {
    pub movies: Vec<CatalogMovie>,
    pub total: u64,
    pub page: u32,
    pub total_pages: u32,
}

/// Query parameters for a catalog page; unset fields are omitted from the query string
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovieFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_from: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_to: Option<i32>,
}

impl Default for MovieFilters {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(20),
            search: None,
            genres: Vec::new(),
            min_rating: None,
            year_from: None,
            year_to: None,
        }
    }
}

impl MovieFilters {
    /// Flatten into query pairs; genres repeat the `genres` key once per value
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            pairs.push(("search", search.clone()));
        }
        for genre in &self.genres {
            pairs.push(("genres", genre.clone()));
        }
        if let Some(min_rating) = self.min_rating {
            pairs.push(("minRating", min_rating.to_string()));
        }
        if let Some(year_from) = self.year_from {
            pairs.push(("yearFrom", year_from.to_string()));
        }
        if let Some(year_to) = self.year_to {
            pairs.push(("yearTo", year_to.to_string()));
        }
        pairs
    }
}
