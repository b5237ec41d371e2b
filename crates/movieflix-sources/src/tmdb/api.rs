use movieflix_models::{Genre, ImageSize, Movie, SearchResult};
use serde::{Deserialize, Serialize};

/// One page of a TMDB movie listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<Movie>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetails {
    #[serde(flatten)]
    pub movie: Movie,
    #[serde(default)]
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub budget: u64,
    #[serde(default)]
    pub revenue: u64,
    pub status: Option<String>,
    pub tagline: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GenreList {
    pub genres: Vec<Genre>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Day,
    Week,
}

impl TimeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
        }
    }
}

/// Map a TMDB movie into the provider-neutral search shape
pub fn to_search_result(movie: Movie) -> SearchResult {
    let image_url = movie
        .poster_path
        .as_ref()
        .filter(|p| !p.is_empty())
        .map(|_| movie.poster_url(ImageSize::W500));
    let year = movie.release_year();

    SearchResult {
        external_id: movie.id.to_string(),
        title: movie.title,
        image_url,
        year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_details_flatten() {
        let json = r#"{
            "id": 27205, "title": "Inception", "overview": "Dreams", "release_date": "2010-07-15",
            "vote_average": 8.4, "genres": [{"id": 28, "name": "Action"}], "runtime": 148,
            "budget": 160000000, "revenue": 825532764, "status": "Released", "tagline": "Your mind is the scene of the crime."
        }"#;
        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.movie.title, "Inception");
        assert_eq!(details.runtime, Some(148));
        assert_eq!(details.genres[0].name, "Action");
    }

    #[test]
    fn test_to_search_result() {
        let movie: Movie = serde_json::from_str(
            r#"{"id": 603, "title": "The Matrix", "poster_path": "/m.jpg", "release_date": "1999-03-30"}"#,
        )
        .unwrap();
        let result = to_search_result(movie);
        assert_eq!(result.external_id, "603");
        assert_eq!(result.image_url.as_deref(), Some("https://image.tmdb.org/t/p/w500/m.jpg"));
        assert_eq!(result.year, Some(1999));
    }

    #[test]
    fn test_to_search_result_without_poster() {
        let movie: Movie = serde_json::from_str(r#"{"id": 1, "title": "Untitled"}"#).unwrap();
        assert_eq!(to_search_result(movie).image_url, None);
    }
}
