use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Shown in place of a poster or backdrop the record does not carry
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// A displayable catalog entry in TMDB's shape
///
/// Used both for the built-in demo catalog and for records returned by the
/// TMDB metadata API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    /// `YYYY-MM-DD`; TMDB sends an empty string for unreleased titles
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub popularity: f64,
    #[serde(default)]
    pub genre_ids: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    W300,
    W500,
    W780,
    Original,
}

impl ImageSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::W300 => "w300",
            ImageSize::W500 => "w500",
            ImageSize::W780 => "w780",
            ImageSize::Original => "original",
        }
    }
}

impl Movie {
    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
    }

    pub fn release_year(&self) -> Option<i32> {
        self.release_date().map(|d| d.year())
    }

    pub fn has_genre(&self, genre_id: u32) -> bool {
        self.genre_ids.contains(&genre_id)
    }

    pub fn poster_url(&self, size: ImageSize) -> String {
        image_url(self.poster_path.as_deref(), size)
    }

    pub fn backdrop_url(&self, size: ImageSize) -> String {
        image_url(self.backdrop_path.as_deref(), size)
    }

    /// Rating rounded to one decimal place, as shown on cards and the hero banner
    pub fn display_rating(&self) -> String {
        format!("{:.1}", self.vote_average)
    }
}

/// Build a TMDB image URL, falling back to the placeholder for empty paths
pub fn image_url(path: Option<&str>, size: ImageSize) -> String {
    match path.filter(|p| !p.is_empty()) {
        Some(p) => format!("{}/{}{}", IMAGE_BASE_URL, size.as_str(), p),
        None => PLACEHOLDER_IMAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: Option<&str>) -> Movie {
        Movie {
            id: 1,
            title: "Arrival".to_string(),
            overview: String::new(),
            poster_path: Some("/arrival.jpg".to_string()),
            backdrop_path: None,
            release_date: release_date.map(|s| s.to_string()),
            vote_average: 7.56,
            vote_count: 100,
            popularity: 50.0,
            genre_ids: vec![18, 878],
        }
    }

    #[test]
    fn test_release_year() {
        assert_eq!(movie(Some("2016-11-10")).release_year(), Some(2016));
        assert_eq!(movie(Some("")).release_year(), None);
        assert_eq!(movie(Some("soon")).release_year(), None);
        assert_eq!(movie(None).release_year(), None);
    }

    #[test]
    fn test_image_urls() {
        let m = movie(None);
        assert_eq!(m.poster_url(ImageSize::W500), "https://image.tmdb.org/t/p/w500/arrival.jpg");
        assert_eq!(m.backdrop_url(ImageSize::Original), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_display_rating() {
        assert_eq!(movie(None).display_rating(), "7.6");
    }

    #[test]
    fn test_deserialize_tmdb_record_with_missing_fields() {
        let json = r#"{"id": 603, "title": "The Matrix", "genre_ids": [28, 878]}"#;
        let m: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(m.id, 603);
        assert!(m.has_genre(878));
        assert_eq!(m.overview, "");
        assert_eq!(m.release_year(), None);
    }
}
