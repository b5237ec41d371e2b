//! Hero banner and carousel rows for the landing and per-user dashboard screens

use movieflix_models::{ImageSize, Movie, RecommendationItem};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeroBanner {
    pub title: String,
    pub overview: String,
    pub year: Option<i32>,
    pub rating: String,
    pub backdrop_url: String,
}

impl HeroBanner {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            year: movie.release_year(),
            rating: movie.display_rating(),
            backdrop_url: movie.backdrop_url(ImageSize::Original),
        }
    }
}

/// A titled horizontal row of items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Carousel<T> {
    pub title: String,
    pub items: Vec<T>,
}

impl<T: Clone> Carousel<T> {
    /// Row over `items[start..end]`, clamped to the available length
    pub fn window(title: &str, items: &[T], start: usize, end: usize) -> Self {
        let end = end.min(items.len());
        let start = start.min(end);
        Self {
            title: title.to_string(),
            items: items[start..end].to_vec(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandingPage {
    pub hero: Option<HeroBanner>,
    pub carousels: Vec<Carousel<Movie>>,
}

/// Landing screen: the first movie is featured, followed by three rows
pub fn landing_page(movies: &[Movie]) -> LandingPage {
    LandingPage {
        hero: movies.first().map(HeroBanner::from_movie),
        carousels: vec![
            Carousel::window("Trending Now", movies, 0, 8),
            Carousel::window("Top Rated Movies", movies, 1, 9),
            Carousel::window("Popular This Week", movies, 2, 10),
        ],
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub continue_watching: Vec<Movie>,
    pub carousels: Vec<Carousel<Movie>>,
}

pub fn dashboard(movies: &[Movie]) -> Dashboard {
    Dashboard {
        continue_watching: Carousel::window("Continue Watching", movies, 0, 3).items,
        carousels: vec![
            Carousel::window("Recommended for You", movies, 1, 9),
            Carousel::window("Your Favorite Genres", movies, 2, 10),
            Carousel::window("Trending Now", movies, 0, 8),
            Carousel::window("Top Picks for You", movies, 3, 11),
        ],
    }
}

/// Rows for a committed recommendation payload, empty rows omitted
pub fn recommendation_carousels(
    watched: &[RecommendationItem],
    recommended: &[RecommendationItem],
) -> Vec<Carousel<RecommendationItem>> {
    [
        Carousel {
            title: "Because You Watched".to_string(),
            items: watched.to_vec(),
        },
        Carousel {
            title: "Top Recommendations".to_string(),
            items: recommended.to_vec(),
        },
    ]
    .into_iter()
    .filter(|c| !c.is_empty())
    .collect()
}
