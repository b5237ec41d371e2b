pub mod catalog;
pub mod filter;
pub mod mock_data;
pub mod recommendation;
pub mod search;
pub mod sections;
pub mod watch_history;

pub use catalog::{CatalogBrowser, CatalogPage};
pub use filter::{
    available_years, filter_movies, sort_movies, ActiveFilter, FilterCriteria, GenreSelector, SortKey, ViewMode,
    YearSelector,
};
pub use recommendation::{LoadStatus, RecommendationAdapter, RecommendationView};
pub use search::{SearchAdapter, SearchView};
pub use sections::{dashboard, landing_page, recommendation_carousels, Carousel, Dashboard, HeroBanner, LandingPage};
pub use watch_history::{load_watch_history, WatchHistoryView, WatchedMovie};
