pub mod auth;
pub mod catalog;
pub mod genre;
pub mod movie;
pub mod profile;
pub mod recommendation;
pub mod search;
pub mod watch_history;

pub use auth::{AuthResponse, LoginCredentials, RegisterData, User};
pub use catalog::{CatalogMovie, MovieFilters, MovieListResponse};
pub use genre::Genre;
pub use movie::{ImageSize, Movie, PLACEHOLDER_IMAGE};
pub use profile::UserProfile;
pub use recommendation::{Recommendation, RecommendationItem};
pub use search::SearchResult;
pub use watch_history::{UserWatchHistory, WatchHistoryEntry};
