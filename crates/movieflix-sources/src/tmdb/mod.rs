pub mod api;
pub mod client;

pub use api::{MovieDetails, TimeWindow, TmdbPage};
pub use client::TmdbClient;
