//! Client for the MovieFlix backend: auth, catalog, preferences,
//! recommendations and search all share one bearer-authenticated HTTP client.

pub mod api;
pub mod auth;
pub mod client;

pub use client::BackendClient;
