pub mod auth;
pub mod browse;
pub mod catalog;
pub mod clear;
pub mod config;
pub mod discover;
pub mod history;
pub mod home;
pub mod landing;
pub mod profiles;
pub mod prompts;
pub mod search;
pub mod spinner;

use color_eyre::eyre::eyre;
use color_eyre::Report;
use movieflix_sources::SourceError;

/// Turn a source failure into the report shown to the user
///
/// A rejected session renders only the log-in hint; the token is already cleared.
pub fn source_error(err: SourceError, action: &str) -> Report {
    tracing::debug!(error = ?err, action, "Request failed");
    if err.is_unauthorized() {
        eyre!(err.user_message())
    } else {
        eyre!("{}: {}", action, err.user_message())
    }
}

/// Star rendering for a 0-10 or 0-5 score, rounded to one decimal
pub fn format_rating(value: f64) -> String {
    format!("★ {:.1}", value)
}

pub fn format_year(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "-".to_string())
}
