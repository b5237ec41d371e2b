use reqwest::StatusCode;

/// Shown whenever the backend rejects the session; the token is already gone by then
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please log in again with `movieflix login`.";

/// Failure of a call to the backend or a metadata API
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The backend rejected the session token; the stored token has already been cleared
    #[error("Unauthorized: session token missing or expired")]
    Unauthorized,

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// The local credential store could not be read or written
    #[error("Local storage error: {0}")]
    Storage(String),
}

impl SourceError {
    /// Short message suitable for showing to the user
    pub fn user_message(&self) -> String {
        match self {
            SourceError::Transport(_) => "Could not reach the server".to_string(),
            SourceError::Status { status, .. } => format!("Server responded with {}", status),
            SourceError::Unauthorized => SESSION_EXPIRED_MESSAGE.to_string(),
            SourceError::Decode(_) => "Received an unexpected response from the server".to_string(),
            SourceError::NotConfigured(what) => what.clone(),
            SourceError::Storage(_) => "Could not update the local session store".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SourceError::Unauthorized)
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = SourceError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".to_string(),
        };
        assert_eq!(err.user_message(), "Server responded with 500 Internal Server Error");
        assert!(SourceError::Unauthorized.is_unauthorized());
        assert_eq!(SourceError::Unauthorized.user_message(), SESSION_EXPIRED_MESSAGE);
        assert!(!err.is_unauthorized());
    }
}
