use super::client::BackendClient;
use crate::error::{SourceError, SourceResult};
use movieflix_models::{AuthResponse, LoginCredentials, RegisterData, User};
use tracing::{info, warn};

impl BackendClient {
    /// `POST /api/auth/login`; the returned token is persisted
    pub async fn login(&self, credentials: &LoginCredentials) -> SourceResult<AuthResponse> {
        let response: AuthResponse = self.post_json("/api/auth/login", credentials).await?;
        self.store_session(&response)?;
        info!(user_id = response.user.id, "Logged in");
        Ok(response)
    }

    /// `POST /api/auth/register`; the returned token is persisted
    pub async fn register(&self, data: &RegisterData) -> SourceResult<AuthResponse> {
        let response: AuthResponse = self.post_json("/api/auth/register", data).await?;
        self.store_session(&response)?;
        info!(user_id = response.user.id, "Registered");
        Ok(response)
    }

    /// Remove the local token, then tell the backend
    ///
    /// The token is gone before the request is built, so the logout call
    /// itself carries no bearer credential. A failed server call does not undo
    /// the local logout.
    pub async fn logout(&self) -> SourceResult<()> {
        {
            let mut store = self
                .credentials()
                .lock()
                .map_err(|_| SourceError::Storage("credential store lock poisoned".to_string()))?;
            store
                .clear_token()
                .map_err(|e| SourceError::Storage(format!("failed to clear token: {}", e)))?;
        }

        if let Err(e) = self.post_no_content("/api/auth/logout", &serde_json::json!({})).await {
            warn!(error = %e, "Backend logout call failed; local session already cleared");
        }
        info!("Logged out");
        Ok(())
    }

    /// `GET /api/auth/me`
    pub async fn current_user(&self) -> SourceResult<User> {
        self.get_json("/api/auth/me", &[]).await
    }

    fn store_session(&self, response: &AuthResponse) -> SourceResult<()> {
        let mut store = self
            .credentials()
            .lock()
            .map_err(|_| SourceError::Storage("credential store lock poisoned".to_string()))?;
        store.set_token(response.token.clone());
        store.set_username(response.user.username.clone());
        store
            .save()
            .map_err(|e| SourceError::Storage(format!("failed to save session token: {}", e)))
    }
}
