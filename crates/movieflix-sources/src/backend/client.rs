use crate::error::{SourceError, SourceResult};
use movieflix_config::{Config, SharedCredentials};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Create the shared reqwest client; no request timeout is configured
pub fn create_http_client() -> Client {
    Client::builder()
        .user_agent(concat!("movieflix/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// HTTP boundary to the backend
///
/// Every request reads the session token from the credential store right
/// before it is sent and attaches it as a bearer credential when present. A
/// 401 from any endpoint clears the stored token here, so call sites never
/// handle it themselves.
#[derive(Clone)]
pub struct BackendClient {
    client: Arc<Client>,
    base_url: String,
    credentials: SharedCredentials,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, credentials: SharedCredentials) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Arc::new(create_http_client()),
            base_url,
            credentials,
        }
    }

    pub fn from_config(config: &Config, credentials: SharedCredentials) -> Self {
        Self::new(config.api_base_url(), credentials)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> &SharedCredentials {
        &self.credentials
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer_token(&self) -> Option<String> {
        match self.credentials.lock() {
            Ok(store) => store.get_token().cloned(),
            Err(_) => {
                warn!("Credential store lock poisoned, sending request without token");
                None
            }
        }
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .client
            .request(method, self.url(path))
            .header("Accept", "application/json");

        match self.bearer_token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and map non-success statuses to errors
    pub(crate) async fn send(&self, builder: RequestBuilder) -> SourceResult<Response> {
        let response = builder.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            self.handle_unauthorized();
            return Err(SourceError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Status { status, body });
        }

        Ok(response)
    }

    fn handle_unauthorized(&self) {
        match self.credentials.lock() {
            Ok(mut store) => {
                if store.get_token().is_some() {
                    warn!("Backend rejected session token, clearing it");
                }
                if let Err(e) = store.clear_token() {
                    warn!(error = %e, "Failed to persist token removal");
                }
            }
            Err(_) => warn!("Credential store lock poisoned, could not clear token"),
        }
    }

    pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> SourceResult<T> {
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> SourceResult<T> {
        debug!(path, "GET");
        let response = self.send(self.request(Method::GET, path).query(query)).await?;
        Self::decode(response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> SourceResult<T> {
        debug!(path, "POST");
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::decode(response).await
    }

    /// POST whose response body is ignored
    pub(crate) async fn post_no_content<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> SourceResult<()> {
        debug!(path, "POST");
        self.send(self.request(Method::POST, path).json(body)).await?;
        Ok(())
    }
}
