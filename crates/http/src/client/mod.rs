//! Library API client

pub mod auth;
pub mod books;
pub mod error;
pub mod loans;
pub mod users;

use error::ClientError;
use libris_core::{ApiConfig, SessionManager, SignOutReason, token};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

pub use libris_core::config::DEFAULT_BASE_URL;

/// Library API client bound to a session
#[derive(Clone)]
pub struct LibraryClient {
    client: Client,
    base_url: String,
    session: SessionManager,
}

impl LibraryClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>, session: SessionManager) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).session(session).build()
    }

    /// Create a new client builder
    pub fn builder() -> LibraryClientBuilder {
        LibraryClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Session this client reads its credentials from
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Create a request builder for `path`.
    ///
    /// A stored token is sent as a bearer credential. If it has already
    /// expired it is cleared instead and the request is refused.
    pub fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = self.session.token() {
            if token::is_expired(&token) {
                tracing::info!(path, "Refusing request with expired token");
                self.session.clear(SignOutReason::ExpiredBeforeRequest);
                return Err(ClientError::TokenExpired);
            }
            request = request.bearer_auth(token);
        }

        Ok(request)
    }

    /// Execute a request and handle common errors.
    ///
    /// A 401, or a JSON error body reporting an expired token, ends the
    /// session before the error is returned. Without a stored token there is
    /// no session to end and no sign-out event is sent; guests are already
    /// kept off protected views by the route guard.
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let error = ClientError::from_response(status, &body);
        if error.is_auth_expired() {
            tracing::warn!(status = status.as_u16(), "Server rejected the session");
            self.session.clear(SignOutReason::Rejected);
        } else {
            tracing::debug!(status = status.as_u16(), error = %error, "Request failed");
        }
        Err(error)
    }

    /// GET `path` and decode the JSON response
    pub async fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(reqwest::Method::GET, path)?;
        self.execute(request).await
    }

    /// POST `body` as JSON to `path` and decode the JSON response
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let request = self.request(reqwest::Method::POST, path)?.json(body);
        self.execute(request).await
    }

    /// PUT `body` as JSON to `path` and decode the JSON response
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: serde::Serialize + ?Sized,
        T: serde::de::DeserializeOwned,
    {
        let request = self.request(reqwest::Method::PUT, path)?.json(body);
        self.execute(request).await
    }

    /// DELETE `path` and decode the JSON response
    pub async fn delete<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.request(reqwest::Method::DELETE, path)?;
        self.execute(request).await
    }
}

/// Builder for LibraryClient
#[derive(Default)]
pub struct LibraryClientBuilder {
    base_url: Option<String>,
    session: Option<SessionManager>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl LibraryClientBuilder {
    /// Take base URL and timeout from `config`
    pub fn config(mut self, config: &ApiConfig) -> Self {
        self.base_url = Some(config.base_url.clone());
        self.timeout = config.timeout();
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the session the client reads and clears
    pub fn session(mut self, session: SessionManager) -> Self {
        self.session = Some(session);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Build the client
    pub fn build(self) -> Result<LibraryClient, ClientError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        if base_url.trim().is_empty() {
            return Err(ClientError::Configuration("base_url must not be empty".into()));
        }

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        #[cfg(not(target_arch = "wasm32"))]
        {
            if let Some(timeout) = self.timeout {
                client_builder = client_builder.timeout(timeout);
            }
            client_builder = client_builder.user_agent(
                self.user_agent
                    .unwrap_or_else(|| concat!("libris-client/", env!("CARGO_PKG_VERSION")).into()),
            );
        }

        #[cfg(target_arch = "wasm32")]
        let _ = (self.timeout, self.user_agent); // The browser controls both

        let client = client_builder.build()?;

        Ok(LibraryClient {
            client,
            base_url,
            session: self.session.unwrap_or_else(SessionManager::in_memory),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = LibraryClient::builder().build().unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert!(client.session().token().is_none());
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = LibraryClient::new("http://localhost:5000/", SessionManager::in_memory())
            .unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }

    #[test]
    fn test_builder_rejects_empty_base_url() {
        let result = LibraryClient::builder().base_url("  ").build();
        assert!(matches!(result, Err(ClientError::Configuration(_))));
    }

    #[test]
    fn test_builder_from_config() {
        let config = ApiConfig {
            base_url: "https://library.example.org/".to_string(),
            timeout_secs: Some(5),
        };
        let client = LibraryClient::builder().config(&config).build().unwrap();
        assert_eq!(client.base_url(), "https://library.example.org");
    }

    #[test]
    fn test_request_without_token_is_unauthenticated() {
        let client = LibraryClient::builder().build().unwrap();
        let request = client
            .request(reqwest::Method::GET, "/books/")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(request.url().as_str(), "http://127.0.0.1:5000/books/");
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_request_with_garbage_token_is_refused() {
        let session = SessionManager::in_memory();
        session.set_token("garbage").unwrap();
        let client = LibraryClient::builder().session(session.clone()).build().unwrap();

        let result = client.request(reqwest::Method::GET, "/books/");
        assert!(matches!(result, Err(ClientError::TokenExpired)));
        assert!(session.token().is_none());
    }
}
