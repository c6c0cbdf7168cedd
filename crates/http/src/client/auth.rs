//! Authentication API client methods

use super::{ClientError, LibraryClient};
use crate::types::{
    LoginRequest, LoginResponse, MessageResponse, RegisterRequest, ValidateResponse,
};
use libris_core::SignOutReason;

impl LibraryClient {
    /// Log in and store the issued token in the session
    pub async fn login(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<LoginResponse, ClientError> {
        let body = LoginRequest {
            username: username.into(),
            password: password.into(),
        };
        let response: LoginResponse = self.post("/auth/login", &body).await?;
        self.session().set_token(&response.token)?;
        tracing::info!(user_id = response.user_id, "Logged in");
        Ok(response)
    }

    /// Create a member account
    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ClientError> {
        self.post("/auth/register", request).await
    }

    /// Ask the server whether the stored token is still accepted
    pub async fn validate(&self) -> Result<ValidateResponse, ClientError> {
        self.get("/auth/validate").await
    }

    /// Forget the stored token. Returns whether there was one.
    pub fn logout(&self) -> bool {
        self.session().clear(SignOutReason::Logout)
    }
}
