//! Client error types

use libris_core::CoreError;
use serde::Deserialize;
use thiserror::Error;

/// Body message the server sends for an expired session
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token expired";

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The stored token expired before the request was sent
    #[error("Token expired")]
    TokenExpired,

    /// Server reported the session token as expired
    #[error("Session expired ({status}): {message}")]
    SessionExpired { status: u16, message: String },

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// The session could not be updated
    #[error("Session error: {0}")]
    Session(#[from] CoreError),
}

/// JSON error body. Some endpoints use `message`, others `error`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ClientError {
    /// Classify an error response from its status and raw body.
    ///
    /// Only a JSON `message` of exactly `"Token expired"` marks the session
    /// as expired; a plain-text body never does.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok();
        let session_expired = parsed
            .as_ref()
            .and_then(|body| body.message.as_deref())
            == Some(TOKEN_EXPIRED_MESSAGE);

        let message = parsed
            .and_then(|body| body.message.or(body.error))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body.to_string()
                }
            });

        if session_expired && status != reqwest::StatusCode::UNAUTHORIZED {
            Self::SessionExpired {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::from_status(status, message)
        }
    }

    /// Create error from HTTP status code
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of a server-side failure
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::ServerError { status, .. } | Self::SessionExpired { status, .. } => {
                Some(*status)
            }
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Message reported by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::BadRequest(message)
            | Self::AuthenticationFailed(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::ServerError { message, .. }
            | Self::SessionExpired { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Whether this error means the session is no longer valid
    pub fn is_auth_expired(&self) -> bool {
        matches!(
            self,
            Self::TokenExpired | Self::AuthenticationFailed(_) | Self::SessionExpired { .. }
        )
    }
}
