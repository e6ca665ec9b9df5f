//! API client functions for the portal and library backends
//!
//! One function per backend endpoint. Every function attaches the fixed
//! headers its backend requires, applies a request timeout, and normalizes
//! failures into [`AppError`](crate::error::AppError).

pub mod library;
pub mod portal;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::{
    config::AppConfig,
    error::{AppError, AppResult},
    services::session::SessionStore,
};

pub use library::LibraryClient;
pub use portal::PortalClient;

/// Clients for both backends, sharing one HTTP connection pool
#[derive(Clone)]
pub struct ApiClient {
    pub portal: PortalClient,
    pub library: LibraryClient,
}

impl ApiClient {
    pub fn new(config: &AppConfig, session: SessionStore) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("mlgcl-librarian/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            portal: PortalClient::new(
                http.clone(),
                config.portal.clone(),
                config.http.clone(),
                session,
            ),
            library: LibraryClient::new(http, config.library.clone(), config.http.clone()),
        })
    }
}

/// Error body shape shared by both backends
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Application-level envelope wrapping list and detail payloads
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default)]
    pub error: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> DataEnvelope<T> {
    /// Unwrap the payload, turning an application-level error flag into
    /// the same taxonomy as a non-success HTTP status.
    pub fn into_data(self) -> AppResult<T> {
        if self.error {
            return Err(AppError::Server {
                status: 200,
                message: self
                    .message
                    .unwrap_or_else(|| "Request rejected by the server".to_string()),
            });
        }
        self.data
            .ok_or_else(|| AppError::NotFound("No matching record".to_string()))
    }
}

/// Envelope for endpoints that answer with a success/failure message only
#[derive(Debug, Deserialize)]
pub(crate) struct MessageEnvelope {
    #[serde(default)]
    pub error: bool,
    pub success: Option<String>,
    pub message: Option<String>,
}

impl MessageEnvelope {
    pub fn into_message(self) -> AppResult<String> {
        if self.error {
            return Err(AppError::Server {
                status: 200,
                message: self
                    .message
                    .unwrap_or_else(|| "Request rejected by the server".to_string()),
            });
        }
        Ok(self
            .success
            .or(self.message)
            .unwrap_or_else(|| "OK".to_string()))
    }
}

/// Map a send failure, distinguishing timeouts from other transport errors.
pub(crate) fn send_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::Timeout
    } else {
        AppError::Network(err)
    }
}

/// Read a JSON response body, mapping non-success statuses to the
/// server-provided message.
pub(crate) async fn read_json<T: DeserializeOwned>(res: reqwest::Response) -> AppResult<T> {
    let status = res.status();
    if !status.is_success() {
        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(message));
        }
        return Err(AppError::Server {
            status: status.as_u16(),
            message,
        });
    }

    res.json::<T>()
        .await
        .map_err(|e| AppError::Internal(format!("Malformed response body: {}", e)))
}

/// Join a base URL and a path the way the backends expect, tolerating a
/// base with or without a trailing slash.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    if base.ends_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_tolerates_trailing_slash() {
        assert_eq!(join_url("https://x/api/", "books/"), "https://x/api/books/");
        assert_eq!(join_url("https://x/api", "books/"), "https://x/api/books/");
    }

    #[test]
    fn envelope_error_flag_becomes_server_rejection() {
        let envelope: DataEnvelope<Vec<i32>> = serde_json::from_value(serde_json::json!({
            "error": true,
            "message": "Out of copies"
        }))
        .unwrap();

        let err = envelope.into_data().unwrap_err();
        assert!(matches!(err, AppError::Server { message, .. } if message == "Out of copies"));
    }

    #[test]
    fn message_envelope_prefers_success_text() {
        let envelope: MessageEnvelope = serde_json::from_value(serde_json::json!({
            "success": "Book borrowed",
            "message": "ignored"
        }))
        .unwrap();

        assert_eq!(envelope.into_message().unwrap(), "Book borrowed");
    }
}
