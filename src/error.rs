//! Error types for the librarian client

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("QR code issuer '{0}' is not trusted")]
    InvalidQrOrigin(String),

    #[error("No active borrow transaction")]
    NoActiveTransaction,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Message suitable for a user-facing alert.
    ///
    /// Transport and internal details are logged, not shown.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Timeout => "Request timed out".to_string(),
            AppError::Network(e) => {
                tracing::error!("Network error: {:?}", e);
                "Could not reach the server".to_string()
            }
            AppError::Server { message, .. } => message.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::InvalidQrOrigin(_) => {
                "This QR code was not issued by the library portal".to_string()
            }
            AppError::NoActiveTransaction => "No borrow in progress".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Session(msg) => msg.clone(),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Something went wrong".to_string()
            }
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
