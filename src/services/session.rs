//! Device-scoped session persistence
//!
//! Tokens live in a small JSON file next to the app data. The store is a
//! cheap handle; every accessor reads or rewrites the file, mirroring the
//! key-value storage the clients treat as the source of truth.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Persisted session state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistedSession {
    pub access_token: Option<String>,
    pub device_token: Option<String>,
    /// Pending OTP session between login and verification.
    pub otp_session: Option<String>,
}

#[derive(Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted session. A missing file means logged out.
    pub async fn load(&self) -> AppResult<PersistedSession> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| AppError::Session(format!("Corrupt session file: {}", e))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(PersistedSession::default())
            }
            Err(e) => Err(AppError::Session(format!("Cannot read session file: {}", e))),
        }
    }

    pub async fn save(&self, session: &PersistedSession) -> AppResult<()> {
        let bytes = serde_json::to_vec_pretty(session)
            .map_err(|e| AppError::Session(format!("Cannot encode session: {}", e)))?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| AppError::Session(format!("Cannot write session file: {}", e)))
    }

    pub async fn access_token(&self) -> AppResult<Option<String>> {
        Ok(self.load().await?.access_token)
    }

    pub async fn device_token(&self) -> AppResult<Option<String>> {
        Ok(self.load().await?.device_token)
    }

    pub async fn otp_session(&self) -> AppResult<Option<String>> {
        Ok(self.load().await?.otp_session)
    }

    /// Remember the pending OTP session issued at login.
    pub async fn set_otp_session(&self, otp_session: &str) -> AppResult<()> {
        let mut session = self.load().await?;
        session.otp_session = Some(otp_session.to_string());
        self.save(&session).await
    }

    /// Persist tokens issued after OTP validation and drop the pending
    /// OTP session.
    pub async fn set_tokens(&self, access_token: &str, device_token: &str) -> AppResult<()> {
        let mut session = self.load().await?;
        session.access_token = Some(access_token.to_string());
        session.device_token = Some(device_token.to_string());
        session.otp_session = None;
        self.save(&session).await
    }

    /// Forget everything (logout).
    pub async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Session(format!(
                "Cannot remove session file: {}",
                e
            ))),
        }
    }
}
