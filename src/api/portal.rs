//! Portal API client (authentication, borrower identity)

use std::time::Duration;

use crate::{
    config::{HttpConfig, PortalConfig},
    error::{AppError, AppResult},
    models::user::{Borrower, LoginRequest, LoginResponse, OtpRequest, SessionTokens},
    services::session::SessionStore,
};

use super::{join_url, read_json, send_error};

#[derive(Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    config: PortalConfig,
    timeouts: HttpConfig,
    session: SessionStore,
}

impl PortalClient {
    pub fn new(
        http: reqwest::Client,
        config: PortalConfig,
        timeouts: HttpConfig,
        session: SessionStore,
    ) -> Self {
        Self {
            http,
            config,
            timeouts,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.list_timeout_seconds)
    }

    /// Start a login, yielding a pending OTP session.
    pub async fn login(&self, request: &LoginRequest) -> AppResult<LoginResponse> {
        let res = self
            .http
            .post(self.url("login"))
            .timeout(self.list_timeout())
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("Origin", &self.config.origin)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        read_json(res).await
    }

    /// Exchange an OTP code and pending session for access tokens.
    pub async fn verify_otp(&self, request: &OtpRequest) -> AppResult<SessionTokens> {
        let res = self
            .http
            .post(self.url("login/otp-verify"))
            .timeout(self.list_timeout())
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("Origin", &self.config.origin)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        read_json(res).await
    }

    /// Resolve a borrower from a QR lookup token.
    /// Requires the access token persisted after OTP validation.
    pub async fn validate_user_qr(&self, token: &str) -> AppResult<Borrower> {
        let access_token = self
            .session
            .access_token()
            .await?
            .ok_or_else(|| AppError::Session("Not logged in".to_string()))?;

        let res = self
            .http
            .get(self.url(&format!("qr-code/user/{}", token)))
            .timeout(self.list_timeout())
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("Origin", &self.config.origin)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await
            .map_err(send_error)?;

        read_json(res).await
    }
}
