//! Authentication flow (login, OTP verification, logout)

use uuid::Uuid;
use validator::Validate;

use crate::{
    api::PortalClient,
    error::{AppError, AppResult},
    models::user::{LoginRequest, LoginResponse, OtpRequest, SessionTokens},
    services::session::SessionStore,
};

#[derive(Clone)]
pub struct AuthService {
    portal: PortalClient,
    session: SessionStore,
}

impl AuthService {
    pub fn new(portal: PortalClient, session: SessionStore) -> Self {
        Self { portal, session }
    }

    /// True when a device token is persisted from an earlier session,
    /// allowing the login screen to be skipped.
    pub async fn has_device_session(&self) -> AppResult<bool> {
        Ok(self.session.device_token().await?.is_some())
    }

    /// Step 1: exchange credentials for a pending OTP session.
    ///
    /// Sends the persisted device token, generating a fresh one on first
    /// use so the portal can recognize this device later.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let device_token = match self.session.device_token().await? {
            Some(token) => token,
            None => Uuid::new_v4().to_string(),
        };

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            device_token,
        };
        request
            .validate()
            .map_err(|e| AppError::Validation(flatten_validation(&e)))?;

        let response = self.portal.login(&request).await?;
        self.session.set_otp_session(&response.session_id).await?;
        tracing::info!("Login accepted, OTP required");
        Ok(response)
    }

    /// Step 2: exchange the OTP code for access tokens and persist them.
    pub async fn verify_otp(&self, code: u32) -> AppResult<SessionTokens> {
        let otp_session = self
            .session
            .otp_session()
            .await?
            .ok_or_else(|| AppError::Session("No login in progress".to_string()))?;

        let request = OtpRequest { code, otp_session };
        let tokens = self.portal.verify_otp(&request).await?;
        self.session
            .set_tokens(&tokens.access_token, &tokens.device_token)
            .await?;
        tracing::info!("OTP verified, session established");
        Ok(tokens)
    }

    /// Forget the persisted session.
    pub async fn logout(&self) -> AppResult<()> {
        self.session.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }
}

fn flatten_validation(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect::<Vec<_>>()
        .join(", ")
}
