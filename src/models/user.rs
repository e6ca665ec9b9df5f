//! Authentication and borrower models

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body (step 1 of authentication)
#[derive(Debug, Clone, Serialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub device_token: String,
}

/// Login response carrying the pending OTP session
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub session_id: String,
    pub message: Option<String>,
}

/// OTP verification request body (step 2 of authentication)
#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest {
    pub code: u32,
    pub otp_session: String,
}

/// Tokens issued after successful OTP verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub device_token: String,
}

/// Borrower identity resolved from a portal QR code
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Borrower {
    pub id: i64,
    pub name: String,
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub borrower_type: String,
}
