//! Borrower QR payload parsing
//!
//! Borrower QR codes carry a portal URL of the form
//! `https://portal.example/qr/user/<token>`. Only codes issued by the
//! configured portal origin are accepted; the trailing path segment is the
//! borrower lookup token.

use reqwest::Url;

use crate::error::{AppError, AppResult};

/// Extract the borrower lookup token from a scanned QR payload.
///
/// Rejects payloads that are not URLs or whose origin differs from
/// `allowed_origin`, without inspecting the rest of the payload.
pub fn extract_borrower_token(payload: &str, allowed_origin: &str) -> AppResult<String> {
    let allowed = Url::parse(allowed_origin)
        .map_err(|e| AppError::Internal(format!("Invalid qr_origin configuration: {}", e)))?;

    let url = match Url::parse(payload.trim()) {
        Ok(url) => url,
        Err(_) => return Err(AppError::InvalidQrOrigin(truncate(payload))),
    };

    if url.origin() != allowed.origin() {
        return Err(AppError::InvalidQrOrigin(url.origin().ascii_serialization()));
    }

    let token = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or_default();

    if token.is_empty() {
        return Err(AppError::Validation(
            "QR code does not carry a user token".to_string(),
        ));
    }

    Ok(token.to_string())
}

fn truncate(payload: &str) -> String {
    const MAX: usize = 64;
    let trimmed = payload.trim();
    if trimmed.len() <= MAX {
        trimmed.to_string()
    } else {
        let cut = trimmed
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}…", &trimmed[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://portal.mlgcl.edu.ph";

    #[test]
    fn extracts_trailing_segment_from_portal_url() {
        let token =
            extract_borrower_token("https://portal.mlgcl.edu.ph/qr/user/abc123", ORIGIN).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn trailing_slash_does_not_hide_the_token() {
        let token =
            extract_borrower_token("https://portal.mlgcl.edu.ph/qr/user/abc123/", ORIGIN).unwrap();
        assert_eq!(token, "abc123");
    }

    #[test]
    fn foreign_origin_is_rejected() {
        let err = extract_borrower_token("https://evil.example/qr/user/abc123", ORIGIN)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidQrOrigin(_)));
    }

    #[test]
    fn scheme_must_match_too() {
        let err = extract_borrower_token("http://portal.mlgcl.edu.ph/qr/user/abc123", ORIGIN)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidQrOrigin(_)));
    }

    #[test]
    fn non_url_payload_is_rejected() {
        let err = extract_borrower_token("not a url at all", ORIGIN).unwrap_err();
        assert!(matches!(err, AppError::InvalidQrOrigin(_)));
    }

    #[test]
    fn url_without_token_is_rejected() {
        let err = extract_borrower_token("https://portal.mlgcl.edu.ph/", ORIGIN).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
