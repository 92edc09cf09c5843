//! Signed session tokens and access key generation.
//!
//! A session token is `base64(claims) + "." + base64(hmac-sha256(claims))`
//! where the claims payload is `admin_id:expiry_timestamp`. Stateless: no
//! session record is kept server-side.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, TimeZone, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult, ErrorCode};

type HmacSha256 = Hmac<Sha256>;

/// Claims carried by a session token.
#[derive(Debug, Clone)]
pub struct SessionClaims {
    pub admin_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// Issues a signed session token for the given administrator.
pub fn issue_session_token(admin_id: Uuid, expires_at: DateTime<Utc>, secret: &str) -> String {
    let payload = format!("{}:{}", admin_id, expires_at.timestamp());
    let signature = sign(&payload, secret);
    format!("{}.{}", BASE64.encode(&payload), signature)
}

/// Computes the base64 HMAC-SHA256 signature of a payload.
fn sign(payload: &str, secret: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(payload.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Verifies a session token and returns its claims.
pub fn verify_session_token(
    token: &str,
    secret: &str,
    now: DateTime<Utc>,
) -> ApiResult<SessionClaims> {
    let (encoded_payload, provided_signature) = token
        .split_once('.')
        .ok_or_else(|| ApiError::new(ErrorCode::InvalidSessionToken))?;

    let payload = BASE64
        .decode(encoded_payload)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .ok_or_else(|| ApiError::new(ErrorCode::InvalidSessionToken))?;

    let signature = BASE64
        .decode(provided_signature)
        .map_err(|_| ApiError::new(ErrorCode::InvalidSessionToken))?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| ApiError::new(ErrorCode::InternalError))?;
    mac.update(payload.as_bytes());
    mac.verify_slice(&signature)
        .map_err(|_| ApiError::new(ErrorCode::InvalidSessionToken))?;

    let (admin_id, expiry) = payload
        .split_once(':')
        .ok_or_else(|| ApiError::new(ErrorCode::InvalidSessionToken))?;

    let admin_id = Uuid::parse_str(admin_id)
        .map_err(|_| ApiError::new(ErrorCode::InvalidSessionToken))?;

    let expires_at = expiry
        .parse::<i64>()
        .ok()
        .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
        .ok_or_else(|| ApiError::new(ErrorCode::InvalidSessionToken))?;

    if expires_at <= now {
        return Err(ApiError::new(ErrorCode::SessionExpired));
    }

    Ok(SessionClaims {
        admin_id,
        expires_at,
    })
}

/// Generates a fresh access key for a new administrator account.
pub fn generate_access_key() -> String {
    let mut bytes = Vec::with_capacity(32);
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    bytes.extend_from_slice(Uuid::new_v4().as_bytes());
    BASE64.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn round_trips_valid_tokens() {
        let admin_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);

        let token = issue_session_token(admin_id, expires_at, SECRET);
        let claims = verify_session_token(&token, SECRET, Utc::now()).unwrap();

        assert_eq!(claims.admin_id, admin_id);
        assert_eq!(claims.expires_at.timestamp(), expires_at.timestamp());
    }

    #[test]
    fn rejects_expired_tokens() {
        let token = issue_session_token(Uuid::new_v4(), Utc::now() - Duration::hours(1), SECRET);
        let err = verify_session_token(&token, SECRET, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionExpired);
    }

    #[test]
    fn rejects_tampered_tokens() {
        let admin_id = Uuid::new_v4();
        let expires_at = Utc::now() + Duration::hours(1);
        let token = issue_session_token(admin_id, expires_at, SECRET);

        // Re-sign the payload under a different secret.
        let forged = issue_session_token(admin_id, expires_at, "other-secret");
        assert_ne!(token, forged);
        let err = verify_session_token(&forged, SECRET, Utc::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidSessionToken);
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in ["", "garbage", "a.b.c", "bm90LXZhbGlk.c2ln"] {
            let err = verify_session_token(token, SECRET, Utc::now()).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidSessionToken);
        }
    }

    #[test]
    fn access_keys_are_unique() {
        assert_ne!(generate_access_key(), generate_access_key());
    }
}
