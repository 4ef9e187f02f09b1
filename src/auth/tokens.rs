//! Dual-domain JWT issuing and verification.
//!
//! Access tokens and refresh tokens are HS256-signed JWTs living in two
//! independent signing domains, each keyed by its own secret. An access
//! token carries the session id it was minted for; cryptographic validity
//! alone never grants access — the session row is re-checked on every
//! protected request.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Access token lifetime.
const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;
/// Refresh token lifetime.
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Claims embedded in every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// The user's database id.
    pub sub: i64,
    /// The session this token was minted for.
    pub sid: i64,
    /// Issued-at (UTC Unix timestamp).
    pub iat: i64,
    /// Expiration (UTC Unix timestamp).
    pub exp: i64,
}

/// Claims embedded in every refresh token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Token verification failures.
///
/// All three deny access; the distinction only affects user-facing
/// messaging.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("malformed token")]
    Malformed,
}

fn map_verify_error(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    }
}

/// Issues and verifies access/refresh tokens.
///
/// Stateless: holds only the two signing secrets. Session liveness is the
/// session store's concern.
pub struct TokenService {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenService {
    pub fn new(access_secret: &str, refresh_secret: &str) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_secret.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_secret.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_secret.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_secret.as_bytes()),
        }
    }

    /// Issues a short-lived access token bound to a session.
    pub fn issue_access(
        &self,
        user_id: i64,
        session_id: i64,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id,
            sid: session_id,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.access_encoding)
    }

    /// Issues a long-lived refresh token, returning the token together
    /// with its expiry instant (which the session row is bound to).
    pub fn issue_refresh(
        &self,
        user_id: i64,
    ) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let expires_at = now + Duration::days(REFRESH_TOKEN_TTL_DAYS);
        let claims = RefreshClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.refresh_encoding)?;
        // Truncate to whole seconds so the stored expiry matches `exp`.
        let expires_at = Utc
            .timestamp_opt(expires_at.timestamp(), 0)
            .single()
            .unwrap_or(expires_at);
        Ok((token, expires_at))
    }

    /// Verifies an access token's signature and expiry.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        decode::<AccessClaims>(token, &self.access_decoding, &validation())
            .map(|data| data.claims)
            .map_err(map_verify_error)
    }

    /// Verifies a refresh token's signature and expiry.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, TokenError> {
        decode::<RefreshClaims>(token, &self.refresh_decoding, &validation())
            .map(|data| data.claims)
            .map_err(map_verify_error)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new("access-secret-for-tests", "refresh-secret-for-tests")
    }

    #[test]
    fn test_access_token_round_trip() {
        let svc = test_service();
        let token = svc.issue_access(42, 7).expect("issue should succeed");

        let claims = svc.verify_access(&token).expect("verify should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.sid, 7);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_round_trip() {
        let svc = test_service();
        let (token, expires_at) = svc.issue_refresh(42).expect("issue should succeed");

        let claims = svc.verify_refresh(&token).expect("verify should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(expires_at > Utc::now());
    }

    #[test]
    fn test_domains_are_independent() {
        let svc = test_service();

        // An access token must never verify as a refresh token or vice versa.
        let access = svc.issue_access(1, 1).unwrap();
        assert!(svc.verify_refresh(&access).is_err());

        let (refresh, _) = svc.issue_refresh(1).unwrap();
        assert!(svc.verify_access(&refresh).is_err());
    }

    #[test]
    fn test_expired_token_is_rejected_as_expired() {
        let svc = test_service();

        let now = Utc::now();
        let claims = AccessClaims {
            sub: 1,
            sid: 1,
            iat: (now - Duration::minutes(30)).timestamp(),
            exp: (now - Duration::minutes(15)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("access-secret-for-tests".as_bytes()),
        )
        .unwrap();

        assert_eq!(svc.verify_access(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_wrong_secret_is_rejected_as_invalid_signature() {
        let svc = test_service();
        let other = TokenService::new("different-access-secret", "refresh-secret-for-tests");

        let token = other.issue_access(1, 1).unwrap();
        assert_eq!(
            svc.verify_access(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_garbage_is_rejected_as_malformed() {
        let svc = test_service();
        assert_eq!(
            svc.verify_access("not-even-a-jwt"),
            Err(TokenError::Malformed)
        );
        assert_eq!(svc.verify_refresh(""), Err(TokenError::Malformed));
    }
}
