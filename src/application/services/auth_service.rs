//! Registration, login, token refresh, and session revocation.

use std::sync::Arc;

use crate::auth::{TokenError, TokenService};
use crate::auth::password::{hash_password, verify_password};
use crate::domain::entities::{NewSession, NewUser, User};
use crate::domain::repositories::{SessionRepository, UserRepository};
use crate::error::AppError;
use tracing::{error, warn};

/// One generic message for both unknown email and wrong password, so the
/// login endpoint cannot be used to enumerate accounts.
const WRONG_CREDENTIALS: &str = "wrong email or password";

/// The identity attached to an authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
    pub session_id: i64,
}

/// Access/refresh token pair handed out at login.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Orchestrates users, sessions, and the token service.
///
/// A token's cryptographic validity is necessary but not sufficient:
/// [`AuthService::authorize`] re-checks the referenced session against the
/// store on every protected request, and that check is deliberately never
/// cached so revocation latency is bounded by write propagation rather
/// than a TTL.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionRepository>,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionRepository>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            sessions,
            tokens,
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(
        &self,
        full_name: String,
        email: String,
        password: String,
    ) -> Result<User, AppError> {
        if self.users.email_exists(&email).await? {
            return Err(AppError::conflict("email already registered"));
        }

        let hashed = hash_password(&password).map_err(|e| {
            error!(error = %e, "password hashing failed");
            AppError::internal("Failed to hash password")
        })?;

        self.users
            .create(NewUser {
                full_name,
                email,
                password: hashed,
            })
            .await
    }

    /// Authenticates a user and opens a new session.
    ///
    /// The refresh token is minted first and the session row is bound to
    /// its expiry; the access token is minted last, bound to the new
    /// session id. If access-token signing fails after the session row
    /// exists, the session is revoked again so no usable credential ever
    /// corresponds to an orphaned session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with one fixed message for both
    /// unknown email and wrong password.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip_address: String,
        user_agent: String,
    ) -> Result<TokenPair, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::unauthorized(WRONG_CREDENTIALS))?;

        let password_ok = verify_password(password, &user.password).unwrap_or(false);
        if !password_ok {
            return Err(AppError::unauthorized(WRONG_CREDENTIALS));
        }

        let (refresh_token, expires_at) = self.tokens.issue_refresh(user.id).map_err(|e| {
            error!(error = %e, "refresh token signing failed");
            AppError::internal("Failed to generate refresh token")
        })?;

        let session_id = self
            .sessions
            .create(NewSession {
                user_id: user.id,
                refresh_token: refresh_token.clone(),
                expired_at: expires_at,
                ip_address,
                user_agent,
            })
            .await?;

        let access_token = match self.tokens.issue_access(user.id, session_id) {
            Ok(token) => token,
            Err(e) => {
                error!(error = %e, "access token signing failed");
                if let Err(e) = self.sessions.invalidate_by_id(session_id).await {
                    warn!(session_id, error = %e, "failed to revoke orphaned session");
                }
                return Err(AppError::internal("Failed to generate access token"));
            }
        };

        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// Mints a new access token from a refresh token.
    ///
    /// The token is verified cryptographically, then the referenced
    /// session is independently re-validated against the store. Both
    /// failure modes collapse to the same outward error so callers cannot
    /// distinguish a revoked session from a bad token. The refresh token
    /// itself is not rotated.
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, AppError> {
        self.tokens
            .verify_refresh(refresh_token)
            .map_err(|_| AppError::unauthorized("invalid or expired refresh token"))?;

        let session = self
            .sessions
            .find_by_refresh_token(refresh_token)
            .await?
            .ok_or_else(|| AppError::unauthorized("invalid or expired refresh token"))?;

        self.tokens
            .issue_access(session.user_id, session.id)
            .map_err(|e| {
                error!(error = %e, "access token signing failed");
                AppError::internal("Failed to generate access token")
            })
    }

    /// Revokes the session holding this refresh token.
    ///
    /// Idempotent: logging out an already-revoked or unknown token is a
    /// no-op success.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        self.sessions.invalidate(refresh_token).await
    }

    /// Admits or rejects a bearer access token.
    ///
    /// Signature and expiry are checked first; on success the session the
    /// token references is re-checked against the store, so a
    /// structurally valid token whose session was revoked is rejected.
    pub async fn authorize(&self, access_token: &str) -> Result<AuthUser, AppError> {
        let claims = self.tokens.verify_access(access_token).map_err(|e| {
            let message = match e {
                TokenError::Expired => "Token expired. Please refresh your token",
                TokenError::InvalidSignature => "Invalid token signature",
                TokenError::Malformed => "Invalid or expired token",
            };
            AppError::unauthorized(message)
        })?;

        let active = self.sessions.check_active(claims.sid).await?;
        if !active {
            return Err(AppError::unauthorized(
                "Session has been terminated. Please login again",
            ));
        }

        Ok(AuthUser {
            user_id: claims.sub,
            session_id: claims.sid,
        })
    }
}
