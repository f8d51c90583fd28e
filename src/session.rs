use chrono::{DateTime, Duration, Utc};

use crate::{
    credentials::CredentialStore,
    error::{SessionError, TokenError},
    token::{SessionClaims, TokenCodec},
};

/// Default session lifetime in minutes.
pub const DEFAULT_TTL_MINUTES: i64 = 5;

/// A token may only be refreshed once this close to its expiry.
pub const REFRESH_WINDOW_SECS: i64 = 30;

/// What the caller stores client-side: the token and when it lapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionGrant {
    /// The empty, already-expired grant that overwrites a client's session.
    pub fn revoked() -> Self {
        Self {
            token: String::new(),
            expires_at: DateTime::UNIX_EPOCH,
        }
    }
}

/// Stateless session lifecycle: nothing about a session is kept server-side,
/// every request re-verifies the token it carries.
pub struct SessionLifecycle {
    credentials: CredentialStore,
    codec: TokenCodec,
    ttl: Duration,
}

impl SessionLifecycle {
    pub fn new(credentials: CredentialStore, codec: TokenCodec, ttl: Duration) -> Self {
        Self {
            credentials,
            codec,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, username: &str, password: &str) -> Result<SessionGrant, SessionError> {
        self.issue_at(username, password, Utc::now())
    }

    pub fn issue_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionGrant, SessionError> {
        if !self.credentials.verify(username, password) {
            if self.credentials.lookup(username).is_none() {
                tracing::debug!("Login rejected: user does not exist");
            } else {
                tracing::debug!("Login rejected: wrong password for '{}'", username);
            }
            return Err(SessionError::InvalidCredentials);
        }

        let grant = self.grant_for(username, now)?;
        tracing::info!("Issued session for '{}'", username);
        Ok(grant)
    }

    pub fn authenticate(&self, token: Option<&str>) -> Result<SessionClaims, SessionError> {
        self.authenticate_at(token, Utc::now())
    }

    pub fn authenticate_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, SessionError> {
        let Some(token) = token else {
            tracing::debug!("Authentication failed: missing token");
            return Err(SessionError::Unauthenticated);
        };

        self.codec.verify_at(token, now).map_err(|e| {
            tracing::debug!("Authentication failed: {}", e);
            SessionError::Unauthenticated
        })
    }

    pub fn refresh(&self, token: Option<&str>) -> Result<SessionGrant, SessionError> {
        self.refresh_at(token, Utc::now())
    }

    /// Re-issues a token for the same user, but only inside the last
    /// `REFRESH_WINDOW_SECS` of its lifetime.
    pub fn refresh_at(
        &self,
        token: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<SessionGrant, SessionError> {
        let claims = self.authenticate_at(token, now)?;

        if claims.remaining(now) > Duration::seconds(REFRESH_WINDOW_SECS) {
            return Err(SessionError::RefreshNotEligible);
        }

        let grant = self.grant_for(&claims.username, now)?;
        tracing::info!("Refreshed session for '{}'", claims.username);
        Ok(grant)
    }

    pub fn revoke(&self) -> SessionGrant {
        SessionGrant::revoked()
    }

    fn grant_for(&self, username: &str, now: DateTime<Utc>) -> Result<SessionGrant, SessionError> {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or(SessionError::TokenCreationFailure(TokenError::ExpiryOutOfRange))?;
        let claims = SessionClaims::new(username, expires_at);
        let token = self
            .codec
            .sign(&claims)
            .map_err(SessionError::TokenCreationFailure)?;

        Ok(SessionGrant {
            token,
            expires_at: claims.expires_at(),
        })
    }
}
