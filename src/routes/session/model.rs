use axum_extra::extract::cookie::Cookie;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    error::{SessionError, TokenError},
    routes::TOKEN_COOKIE,
    session::SessionGrant,
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Script-inaccessible, HTTPS-only cookie carrying the grant's token.
///
/// Fails when the expiry cannot be written as a cookie date.
pub fn session_cookie(grant: SessionGrant) -> Result<Cookie<'static>, SessionError> {
    let expires = OffsetDateTime::from_unix_timestamp(grant.expires_at.timestamp())
        .map_err(|_| SessionError::TokenCreationFailure(TokenError::ExpiryOutOfRange))?;

    Ok(Cookie::build((TOKEN_COOKIE, grant.token))
        .path("/")
        .http_only(true)
        .secure(true)
        .expires(expires)
        .build())
}
