use axum::{
    extract::{Extension, Json, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;

use crate::{
    AppState, error::SessionError, routes::TOKEN_COOKIE, token::SessionClaims,
};

use super::model::{LoginRequest, session_cookie};

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("Invalid request payload: {}", rejection.body_text()),
            )
                .into_response();
        }
    };

    match state
        .sessions
        .issue(&req.username, &req.password)
        .and_then(session_cookie)
    {
        Ok(cookie) => (CookieJar::new().add(cookie), "Login successful").into_response(),
        Err(e) => e.into_response(),
    }
}

/// Protected resource; `require_session` has already verified the cookie.
#[axum::debug_handler]
pub async fn home(Extension(claims): Extension<SessionClaims>) -> String {
    format!("Welcome {}", claims.username)
}

#[axum::debug_handler]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, &'static str), SessionError> {
    let token = jar.get(TOKEN_COOKIE).map(|cookie| cookie.value().to_owned());
    let cookie = session_cookie(state.sessions.refresh(token.as_deref())?)?;

    Ok((jar.add(cookie), "Token refreshed successfully"))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, &'static str), SessionError> {
    let cookie = session_cookie(state.sessions.revoke())?;

    Ok((jar.add(cookie), "Logout successful"))
}
