use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{AppState, error::SessionError, routes::TOKEN_COOKIE};

/// Rejects requests without a valid session cookie and hands the verified
/// `SessionClaims` to the handler through request extensions.
pub async fn require_session(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Result<Response, SessionError> {
    let token = jar.get(TOKEN_COOKIE).map(|cookie| cookie.value());
    let claims = state.sessions.authenticate(token)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
