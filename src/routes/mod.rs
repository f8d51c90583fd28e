use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};

use crate::{
    AppState,
    middleware::{log_requests, require_session},
};

pub mod session;

/// Name of the cookie that carries the session token.
pub const TOKEN_COOKIE: &str = "token";

pub fn router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/login", post(session::login))
        .route("/refresh", post(session::refresh))
        .route("/logout", post(session::logout));

    let protected_routes = Router::new()
        .route("/home", get(session::home))
        .route_layer(from_fn_with_state(state.clone(), require_session));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn(log_requests))
        .with_state(state)
}
