use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Startup failures. Any of these keeps the service from starting.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable required but not set: {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: '{value}'")]
    InvalidVar { name: &'static str, value: String },

    #[error("USERS is empty or only whitespace")]
    EmptyCredentials,

    #[error("invalid USERS entry at position {position}, expected format username:password")]
    InvalidCredentialEntry { position: usize },
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token uses an unexpected signing algorithm")]
    AlgorithmMismatch,

    #[error("token is expired")]
    Expired,

    #[error("token expiry is out of the representable range")]
    ExpiryOutOfRange,

    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// Request-scoped session failures, mapped to a status code by the HTTP layer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("token not eligible for refresh yet")]
    RefreshNotEligible,

    #[error("could not create token: {0}")]
    TokenCreationFailure(#[source] TokenError),
}

impl SessionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            SessionError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            SessionError::Unauthenticated => StatusCode::UNAUTHORIZED,
            SessionError::RefreshNotEligible => StatusCode::BAD_REQUEST,
            SessionError::TokenCreationFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            SessionError::InvalidCredentials => "Invalid credentials",
            SessionError::Unauthenticated => "Unauthorized",
            SessionError::RefreshNotEligible => "Token not eligible for refresh yet",
            SessionError::TokenCreationFailure(_) => "Could not create token",
        }
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        if let SessionError::TokenCreationFailure(ref cause) = self {
            tracing::error!("Token creation failed: {}", cause);
        }

        (self.status_code(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_4xx_and_signing_failures_are_5xx() {
        assert_eq!(
            SessionError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SessionError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            SessionError::RefreshNotEligible.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SessionError::TokenCreationFailure(TokenError::Encode("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn unauthenticated_response_hides_the_reason() {
        let response = SessionError::Unauthenticated.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Unauthorized");
    }
}
