use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nutricart_core::errors::{ExError, ExErrorKind};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{context}: {source}")]
    Engine {
        context: &'static str,
        source: ExError,
    },

    #[error("No token provided")]
    MissingToken,

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine { source, .. } => match source.kind() {
                kind if kind.is_validation() => StatusCode::BAD_REQUEST,
                kind if kind.is_data_access() => StatusCode::INTERNAL_SERVER_ERROR,
                ExErrorKind::Unauthorised => StatusCode::UNAUTHORIZED,
                ExErrorKind::NotFound => StatusCode::NOT_FOUND,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::MissingToken => StatusCode::UNAUTHORIZED,
            ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Client errors carry the message only; server errors add details.
        let body = match &self {
            ApiError::Engine { context, source } if status.is_server_error() => {
                tracing::error!(
                    err_code = source.code(),
                    op = source.op().unwrap_or("unknown"),
                    cause = source.source_error().map(|c| c.code()).unwrap_or(""),
                    context,
                    "{}",
                    source
                );
                json!({ "error": context, "details": source.message() })
            }
            ApiError::Engine { source, .. } => json!({ "error": source.message() }),
            ApiError::Internal(details) => {
                tracing::error!(details = %details, "Internal error");
                json!({ "error": "Internal server error", "details": details })
            }
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nutricart_core::errors::NutriCartError;

    fn engine(source: ExError) -> ApiError {
        ApiError::Engine {
            context: "Database error",
            source,
        }
    }

    #[test]
    fn test_validation_kinds_are_bad_request() {
        let err = engine(NutriCartError::EmptyCart.into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = engine(NutriCartError::EmailTaken { email: "a@b".into() }.into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_identity_failures_are_unauthorized() {
        let err = engine(NutriCartError::InvalidCredentials.into());
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::MissingToken.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_store_failures_are_server_errors() {
        for kind in [
            ExErrorKind::Persistence,
            ExErrorKind::Concurrency,
            ExErrorKind::ConstraintViolation,
        ] {
            assert_eq!(
                engine(ExError::new(kind)).status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }
    }
}
