use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Caller-visible error taxonomy. Every variant renders as
/// `{"error": <category>, "message": <text>}` with a stable category,
/// so clients can branch without parsing messages.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("identifier already registered")]
    DuplicateIdentifier,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("admin access required")]
    Forbidden,
    #[error("storage unavailable")]
    StorageUnavailable,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::DuplicateIdentifier => "duplicate_identifier",
            ApiError::InvalidCredentials => "invalid_credentials",
            ApiError::InvalidToken => "invalid_token",
            ApiError::NotFound(_) => "not_found",
            ApiError::Forbidden => "forbidden",
            ApiError::StorageUnavailable => "storage_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateIdentifier => StatusCode::CONFLICT,
            ApiError::InvalidCredentials | ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::StorageUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Full detail stays in the logs; callers get the category + message only.
        if let ApiError::Internal(ref e) = self {
            error!(error = ?e, "internal error");
        }
        let body = Json(json!({
            "error": self.category(),
            "message": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                error!(error = %e, "database unreachable");
                ApiError::StorageUnavailable
            }
            other => ApiError::Internal(other.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(
            ApiError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::DuplicateIdentifier.status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::InvalidCredentials.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ApiError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::NotFound("user").status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::StorageUnavailable.status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn categories_are_stable() {
        assert_eq!(ApiError::InvalidCredentials.category(), "invalid_credentials");
        assert_eq!(ApiError::Forbidden.category(), "forbidden");
        assert_eq!(ApiError::NotFound("user").category(), "not_found");
    }

    #[test]
    fn pool_errors_map_to_storage_unavailable() {
        let e: ApiError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(e, ApiError::StorageUnavailable));
    }
}
