//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpRequest, HttpResponse, ResponseError, error, http::StatusCode};
use postboard_core::error::DomainError;
use postboard_core::ports::AuthError;
use postboard_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Validation errors: {}", .0.join(", "))]
    Validation(Vec<String>),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(detail) => ErrorResponse::unauthorized().with_detail(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
            AppError::Validation(errors) => ErrorResponse::unprocessable(errors.join(", ")),
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conflicts and refused permissions both answer 400.
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound(msg) => AppError::NotFound(msg),
            DomainError::AlreadyExists(msg) | DomainError::Forbidden(msg) => {
                AppError::BadRequest(msg)
            }
            DomainError::Validation(violations) => {
                AppError::Validation(violations.iter().map(ToString::to_string).collect())
            }
            DomainError::Unauthenticated => {
                AppError::Unauthorized("Authentication required".to_string())
            }
            err @ (DomainError::NotImplemented(_) | DomainError::Storage(_)) => {
                AppError::Internal(err.to_string())
            }
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let detail = match err {
            AuthError::TokenExpired => {
                "Your authentication token has expired. Please login again.".to_string()
            }
            AuthError::MissingAuth => {
                "Please provide a valid Bearer token in the Authorization header.".to_string()
            }
            AuthError::InvalidToken(msg) => msg,
        };
        AppError::Unauthorized(detail)
    }
}

/// Malformed JSON bodies are reported like any other rejected payload.
pub fn json_error_handler(err: error::JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");
    AppError::Validation(vec![format!("body: {err}")]).into()
}

pub fn path_error_handler(err: error::PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::Validation(vec![format!("path: {err}")]).into()
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use postboard_core::RepoError;
    use postboard_core::error::FieldViolation;

    fn status(err: DomainError) -> StatusCode {
        AppError::from(err).status_code()
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        assert_eq!(status(DomainError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(DomainError::AlreadyExists("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(DomainError::Forbidden("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(DomainError::Validation(vec![])), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status(DomainError::Unauthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status(DomainError::NotImplemented("has_permission")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status(DomainError::Storage(RepoError::Query("boom".into()))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_detail_lists_fields() {
        let err = AppError::from(DomainError::Validation(vec![
            FieldViolation {
                field: "content".into(),
                message: "Field cannot be an empty string or whitespace.".into(),
            },
            FieldViolation {
                field: "title".into(),
                message: "Title must be at most 100 characters.".into(),
            },
        ]));

        assert_eq!(
            err.to_string(),
            "Validation errors: content: Field cannot be an empty string or whitespace., \
             title: Title must be at most 100 characters."
        );
    }

    #[test]
    fn every_auth_error_is_unauthorized() {
        for err in [
            AuthError::TokenExpired,
            AuthError::MissingAuth,
            AuthError::InvalidToken("bad".into()),
        ] {
            assert_eq!(AppError::from(err).status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
