//! API error type and HTTP status mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use appgate_core::error::DomainError;

use crate::response::CommandResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or unverifiable administrator token.
    #[error("Authentication required.")]
    Unauthorized,

    /// Verified token without the Administrator role.
    #[error("Administrator role required.")]
    Forbidden,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::Domain(e) => match e {
                DomainError::ApplicationNotFound
                | DomainError::GroupNotFound
                | DomainError::RoleNotFound
                | DomainError::RoleNotFoundById(_) => (StatusCode::NOT_FOUND, e.to_string()),

                // Conflicts surface as 400 with a descriptive message.
                DomainError::ApplicationAlreadyApproved
                | DomainError::ApplicationAlreadyRejected
                | DomainError::ApplicationNotApprovedForGroup
                | DomainError::GroupHasApplications
                | DomainError::GroupHasRoles
                | DomainError::RoleAssignedToGroups
                | DomainError::DuplicateCredentials
                | DomainError::Validation(_) => (StatusCode::BAD_REQUEST, e.to_string()),

                DomainError::MissingCredentials | DomainError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, e.to_string())
                }

                DomainError::ApplicationNotApproved => (StatusCode::FORBIDDEN, e.to_string()),

                // Storage detail is already logged; never leak it.
                DomainError::Database(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error.".to_string(),
                ),
            },
        };

        (status, Json(CommandResponse::failure(message))).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (
                ApiError::Domain(DomainError::ApplicationNotFound),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Domain(DomainError::RoleNotFoundById(9)),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Domain(DomainError::ApplicationAlreadyApproved),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Domain(DomainError::GroupHasApplications),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Domain(DomainError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Domain(DomainError::ApplicationNotApproved),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::Domain(DomainError::Database("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
