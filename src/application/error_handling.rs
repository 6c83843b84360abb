// src/application/error_handling.rs
//
// Error responses for the HTTP API
//
// - Maps AppError to application/problem+json documents
// - Never exposes storage internals to clients
// - Logs server-side failures with the correlation id

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rusqlite::ErrorCode;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::DomainError;
use crate::error::AppError;

pub type ApiResult<T> = Result<T, ApiProblem>;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug)]
pub struct ApiProblem {
    status: StatusCode,
    title: &'static str,
    kind: &'static str,
    detail: String,
    correlation_id: String,
}

impl ApiProblem {
    pub fn validation(detail: impl Into<String>, correlation_id: Option<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "/problems/validation",
            detail,
            correlation_id,
        )
    }

    pub fn from_app_error(error: AppError, correlation_id: Option<String>) -> Self {
        match error {
            AppError::Validation(detail) => Self::validation(detail, correlation_id),

            AppError::NotFound(_) => Self::new(
                StatusCode::NOT_FOUND,
                "Not found",
                "/problems/not-found",
                error.to_string(),
                correlation_id,
            ),

            AppError::Domain(DomainError::UnknownValue { .. }) => {
                Self::validation(error.to_string(), correlation_id)
            }

            AppError::Domain(domain_error) => Self::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "Domain rule violated",
                "/problems/domain",
                domain_error.to_string(),
                correlation_id,
            ),

            AppError::Database(ref db_error) if is_constraint_violation(db_error) => Self::new(
                StatusCode::CONFLICT,
                "Conflict",
                "/problems/conflict",
                "The change conflicts with existing data",
                correlation_id,
            ),

            AppError::Database(_) | AppError::Pool(_) => {
                let problem = Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error",
                    "/problems/storage",
                    "Database operation failed",
                    correlation_id,
                );
                tracing::error!(correlation_id = %problem.correlation_id, error = %error, "storage failure");
                problem
            }

            AppError::Other(_) => {
                let problem = Self::internal(correlation_id);
                tracing::error!(correlation_id = %problem.correlation_id, error = %error, "internal failure");
                problem
            }
        }
    }

    pub fn internal(correlation_id: Option<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            "/problems/internal",
            "Unexpected server error",
            correlation_id,
        )
    }

    fn new(
        status: StatusCode,
        title: &'static str,
        kind: &'static str,
        detail: impl Into<String>,
        correlation_id: Option<String>,
    ) -> Self {
        Self {
            status,
            title,
            kind,
            detail: detail.into(),
            correlation_id: correlation_id.unwrap_or_else(|| Uuid::new_v4().to_string()),
        }
    }
}

impl From<AppError> for ApiProblem {
    fn from(error: AppError) -> Self {
        Self::from_app_error(error, None)
    }
}

fn is_constraint_violation(error: &rusqlite::Error) -> bool {
    error.sqlite_error_code() == Some(ErrorCode::ConstraintViolation)
}

/// Correlation id set by the request-id middleware, if any
pub fn request_correlation_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(ToString::to_string)
}

#[derive(Debug, Serialize)]
struct ProblemDetails {
    #[serde(rename = "type")]
    kind: String,
    title: String,
    status: u16,
    detail: String,
    correlation_id: String,
}

impl IntoResponse for ApiProblem {
    fn into_response(self) -> Response {
        let payload = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
            correlation_id: self.correlation_id,
        };

        let mut response = (self.status, Json(payload)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (AppError::not_found("Coffee 9"), StatusCode::NOT_FOUND),
            (
                AppError::Domain(DomainError::InvariantViolation("price".into())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::Domain(DomainError::UnknownValue {
                    kind: "size",
                    value: "HUGE".into(),
                }),
                StatusCode::BAD_REQUEST,
            ),
            (AppError::Pool("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::Other("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiProblem::from(error).status, expected);
        }
    }

    #[test]
    fn test_correlation_id_is_reused() {
        let problem =
            ApiProblem::from_app_error(AppError::not_found("Order 1"), Some("req-1".into()));
        assert_eq!(problem.correlation_id, "req-1");
        assert_eq!(problem.detail, "Order 1 not found");
    }

    #[test]
    fn test_storage_details_are_hidden() {
        let problem = ApiProblem::from(AppError::Pool("secret connection string".into()));
        assert!(!problem.detail.contains("secret"));
    }

    #[test]
    fn test_constraint_violation_is_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (x INTEGER CHECK (x > 0));")
            .unwrap();
        let err = conn.execute("INSERT INTO t VALUES (0)", []).unwrap_err();

        assert_eq!(
            ApiProblem::from(AppError::Database(err)).status,
            StatusCode::CONFLICT
        );
    }
}
