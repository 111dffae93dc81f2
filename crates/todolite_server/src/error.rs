//! API error kinds and their HTTP representation.
//!
//! # Invariants
//! - `NotFound` always renders the fixed `{"detail": "Not Found"}` payload.
//! - Storage failures never leak details to the client; they are logged and
//!   rendered as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::error;
use serde_json::json;
use todolite_core::{RepoError, TodoValidationError};

/// Client-observable error kinds for the todo endpoints.
#[derive(Debug)]
pub enum ApiError {
    /// Requested id does not exist.
    NotFound,
    /// Request payload violated a field contract.
    Validation(TodoValidationError),
    /// Unrecovered storage or schema failure.
    Internal,
}

impl From<RepoError> for ApiError {
    fn from(err: RepoError) -> Self {
        match err {
            // Validation errors only originate from write payloads; the
            // repository reports persisted-state violations as InvalidData.
            RepoError::Validation(validation) => Self::Validation(validation),
            other => {
                error!("event=api_error module=server status=error error={other}");
                Self::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => {
                (StatusCode::NOT_FOUND, Json(json!({"detail": "Not Found"}))).into_response()
            }
            Self::Validation(err) => {
                let detail = json!({
                    "detail": [{
                        "field": validation_field(&err),
                        "message": err.to_string(),
                    }]
                });
                (StatusCode::UNPROCESSABLE_ENTITY, Json(detail)).into_response()
            }
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"detail": "Internal Server Error"})),
            )
                .into_response(),
        }
    }
}

fn validation_field(err: &TodoValidationError) -> &'static str {
    match err {
        TodoValidationError::EmptyTitle => "title",
        TodoValidationError::TimestampOrder { .. } => "updated_date",
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use axum::response::IntoResponse;
    use axum::http::StatusCode;
    use todolite_core::TodoValidationError;

    #[test]
    fn not_found_maps_to_404() {
        let response = ApiError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_maps_to_422() {
        let response = ApiError::Validation(TodoValidationError::EmptyTitle).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_maps_to_500() {
        let response = ApiError::Internal.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
