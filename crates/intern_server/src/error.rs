//! HTTP error mapping for service failures.
//!
//! # Invariants
//! - Every `ServiceError` variant maps to exactly one status code.
//! - Internal failure detail is only exposed outside production.

use crate::config::Environment;
use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use intern_core::{FieldViolation, ServiceError};
use log::error;
use serde::Serialize;

const VALIDATION_FAILED: &str = "Validation failed";
const INTERN_NOT_FOUND: &str = "Intern not found";
const INTERNAL_ERROR: &str = "Internal Server Error";
const SANITIZED_MESSAGE: &str = "Something went wrong";

/// Error response body. Always carries `success: false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                success: false,
                error: error.into(),
                message: None,
                details: None,
            },
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Maps a service failure, hiding internal detail in production.
    pub fn from_service(err: ServiceError, environment: Environment) -> Self {
        match err {
            ServiceError::Validation(violations) => {
                let mut api = Self::new(StatusCode::BAD_REQUEST, VALIDATION_FAILED);
                api.body.details = Some(violations);
                api
            }
            ServiceError::InvalidInput(message) => Self::new(StatusCode::BAD_REQUEST, message),
            ServiceError::Conflict(message) => Self::new(StatusCode::CONFLICT, message),
            ServiceError::NotFound(id) => {
                let mut api = Self::new(StatusCode::NOT_FOUND, INTERN_NOT_FOUND);
                api.body.message = Some(format!("No intern with id {id}"));
                api
            }
            ServiceError::Precondition(message) => Self::new(StatusCode::CONFLICT, message),
            ServiceError::Repo(err) => {
                error!("event=api_error module=http status=error error_code=repo_failure error={err}");
                let mut api = Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR);
                api.body.message = Some(match environment {
                    Environment::Production => SANITIZED_MESSAGE.to_string(),
                    Environment::Development => err.to_string(),
                });
                api
            }
        }
    }

    /// Maps a body extraction failure to a 400 with the parser's reason.
    pub fn from_json_rejection(rejection: JsonRejection) -> Self {
        let mut api = Self::bad_request("Invalid JSON body");
        api.body.message = Some(rejection.body_text());
        api
    }

    /// Same as `from_json_rejection`, for url-encoded form posts.
    pub fn from_form_rejection(rejection: FormRejection) -> Self {
        let mut api = Self::bad_request("Invalid form body");
        api.body.message = Some(rejection.body_text());
        api
    }

    /// User-facing summary used by HTML notices.
    pub fn summary(&self) -> String {
        match (&self.body.details, &self.body.message) {
            (Some(details), _) if !details.is_empty() => {
                let reasons: Vec<&str> = details.iter().map(|v| v.message.as_str()).collect();
                format!("{}: {}", self.body.error, reasons.join("; "))
            }
            (_, Some(message)) => format!("{}: {message}", self.body.error),
            _ => self.body.error.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ApiError;
    use crate::config::Environment;
    use axum::http::StatusCode;
    use intern_core::{FieldViolation, InternId, RepoError, ServiceError, StoreError};

    #[test]
    fn service_errors_map_to_status_codes() {
        let cases = [
            (ServiceError::Validation(vec![FieldViolation::new("gpa", "bad")]), StatusCode::BAD_REQUEST),
            (ServiceError::InvalidInput("Invalid intern ID format".into()), StatusCode::BAD_REQUEST),
            (ServiceError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ServiceError::NotFound(InternId::from_sequence(9)), StatusCode::NOT_FOUND),
            (ServiceError::Precondition("Cannot delete active intern".into()), StatusCode::CONFLICT),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from_service(err, Environment::Development).status, expected);
        }
    }

    #[test]
    fn repo_failures_are_sanitized_in_production() {
        let failure = || {
            ServiceError::Repo(RepoError::Store(StoreError::InvalidData(
                "duplicate intern id `INT-001`".into(),
            )))
        };

        let prod = ApiError::from_service(failure(), Environment::Production);
        assert_eq!(prod.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(prod.body.message.as_deref(), Some("Something went wrong"));

        let dev = ApiError::from_service(failure(), Environment::Development);
        assert!(dev.body.message.unwrap().contains("INT-001"));
    }

    #[test]
    fn summary_lists_violation_messages() {
        let err = ApiError::from_service(
            ServiceError::Validation(vec![
                FieldViolation::new("email", "email must be a valid email address"),
                FieldViolation::new("gpa", "gpa must be a number between 0.0 and 4.0"),
            ]),
            Environment::Development,
        );
        assert_eq!(
            err.summary(),
            "Validation failed: email must be a valid email address; gpa must be a number between 0.0 and 4.0"
        );
    }
}
