//! Response types for the payroll engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::Payslip;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing/invalid actor header error response.
    pub fn missing_actor() -> Self {
        Self::with_details(
            "MISSING_ACTOR",
            "x-actor-id header is required",
            "Every request must carry the acting employee's id in the x-actor-id header",
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a bad-request response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::Validation { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("VALIDATION_ERROR", message),
            },
            EngineError::Conflict { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("CONFLICT", message),
            },
            EngineError::InvalidTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("STATE_ERROR", message),
            },
            EngineError::Unauthorized { .. } => ApiErrorResponse {
                status: StatusCode::FORBIDDEN,
                error: ApiError::new("ACCESS_DENIED", message),
            },
            EngineError::NotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("NOT_FOUND", message),
            },
            EngineError::Store { .. } => ApiErrorResponse {
                status: StatusCode::SERVICE_UNAVAILABLE,
                error: ApiError::new("STORE_UNAVAILABLE", message),
            },
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParse { .. } => {
                ApiErrorResponse {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    error: ApiError::new("CONFIG_ERROR", message),
                }
            }
        }
    }
}

/// A payslip projection with the employee reference resolved for display.
///
/// The payslip fields are the stored record verbatim; only the name is
/// looked up, falling back to "Unknown" for references that no longer
/// resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipView {
    /// The stored payslip, exactly as generated.
    #[serde(flatten)]
    pub payslip: Payslip,
    /// Display name of the employee, or "Unknown".
    pub employee_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Skipped when None
    }

    #[test]
    fn test_validation_maps_to_400() {
        let response: ApiErrorResponse =
            EngineError::validation("name", "must not be empty").into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_conflict_maps_to_409() {
        let response: ApiErrorResponse = EngineError::conflict("duplicate").into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "CONFLICT");
    }

    #[test]
    fn test_state_error_maps_to_409() {
        let response: ApiErrorResponse = EngineError::InvalidTransition {
            entity: "payslip".to_string(),
            id: "x".to_string(),
            message: "already Paid".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "STATE_ERROR");
    }

    #[test]
    fn test_unauthorized_maps_to_403() {
        let response: ApiErrorResponse = EngineError::Unauthorized {
            actor: "x".to_string(),
            operation: "generate payslips".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::FORBIDDEN);
        assert_eq!(response.error.code, "ACCESS_DENIED");
    }

    #[test]
    fn test_store_error_maps_to_503() {
        let response: ApiErrorResponse = EngineError::Store {
            message: "down".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.error.code, "STORE_UNAVAILABLE");
    }
}
