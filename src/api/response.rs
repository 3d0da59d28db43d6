//! Response types for the payroll engine API.
//!
//! This module defines the success bodies and the error response structures
//! for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{PayrollRecord, ValidationResult};

/// Response body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// The finalized payroll record.
    pub record: PayrollRecord,
    /// Business-rule findings for the record.
    pub validation: ValidationResult,
}

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

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let (status, details) = match &error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The engine configuration could not be read",
            ),
            EngineError::InvalidRates { .. }
            | EngineError::InvalidTaxSlabs { .. }
            | EngineError::MissingTaxSlabs { .. }
            | EngineError::InvalidTaxBands { .. }
            | EngineError::InvalidOvertimeSettings { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "The loaded statutory configuration cannot be applied to this request",
            ),
            EngineError::RatesNotFound { .. } => (
                StatusCode::BAD_REQUEST,
                "No statutory rate snapshot covers the payroll period start date",
            ),
            EngineError::InvalidAttendance { .. } => (
                StatusCode::BAD_REQUEST,
                "The attendance summary contains invalid information",
            ),
            EngineError::InvalidSalaryStructure { .. } => (
                StatusCode::BAD_REQUEST,
                "The salary structure contains invalid information",
            ),
            EngineError::InvalidAdjustment { .. } => (
                StatusCode::BAD_REQUEST,
                "The adjustments contain invalid information",
            ),
            EngineError::EmployeeMismatch { .. } => (
                StatusCode::BAD_REQUEST,
                "Salary structure and attendance must be for the same employee",
            ),
        };

        ApiErrorResponse {
            status,
            error: ApiError::with_details(error.code(), error.to_string(), details),
        }
    }
}
