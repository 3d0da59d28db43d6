//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    calculate_payroll_with_settings, finalize, generate_salary_summary, run_configured_batch,
    validate_payroll,
};
use crate::config::ConfigLoader;
use crate::error::EngineError;
use crate::models::{PayrollInput, PayrollRecord, ValidationResult};

use super::request::{BatchRequest, CalculationRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/validate", post(validate_handler))
        .route("/payroll/summary", post(summary_handler))
        .route("/payroll/batch", post(batch_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

/// Turns a body rejection into a 400 response with a stable code.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Handler for POST /payroll/calculate.
///
/// Calculates and finalizes one employee's payroll against the rates in
/// force on the period start date.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let input: PayrollInput = request.into();

    let start_time = Instant::now();
    match perform_calculation(&input, state.config()) {
        Ok((record, validation)) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %record.employee_id,
                period_id = %record.period.id,
                net_pay = %record.net_pay,
                is_valid = validation.is_valid,
                duration_us = start_time.elapsed().as_micros(),
                "Calculation completed successfully"
            );
            json_response(StatusCode::OK, CalculationResponse { record, validation })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %input.salary.employee_id,
                error = %err,
                "Calculation failed"
            );
            error_response(err.into())
        }
    }
}

/// Performs the payroll calculation for one input.
fn perform_calculation(
    input: &PayrollInput,
    config: &ConfigLoader,
) -> Result<(PayrollRecord, ValidationResult), EngineError> {
    let rates = config.statutory_rates_for(input.attendance.period.start_date)?;
    let record = calculate_payroll_with_settings(
        &input.salary,
        &input.attendance,
        rates,
        config.tax_slabs(),
        input.advance_deduction,
        &input.adjustments,
        config.settings(),
    )?;
    Ok(finalize(record))
}

/// Handler for POST /payroll/validate.
async fn validate_handler(payload: Result<Json<PayrollRecord>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let validation = validate_payroll(&record);
    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        errors = validation.errors.len(),
        warnings = validation.warnings.len(),
        "Record validated"
    );
    json_response(StatusCode::OK, validation)
}

/// Handler for POST /payroll/summary.
async fn summary_handler(payload: Result<Json<PayrollRecord>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();
    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    info!(
        correlation_id = %correlation_id,
        employee_id = %record.employee_id,
        "Generating salary summary"
    );
    json_response(StatusCode::OK, generate_salary_summary(&record))
}

/// Handler for POST /payroll/batch.
///
/// The batch runs on the blocking pool.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let inputs: Vec<PayrollInput> = request.entries.into_iter().map(Into::into).collect();
    info!(
        correlation_id = %correlation_id,
        entries = inputs.len(),
        "Processing batch request"
    );

    let start_time = Instant::now();
    let outcome =
        tokio::task::spawn_blocking(move || run_configured_batch(&inputs, state.config())).await;

    match outcome {
        Ok(outcome) => {
            info!(
                correlation_id = %correlation_id,
                records = outcome.records.len(),
                failures = outcome.failures.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Batch completed"
            );
            json_response(StatusCode::OK, outcome)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Batch task failed"
            );
            json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("BATCH_FAILED", "Batch calculation did not complete"),
            )
        }
    }
}
