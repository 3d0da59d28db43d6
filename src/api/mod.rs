//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for calculating, validating
//! and summarizing payroll records.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchRequest, CalculationRequest};
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
