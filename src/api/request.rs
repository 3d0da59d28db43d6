//! Request types for the payroll engine API.
//!
//! This module defines the JSON request structures for the `/payroll/calculate`
//! and `/payroll/batch` endpoints. The validate and summary endpoints take a
//! [`PayrollRecord`](crate::models::PayrollRecord) body directly.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Adjustments, AttendanceSummary, PayrollInput, SalaryStructure};

/// Request body for the `/payroll/calculate` endpoint.
///
/// Statutory rates are not part of the request: the server selects the
/// snapshot in force on the attendance period's start date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee's salary structure.
    pub salary: SalaryStructure,
    /// The employee's attendance for the period.
    pub attendance: AttendanceSummary,
    /// Salary advance to recover this period.
    #[serde(default)]
    pub advance_deduction: Decimal,
    /// One-off earnings and deductions.
    #[serde(default)]
    pub adjustments: Adjustments,
}

impl From<CalculationRequest> for PayrollInput {
    fn from(req: CalculationRequest) -> Self {
        PayrollInput {
            salary: req.salary,
            attendance: req.attendance,
            advance_deduction: req.advance_deduction,
            adjustments: req.adjustments,
        }
    }
}

/// Request body for the `/payroll/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// One entry per employee and period.
    pub entries: Vec<CalculationRequest>,
}
