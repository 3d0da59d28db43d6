//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type identifying the month a
//! payroll record belongs to.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a payroll period with its identifier and date range.
///
/// The identifier is the caller's key for the period; together with the
/// employee id it forms the idempotent upsert key for a payroll record. The
/// start date selects the statutory rate snapshot in force. A period whose
/// end date precedes its start date is rejected when the attendance summary
/// carrying it is validated.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     id: "2025-06".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
/// };
///
/// assert!(period.start_date <= period.end_date);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The caller's identifier for this period (e.g., "2025-06").
    pub id: String,
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}
