//! Attendance summary model.
//!
//! The attendance subsystem aggregates daily records into one summary per
//! employee per period; the engine only reads it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::PayrollPeriod;

/// Largest day or hour count an attendance summary may carry.
pub const MAX_ATTENDANCE_COUNT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// One employee's attendance for a payroll period.
///
/// Day counts are decimals so half days can be expressed. The engine
/// tolerates `present_days > working_days` by clamping the attendance ratio;
/// the validator reports it as an error on the resulting record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee this summary belongs to.
    pub employee_id: String,
    /// The payroll period summarised.
    pub period: PayrollPeriod,
    /// Working days in the period.
    pub working_days: Decimal,
    /// Days the employee was present.
    pub present_days: Decimal,
    /// Days absent without leave.
    #[serde(default)]
    pub absent_days: Decimal,
    /// Days on paid leave.
    #[serde(default)]
    pub paid_leaves: Decimal,
    /// Days on unpaid leave.
    #[serde(default)]
    pub unpaid_leaves: Decimal,
    /// Overtime hours worked in the period.
    #[serde(default)]
    pub overtime_hours: Decimal,
}

impl AttendanceSummary {
    /// Checks the contract the calculators rely on: a period that does not
    /// end before it starts, a non-zero number of working days, and counts
    /// between zero and [`MAX_ATTENDANCE_COUNT`].
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{AttendanceSummary, PayrollPeriod};
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut attendance = AttendanceSummary {
    ///     employee_id: "emp_001".to_string(),
    ///     period: PayrollPeriod {
    ///         id: "2025-06".to_string(),
    ///         start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
    ///         end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
    ///     },
    ///     working_days: Decimal::from(26),
    ///     present_days: Decimal::from(24),
    ///     absent_days: Decimal::ZERO,
    ///     paid_leaves: Decimal::from(2),
    ///     unpaid_leaves: Decimal::ZERO,
    ///     overtime_hours: Decimal::ZERO,
    /// };
    /// assert!(attendance.validate().is_ok());
    ///
    /// attendance.working_days = Decimal::ZERO;
    /// assert!(attendance.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.period.end_date < self.period.start_date {
            return Err(EngineError::InvalidAttendance {
                field: "period".to_string(),
                message: format!(
                    "ends on {} before it starts on {}",
                    self.period.end_date, self.period.start_date
                ),
            });
        }

        if self.working_days <= Decimal::ZERO {
            return Err(EngineError::InvalidAttendance {
                field: "working_days".to_string(),
                message: format!("must be greater than zero, got {}", self.working_days),
            });
        }

        let counts = [
            ("working_days", self.working_days),
            ("present_days", self.present_days),
            ("absent_days", self.absent_days),
            ("paid_leaves", self.paid_leaves),
            ("unpaid_leaves", self.unpaid_leaves),
            ("overtime_hours", self.overtime_hours),
        ];
        for (field, value) in counts {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidAttendance {
                    field: field.to_string(),
                    message: format!("cannot be negative, got {}", value),
                });
            }
            if value > MAX_ATTENDANCE_COUNT {
                return Err(EngineError::InvalidAttendance {
                    field: field.to_string(),
                    message: format!("{} exceeds the maximum of {}", value, MAX_ATTENDANCE_COUNT),
                });
            }
        }

        Ok(())
    }
}
