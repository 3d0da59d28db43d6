//! Manual adjustments and the per-employee calculation input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::{AttendanceSummary, MAX_MONTHLY_AMOUNT, SalaryStructure};

/// Ad hoc earnings and deductions for one period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adjustments {
    /// One-off extra earnings (arrears, bonus).
    pub extra_earnings: Decimal,
    /// One-off extra deductions (fines, canteen).
    pub extra_deductions: Decimal,
}

impl Adjustments {
    /// Checks that both amounts are non-negative and at most
    /// [`MAX_MONTHLY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        for (field, amount) in [
            ("extra_earnings", self.extra_earnings),
            ("extra_deductions", self.extra_deductions),
        ] {
            if amount < Decimal::ZERO {
                return Err(EngineError::InvalidAdjustment {
                    field: field.to_string(),
                    message: format!("cannot be negative, got {}", amount),
                });
            }
            if amount > MAX_MONTHLY_AMOUNT {
                return Err(EngineError::InvalidAdjustment {
                    field: field.to_string(),
                    message: format!("{} exceeds the maximum of {}", amount, MAX_MONTHLY_AMOUNT),
                });
            }
        }
        Ok(())
    }
}

/// Everything the engine needs for one employee in one period.
///
/// This is the unit of work of a batch run and the body of a calculation
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInput {
    /// The employee's salary structure.
    pub salary: SalaryStructure,
    /// The employee's attendance for the period.
    pub attendance: AttendanceSummary,
    /// Salary advance recovered this period.
    #[serde(default)]
    pub advance_deduction: Decimal,
    /// Manual adjustments for the period.
    #[serde(default)]
    pub adjustments: Adjustments,
}
