//! Salary structure model and related types.
//!
//! This module defines the fixed compensation an employee is entitled to for
//! a full month, together with the tax regime they declared.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest amount any monthly input field may carry (one trillion).
///
/// Keeps annualized and summed amounts well inside `Decimal`'s range.
pub const MAX_MONTHLY_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// The income-tax regime an employee has opted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// The older regime with deductions and exemptions.
    Old,
    /// The simplified regime with lower rates and fewer deductions.
    New,
}

impl TaxRegime {
    /// Returns the configuration key for this regime.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::Old => "old",
            TaxRegime::New => "new",
        }
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed monthly allowances paid on top of basic salary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Allowances {
    /// House rent allowance.
    pub housing: Decimal,
    /// Dearness allowance.
    pub dearness: Decimal,
    /// Conveyance allowance.
    pub conveyance: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Special allowance.
    pub special: Decimal,
    /// Performance incentive.
    pub performance_incentive: Decimal,
    /// Any other fixed allowance.
    pub other: Decimal,
}

impl Allowances {
    fn named(&self) -> [(&'static str, Decimal); 7] {
        [
            ("housing", self.housing),
            ("dearness", self.dearness),
            ("conveyance", self.conveyance),
            ("medical", self.medical),
            ("special", self.special),
            ("performance_incentive", self.performance_incentive),
            ("other", self.other),
        ]
    }

    /// Returns the sum of all allowances.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Allowances;
    /// use rust_decimal::Decimal;
    ///
    /// let allowances = Allowances {
    ///     housing: Decimal::from(8000),
    ///     conveyance: Decimal::from(1600),
    ///     ..Allowances::default()
    /// };
    /// assert_eq!(allowances.total(), Decimal::from(9600));
    /// ```
    pub fn total(&self) -> Decimal {
        self.named().iter().map(|(_, amount)| *amount).sum()
    }
}

/// An employee's fixed monthly compensation.
///
/// Owned by HR administration and immutable during a payroll run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStructure {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Fixed monthly allowances.
    #[serde(default)]
    pub allowances: Allowances,
    /// Voluntary provident fund contribution above the statutory amount.
    #[serde(default)]
    pub voluntary_pf: Decimal,
    /// Monthly group-health insurance premium recovered from pay.
    #[serde(default)]
    pub health_insurance_premium: Decimal,
    /// Monthly term-insurance premium recovered from pay.
    #[serde(default)]
    pub term_insurance_premium: Decimal,
    /// The declared income-tax regime.
    pub tax_regime: TaxRegime,
}

impl SalaryStructure {
    /// Checks that every amount is non-negative and at most
    /// [`MAX_MONTHLY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        let fields = [
            ("basic_salary", self.basic_salary),
            ("voluntary_pf", self.voluntary_pf),
            ("health_insurance_premium", self.health_insurance_premium),
            ("term_insurance_premium", self.term_insurance_premium),
        ];
        for (field, amount) in fields.into_iter().chain(self.allowances.named()) {
            if amount < Decimal::ZERO {
                return Err(EngineError::InvalidSalaryStructure {
                    field: field.to_string(),
                    message: format!("cannot be negative, got {}", amount),
                });
            }
            if amount > MAX_MONTHLY_AMOUNT {
                return Err(EngineError::InvalidSalaryStructure {
                    field: field.to_string(),
                    message: format!("{} exceeds the maximum of {}", amount, MAX_MONTHLY_AMOUNT),
                });
            }
        }
        Ok(())
    }
}
