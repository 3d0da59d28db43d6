//! Pay-slip summary models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Government-mandated deductions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryDeductions {
    /// Employee provident fund.
    pub pf: Decimal,
    /// Employee health-insurance contribution.
    pub esi: Decimal,
    /// Tax deducted at source.
    pub tds: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
}

/// Insurance premiums recovered from pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceDeductions {
    /// Group-health premium.
    pub health: Decimal,
    /// Term-insurance premium.
    pub term: Decimal,
}

/// Deductions that are neither statutory nor insurance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherDeductions {
    /// Salary advance recovered.
    pub advance: Decimal,
    /// Manual extra deductions.
    pub other: Decimal,
}

/// Deductions grouped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Statutory deductions.
    pub statutory: StatutoryDeductions,
    /// Insurance deductions.
    pub insurance: InsuranceDeductions,
    /// Everything else.
    pub other: OtherDeductions,
}

/// A display-ready pay-slip view of a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySummary {
    /// Gross earnings.
    pub gross_earnings: Decimal,
    /// Total deductions.
    pub total_deductions: Decimal,
    /// Net pay.
    pub net_pay: Decimal,
    /// Deductions grouped by kind.
    pub deduction_breakdown: DeductionBreakdown,
    /// Net pay as a whole percentage of gross.
    pub take_home_percentage: Decimal,
    /// Present days as a whole percentage of working days.
    pub attendance_ratio_percent: Decimal,
}
