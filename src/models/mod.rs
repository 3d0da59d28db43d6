//! Core data models for the payroll engine.
//!
//! This module contains the inputs the caller supplies (salary structure,
//! attendance, adjustments) and the outputs the engine returns (payroll
//! record, validation result, pay-slip summary).

mod adjustments;
mod attendance;
mod pay_period;
mod payroll_record;
mod salary_structure;
mod summary;
mod validation;

pub use adjustments::{Adjustments, PayrollInput};
pub use attendance::{AttendanceSummary, MAX_ATTENDANCE_COUNT};
pub use pay_period::PayrollPeriod;
pub use payroll_record::{
    AttendanceBreakdown, AuditStep, AuditTrace, Deductions, EmployerContributions, Earnings,
    PayrollRecord, PayrollStatus, PfEmployerContribution, TaxComputation, record_id_for,
};
pub use salary_structure::{Allowances, MAX_MONTHLY_AMOUNT, SalaryStructure, TaxRegime};
pub use summary::{
    DeductionBreakdown, InsuranceDeductions, OtherDeductions, SalarySummary, StatutoryDeductions,
};
pub use validation::{ValidationIssue, ValidationResult};
