//! Calculation logic for the payroll engine.
//!
//! Each statutory component has its own calculator returning a result with
//! an audit step: attendance pro-ration, overtime, provident fund, ESI,
//! income tax withholding and professional tax. The aggregator in
//! [`calculate_payroll`] runs them in a fixed order; the validator, summary
//! generator and batch runner work on the records it produces.

mod batch;
mod esi;
mod income_tax;
mod overtime;
mod payroll;
mod professional_tax;
mod proration;
mod provident_fund;
mod rounding;
mod summary;
mod validator;

pub use batch::{
    BatchFailure, BatchOutcome, BatchRecord, run_configured_batch, run_payroll_batch,
};
pub use esi::{EsiResult, calculate_esi};
pub use income_tax::{TdsResult, annual_tax_for, calculate_tds};
pub use overtime::{
    DEFAULT_HOURS_PER_DAY, DEFAULT_OVERTIME_MULTIPLIER, DEFAULT_WORKING_DAYS_PER_MONTH,
    OvertimeResult, calculate_overtime,
};
pub use payroll::{calculate_payroll, calculate_payroll_with_settings};
pub use professional_tax::{ProfessionalTaxResult, calculate_professional_tax};
pub use proration::{ProrationResult, prorate_attendance};
pub use provident_fund::{ProvidentFundResult, calculate_provident_fund};
pub use rounding::{percent_of, round_currency};
pub use summary::generate_salary_summary;
pub use validator::{finalize, validate_payroll};
