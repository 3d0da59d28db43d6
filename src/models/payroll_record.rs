//! Payroll record models.
//!
//! This module contains the [`PayrollRecord`] type and its associated
//! structures capturing every output of a payroll calculation: pro-rated
//! attendance, earning and deduction lines, employer contributions, the tax
//! computation, totals, and an audit trace.
//!
//! A record carries no wall-clock time or random identifier, so calculating
//! the same inputs twice produces byte-identical serialized output.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PayrollPeriod, TaxRegime};

/// Namespace for deterministic payroll record identifiers.
const RECORD_NAMESPACE: Uuid = Uuid::from_u128(0x6f2a_1c4e_93b7_4d08_a5e1_7c3b_29d4_f160);

/// Returns the identifier of the record for an employee and period.
///
/// The id is a pure function of its inputs, so persisting records with an
/// upsert on this id makes recalculation idempotent.
///
/// # Example
///
/// ```
/// use payroll_engine::models::record_id_for;
///
/// let first = record_id_for("emp_001", "2025-06");
/// assert_eq!(first, record_id_for("emp_001", "2025-06"));
/// assert_ne!(first, record_id_for("emp_001", "2025-07"));
/// ```
pub fn record_id_for(employee_id: &str, period_id: &str) -> Uuid {
    let key = format!("payroll/{}/{}", employee_id, period_id);
    Uuid::new_v5(&RECORD_NAMESPACE, key.as_bytes())
}

/// The engine-relevant lifecycle state of a record.
///
/// Approval and payment states belong to the HR workflow, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    /// Produced by the aggregator.
    Calculated,
    /// The validator reported at least one error.
    Invalid,
}

/// Pro-rated attendance figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceBreakdown {
    /// Working days in the period.
    pub working_days: Decimal,
    /// Days present.
    pub present_days: Decimal,
    /// Days absent without leave.
    #[serde(default)]
    pub absent_days: Decimal,
    /// Days on paid leave.
    pub paid_leave_days: Decimal,
    /// Days on unpaid leave.
    #[serde(default)]
    pub unpaid_leave_days: Decimal,
    /// Present days plus paid leave.
    pub paid_days: Decimal,
    /// Paid days over working days, clamped to `[0, 1]`.
    pub attendance_ratio: Decimal,
    /// Whether paid days exceeded working days and the ratio was clamped.
    pub ratio_clamped: bool,
    /// Fixed pay lost to unpaid days.
    pub loss_of_pay: Decimal,
}

/// Earning lines of a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Earnings {
    /// Pro-rated basic salary.
    pub basic_salary: Decimal,
    /// Pro-rated allowances.
    pub allowances: Decimal,
    /// Overtime pay.
    pub overtime_pay: Decimal,
    /// Manual extra earnings.
    pub extra_earnings: Decimal,
}

impl Earnings {
    /// Sum of every earning line.
    pub fn total(&self) -> Decimal {
        self.basic_salary + self.allowances + self.overtime_pay + self.extra_earnings
    }
}

/// Deduction lines of a payroll record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deductions {
    /// Employee provident fund, including any voluntary contribution.
    pub pf_employee: Decimal,
    /// Employee health-insurance contribution.
    pub esi_employee: Decimal,
    /// Monthly tax deducted at source.
    pub tds: Decimal,
    /// Professional tax.
    pub professional_tax: Decimal,
    /// Group-health insurance premium.
    pub health_insurance: Decimal,
    /// Term-insurance premium.
    pub term_insurance: Decimal,
    /// Salary advance recovered.
    pub advance_recovery: Decimal,
    /// Manual extra deductions.
    pub other: Decimal,
}

impl Deductions {
    /// Sum of every deduction line.
    pub fn total(&self) -> Decimal {
        self.pf_employee
            + self.esi_employee
            + self.tds
            + self.professional_tax
            + self.health_insurance
            + self.term_insurance
            + self.advance_recovery
            + self.other
    }
}

/// Employer provident fund outlay, split the way compliance filings need it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PfEmployerContribution {
    /// Retirement fund (EPF) share.
    pub epf: Decimal,
    /// Pension fund (EPS) share.
    pub eps: Decimal,
    /// Insurance fund (EDLI) share.
    pub edli: Decimal,
    /// Administration charge.
    pub admin_charge: Decimal,
    /// Sum of the four components.
    pub total: Decimal,
}

/// Contributions the employer pays on top of gross earnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerContributions {
    /// Provident fund breakdown.
    pub pf: PfEmployerContribution,
    /// Employer health-insurance contribution.
    pub esi: Decimal,
}

/// The income-tax computation behind the monthly TDS line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Regime used for the slab lookup.
    pub regime: TaxRegime,
    /// Monthly gross projected over twelve months.
    pub annual_gross: Decimal,
    /// Annual tax including surcharge and cess, rounded to whole units.
    pub annual_tax: Decimal,
    /// Monthly withholding.
    pub monthly_tds: Decimal,
    /// Annual tax as a percentage of annual gross, informational only.
    pub effective_rate: Decimal,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
}

/// The complete result of a payroll calculation for one employee and period.
///
/// Created once per (employee, period) by the aggregator and never mutated
/// except by recalculation or by finalization setting its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Deterministic identifier, see [`record_id_for`].
    pub record_id: Uuid,
    /// The employee the record is for.
    pub employee_id: String,
    /// The payroll period.
    pub period: PayrollPeriod,
    /// Version of the engine that produced the record.
    pub engine_version: String,
    /// Engine-relevant status.
    pub status: PayrollStatus,
    /// Pro-rated attendance figures.
    pub attendance: AttendanceBreakdown,
    /// Earning lines.
    pub earnings: Earnings,
    /// Deduction lines.
    pub deductions: Deductions,
    /// Employer-side contributions.
    pub employer_contributions: EmployerContributions,
    /// False when gross earnings exceeded the ESI wage limit.
    pub esi_applicable: bool,
    /// Income-tax computation.
    pub tax: TaxComputation,
    /// Sum of earning lines.
    pub gross_earnings: Decimal,
    /// Sum of deduction lines.
    pub total_deductions: Decimal,
    /// Gross earnings minus total deductions.
    pub net_pay: Decimal,
    /// Audit trace of every stage.
    pub audit_trace: AuditTrace,
}
