//! Provident fund contributions.
//!
//! Every PF percentage applies to a wage base capped at the snapshot's PF wage
//! limit. The employer side is split into its retirement (EPF), pension (EPS),
//! deposit-linked insurance (EDLI) and administration components.

use rust_decimal::Decimal;

use crate::config::StatutoryRateSnapshot;
use crate::models::{AuditStep, PfEmployerContribution};

use super::{percent_of, round_currency};

/// The result of a provident fund calculation.
#[derive(Debug, Clone)]
pub struct ProvidentFundResult {
    /// `min(prorated_basic, pf_wage_limit)`.
    pub wage_base: Decimal,
    /// Statutory employee share plus the voluntary contribution.
    pub employee_contribution: Decimal,
    /// The voluntary part of the employee contribution.
    pub voluntary_contribution: Decimal,
    /// Employer outlay by component.
    pub employer: PfEmployerContribution,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates employee and employer provident fund contributions.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_provident_fund;
/// use payroll_engine::config::StatutoryRateSnapshot;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let rates = StatutoryRateSnapshot {
///     effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
///     pf_employee_rate: Decimal::from(12),
///     pf_employer_rate: Decimal::from(12),
///     pf_wage_limit: Decimal::from(15000),
///     epf_rate: Decimal::new(367, 2),
///     eps_rate: Decimal::new(833, 2),
///     edli_rate: Decimal::new(50, 2),
///     pf_admin_rate: Decimal::new(50, 2),
///     esi_employee_rate: Decimal::new(75, 2),
///     esi_employer_rate: Decimal::new(325, 2),
///     esi_wage_limit: Decimal::from(25000),
///     pt_monthly_cap: Decimal::from(300),
/// };
///
/// let result = calculate_provident_fund(Decimal::from(20000), &rates, Decimal::ZERO, 3);
/// assert_eq!(result.wage_base, Decimal::from(15000));
/// assert_eq!(result.employee_contribution, Decimal::from(1800));
/// ```
pub fn calculate_provident_fund(
    prorated_basic: Decimal,
    rates: &StatutoryRateSnapshot,
    voluntary_contribution: Decimal,
    step_number: u32,
) -> ProvidentFundResult {
    let wage_base = prorated_basic.min(rates.pf_wage_limit);
    let statutory = round_currency(percent_of(wage_base, rates.pf_employee_rate));
    let employee_contribution = statutory + voluntary_contribution;

    let epf = round_currency(percent_of(wage_base, rates.epf_rate));
    let eps = round_currency(percent_of(wage_base, rates.eps_rate));
    let edli = round_currency(percent_of(wage_base, rates.edli_rate));
    let admin_charge = round_currency(percent_of(wage_base, rates.pf_admin_rate));
    let employer = PfEmployerContribution {
        epf,
        eps,
        edli,
        admin_charge,
        total: epf + eps + edli + admin_charge,
    };

    let capped = wage_base < prorated_basic;
    let audit_step = AuditStep {
        step_number,
        rule_id: "provident_fund".to_string(),
        rule_name: "Provident Fund".to_string(),
        input: serde_json::json!({
            "prorated_basic": prorated_basic.to_string(),
            "pf_wage_limit": rates.pf_wage_limit.to_string(),
            "employee_rate": rates.pf_employee_rate.to_string(),
            "voluntary_contribution": voluntary_contribution.to_string()
        }),
        output: serde_json::json!({
            "wage_base": wage_base.to_string(),
            "wage_base_capped": capped,
            "employee_contribution": employee_contribution.to_string(),
            "employer_epf": employer.epf.to_string(),
            "employer_eps": employer.eps.to_string(),
            "employer_edli": employer.edli.to_string(),
            "employer_admin_charge": employer.admin_charge.to_string(),
            "employer_total": employer.total.to_string()
        }),
        reasoning: format!(
            "min({}, {}) = {} x {}% = {}{}",
            prorated_basic,
            rates.pf_wage_limit,
            wage_base,
            rates.pf_employee_rate.normalize(),
            statutory,
            if voluntary_contribution.is_zero() {
                String::new()
            } else {
                format!(" + {} voluntary", voluntary_contribution)
            }
        ),
    };

    ProvidentFundResult {
        wage_base,
        employee_contribution,
        voluntary_contribution,
        employer,
        audit_step,
    }
}
