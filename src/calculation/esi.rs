//! Employee state insurance (ESI) contributions.
//!
//! Unlike provident fund, ESI has no capped base: eligibility is all or
//! nothing on gross earnings. Above the wage limit neither side contributes.

use rust_decimal::Decimal;

use crate::config::StatutoryRateSnapshot;
use crate::models::AuditStep;

use super::{percent_of, round_currency};

/// The result of an ESI calculation.
#[derive(Debug, Clone)]
pub struct EsiResult {
    /// False when gross earnings exceeded the ESI wage limit.
    pub applicable: bool,
    /// Employee contribution.
    pub employee_contribution: Decimal,
    /// Employer contribution.
    pub employer_contribution: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates ESI contributions on gross earnings.
///
/// Gross earnings here are after pro-ration and overtime and before any
/// deduction. Gross exactly at the limit is still eligible.
pub fn calculate_esi(
    gross_earnings: Decimal,
    rates: &StatutoryRateSnapshot,
    step_number: u32,
) -> EsiResult {
    let input = serde_json::json!({
        "gross_earnings": gross_earnings.to_string(),
        "esi_wage_limit": rates.esi_wage_limit.to_string(),
        "employee_rate": rates.esi_employee_rate.to_string(),
        "employer_rate": rates.esi_employer_rate.to_string()
    });

    if gross_earnings > rates.esi_wage_limit {
        return EsiResult {
            applicable: false,
            employee_contribution: Decimal::ZERO,
            employer_contribution: Decimal::ZERO,
            audit_step: AuditStep {
                step_number,
                rule_id: "esi".to_string(),
                rule_name: "Employee State Insurance".to_string(),
                input,
                output: serde_json::json!({
                    "applicable": false,
                    "employee_contribution": "0",
                    "employer_contribution": "0"
                }),
                reasoning: format!(
                    "Gross {} exceeds ESI wage limit {}; not applicable",
                    gross_earnings, rates.esi_wage_limit
                ),
            },
        };
    }

    let employee_contribution = round_currency(percent_of(gross_earnings, rates.esi_employee_rate));
    let employer_contribution = round_currency(percent_of(gross_earnings, rates.esi_employer_rate));

    EsiResult {
        applicable: true,
        employee_contribution,
        employer_contribution,
        audit_step: AuditStep {
            step_number,
            rule_id: "esi".to_string(),
            rule_name: "Employee State Insurance".to_string(),
            input,
            output: serde_json::json!({
                "applicable": true,
                "employee_contribution": employee_contribution.to_string(),
                "employer_contribution": employer_contribution.to_string()
            }),
            reasoning: format!(
                "{} x {}% = {} employee, x {}% = {} employer",
                gross_earnings,
                rates.esi_employee_rate.normalize(),
                employee_contribution,
                rates.esi_employer_rate.normalize(),
                employer_contribution
            ),
        },
    }
}
