//! Professional tax (PT) from a banded schedule.

use rust_decimal::Decimal;

use crate::config::{ProfessionalTaxBand, ProfessionalTaxSchedule};
use crate::error::EngineResult;
use crate::models::AuditStep;

/// The result of a professional tax lookup.
#[derive(Debug, Clone)]
pub struct ProfessionalTaxResult {
    /// Monthly professional tax after the cap.
    pub amount: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Looks up the monthly PT for a gross amount.
///
/// The first band whose `up_to` is at or above gross applies; its amount is
/// then capped at `monthly_cap`.
///
/// # Errors
///
/// Returns `InvalidTaxBands` if the schedule is malformed.
pub fn calculate_professional_tax(
    gross_earnings: Decimal,
    schedule: &ProfessionalTaxSchedule,
    monthly_cap: Decimal,
    step_number: u32,
) -> EngineResult<ProfessionalTaxResult> {
    schedule.validate()?;

    let band = schedule
        .bands
        .iter()
        .find(|b| b.up_to.is_none_or(|up_to| gross_earnings <= up_to));
    let band_amount = band.map_or(Decimal::ZERO, |b| b.amount);
    let amount = band_amount.min(monthly_cap);

    let audit_step = AuditStep {
        step_number,
        rule_id: "professional_tax".to_string(),
        rule_name: "Professional Tax".to_string(),
        input: serde_json::json!({
            "gross_earnings": gross_earnings.to_string(),
            "monthly_cap": monthly_cap.to_string()
        }),
        output: serde_json::json!({
            "band_amount": band_amount.to_string(),
            "amount": amount.to_string()
        }),
        reasoning: format!(
            "Gross {} falls in band {}; min({}, cap {}) = {}",
            gross_earnings,
            describe_band(band),
            band_amount,
            monthly_cap,
            amount
        ),
    };

    Ok(ProfessionalTaxResult { amount, audit_step })
}

fn describe_band(band: Option<&ProfessionalTaxBand>) -> String {
    match band.map(|b| b.up_to) {
        Some(Some(up_to)) => format!("up to {}", up_to),
        Some(None) => "open".to_string(),
        None => "none".to_string(),
    }
}
