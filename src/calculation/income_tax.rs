//! Monthly income tax withholding (TDS).
//!
//! Monthly gross is annualized, run through the progressive slabs of the
//! employee's declared regime, and the rounded annual tax is spread evenly
//! over twelve months.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::{TaxSlab, TaxSlabTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, TaxRegime};

use super::{percent_of, round_currency};

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// The result of a TDS calculation.
#[derive(Debug, Clone)]
pub struct TdsResult {
    /// Monthly gross times twelve.
    pub annual_gross: Decimal,
    /// Annual tax including surcharge and cess, rounded half-up.
    pub annual_tax: Decimal,
    /// `round(annual_tax / 12)`.
    pub monthly_tds: Decimal,
    /// Annual tax as a percentage of annual gross, two decimals.
    pub effective_rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Computes unrounded annual tax over slabs sorted ascending by `slab_from`.
///
/// The portion of income inside `[slab_from, slab_to)` is taxed at the slab
/// rate, then surcharge is added on that tax and cess on the surcharged tax.
pub fn annual_tax_for(annual_gross: Decimal, slabs: &[&TaxSlab]) -> Decimal {
    let mut total = Decimal::ZERO;
    for slab in slabs {
        if annual_gross <= slab.slab_from {
            break;
        }
        let upper = slab
            .slab_to
            .map_or(annual_gross, |to| to.min(annual_gross));
        let taxable = upper - slab.slab_from;
        let tax = percent_of(taxable, slab.rate);
        let with_surcharge = tax + percent_of(tax, slab.surcharge);
        total += with_surcharge + percent_of(with_surcharge, slab.cess);
    }
    total
}

/// Calculates the monthly TDS for a regime.
///
/// A regime without active slabs withholds nothing, unless `mandatory` is
/// set, in which case it is a configuration error.
///
/// # Errors
///
/// Returns `InvalidTaxSlabs` when the regime's slabs are malformed and
/// `MissingTaxSlabs` when slabs are mandatory but absent.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_tds;
/// use payroll_engine::config::{TaxSlab, TaxSlabTable};
/// use payroll_engine::models::TaxRegime;
/// use rust_decimal::Decimal;
///
/// let slab = |from: i64, to: Option<i64>, rate: i64| TaxSlab {
///     regime: TaxRegime::Old,
///     slab_from: Decimal::from(from),
///     slab_to: to.map(Decimal::from),
///     rate: Decimal::from(rate),
///     surcharge: Decimal::ZERO,
///     cess: Decimal::from(4),
///     is_active: true,
/// };
/// let table = TaxSlabTable::new(vec![
///     slab(0, Some(250_000), 0),
///     slab(250_000, Some(500_000), 5),
///     slab(500_000, None, 20),
/// ]);
///
/// let result = calculate_tds(Decimal::from(30850), TaxRegime::Old, &table, false, 5).unwrap();
/// assert_eq!(result.annual_tax, Decimal::from(6250));
/// assert_eq!(result.monthly_tds, Decimal::from(521));
/// ```
pub fn calculate_tds(
    monthly_gross: Decimal,
    regime: TaxRegime,
    slabs: &TaxSlabTable,
    mandatory: bool,
    step_number: u32,
) -> EngineResult<TdsResult> {
    slabs.validate_regime(regime)?;
    let active = slabs.active_for(regime);
    if active.is_empty() && mandatory {
        return Err(EngineError::MissingTaxSlabs {
            regime: regime.to_string(),
        });
    }

    let annual_gross = monthly_gross * MONTHS_PER_YEAR;
    let annual_tax = round_currency(annual_tax_for(annual_gross, &active));
    let monthly_tds = round_currency(annual_tax / MONTHS_PER_YEAR);
    let effective_rate = if annual_gross.is_zero() {
        Decimal::ZERO
    } else {
        (annual_tax / annual_gross * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    };

    let reasoning = if active.is_empty() {
        format!("No active {} regime slabs; nothing withheld", regime)
    } else {
        format!(
            "{} x 12 = {} annual; {} regime tax {} / 12 = {} per month ({}% effective)",
            monthly_gross,
            annual_gross,
            regime,
            annual_tax,
            monthly_tds,
            effective_rate.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tds".to_string(),
        rule_name: "Income Tax Withholding".to_string(),
        input: serde_json::json!({
            "monthly_gross": monthly_gross.to_string(),
            "regime": regime.as_str(),
            "slab_count": active.len()
        }),
        output: serde_json::json!({
            "annual_gross": annual_gross.to_string(),
            "annual_tax": annual_tax.to_string(),
            "monthly_tds": monthly_tds.to_string(),
            "effective_rate": effective_rate.to_string()
        }),
        reasoning,
    };

    Ok(TdsResult {
        annual_gross,
        annual_tax,
        monthly_tds,
        effective_rate,
        audit_step,
    })
}
