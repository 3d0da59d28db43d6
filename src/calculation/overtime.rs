//! Overtime pay calculation.
//!
//! Overtime is paid off the hourly equivalent of the *pro-rated* basic salary.

use rust_decimal::Decimal;

use crate::config::OvertimeSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::round_currency;

/// Default multiplier applied to the hourly rate for overtime hours.
pub const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// Default working days per month used to derive the hourly rate.
pub const DEFAULT_WORKING_DAYS_PER_MONTH: Decimal = Decimal::from_parts(26, 0, 0, false, 0);

/// Default hours per working day.
pub const DEFAULT_HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The result of an overtime calculation.
#[derive(Debug, Clone)]
pub struct OvertimeResult {
    /// Hourly equivalent of the pro-rated basic (zero when no hours worked).
    pub hourly_rate: Decimal,
    /// Overtime pay, rounded half-up.
    pub overtime_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Converts overtime hours into pay.
///
/// `hourly_rate = prorated_basic / (working_days_per_month * hours_per_day)`
/// and `overtime_pay = round(hours * hourly_rate * multiplier)`. Zero hours
/// produce zero pay without evaluating the rate.
///
/// # Errors
///
/// Returns `InvalidAttendance` for negative hours, and
/// `InvalidOvertimeSettings` when hours are worked but the settings cannot
/// produce an hourly rate.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime;
/// use payroll_engine::config::OvertimeSettings;
/// use rust_decimal::Decimal;
///
/// // 20800 / (26 * 8) = 100 per hour; 4h * 100 * 1.5 = 600
/// let result = calculate_overtime(
///     Decimal::from(20800),
///     Decimal::from(4),
///     &OvertimeSettings::default(),
///     2,
/// )
/// .unwrap();
/// assert_eq!(result.overtime_pay, Decimal::from(600));
/// ```
pub fn calculate_overtime(
    prorated_basic: Decimal,
    overtime_hours: Decimal,
    settings: &OvertimeSettings,
    step_number: u32,
) -> EngineResult<OvertimeResult> {
    if overtime_hours < Decimal::ZERO {
        return Err(EngineError::InvalidAttendance {
            field: "overtime_hours".to_string(),
            message: format!("cannot be negative, got {}", overtime_hours),
        });
    }

    let input = serde_json::json!({
        "prorated_basic": prorated_basic.to_string(),
        "overtime_hours": overtime_hours.to_string(),
        "multiplier": settings.multiplier.to_string(),
        "working_days_per_month": settings.working_days_per_month.to_string(),
        "hours_per_day": settings.hours_per_day.to_string()
    });

    if overtime_hours.is_zero() {
        return Ok(OvertimeResult {
            hourly_rate: Decimal::ZERO,
            overtime_pay: Decimal::ZERO,
            audit_step: AuditStep {
                step_number,
                rule_id: "overtime".to_string(),
                rule_name: "Overtime".to_string(),
                input,
                output: serde_json::json!({
                    "overtime_pay": "0"
                }),
                reasoning: "No overtime hours worked".to_string(),
            },
        });
    }

    settings.validate()?;

    let monthly_hours = settings.working_days_per_month * settings.hours_per_day;
    let hourly_rate = prorated_basic / monthly_hours;
    let overtime_pay = round_currency(overtime_hours * hourly_rate * settings.multiplier);

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime".to_string(),
        rule_name: "Overtime".to_string(),
        input,
        output: serde_json::json!({
            "hourly_rate": hourly_rate.round_dp(4).normalize().to_string(),
            "overtime_pay": overtime_pay.to_string()
        }),
        reasoning: format!(
            "{}h x ({} / {}h) x {} = {}",
            overtime_hours,
            prorated_basic,
            monthly_hours,
            settings.multiplier.normalize(),
            overtime_pay
        ),
    };

    Ok(OvertimeResult {
        hourly_rate,
        overtime_pay,
        audit_step,
    })
}
