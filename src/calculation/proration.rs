//! Attendance pro-ration.
//!
//! Fixed monthly pay is earned in proportion to the days the employee is paid
//! for: present days plus paid leave, over the period's working days.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

use super::round_currency;

/// The result of pro-rating fixed pay, including the audit step.
#[derive(Debug, Clone)]
pub struct ProrationResult {
    /// Present days plus paid leave.
    pub paid_days: Decimal,
    /// Paid days over working days, clamped to `[0, 1]`.
    pub ratio: Decimal,
    /// Whether the raw ratio exceeded one and was clamped.
    pub ratio_clamped: bool,
    /// Pro-rated basic salary.
    pub basic: Decimal,
    /// Pro-rated allowances.
    pub allowances: Decimal,
    /// Fixed pay lost to unpaid days.
    pub loss_of_pay: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Scales basic salary and allowances by the attendance ratio.
///
/// `ratio = (present_days + paid_leave_days) / working_days`, clamped to
/// `[0, 1]`. Basic and allowances are each rounded half-up after scaling.
/// Paid days above working days are tolerated here by clamping; the
/// validator reports them on the finished record.
///
/// # Errors
///
/// Returns `InvalidAttendance` if `working_days` is not positive or any day
/// count is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::prorate_attendance;
/// use rust_decimal::Decimal;
///
/// let result = prorate_attendance(
///     Decimal::from(26000),
///     Decimal::from(13000),
///     Decimal::from(26),
///     Decimal::from(20),
///     Decimal::from(0),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.basic, Decimal::from(20000));
/// assert_eq!(result.allowances, Decimal::from(10000));
/// assert_eq!(result.loss_of_pay, Decimal::from(9000));
/// ```
pub fn prorate_attendance(
    basic_salary: Decimal,
    allowances: Decimal,
    working_days: Decimal,
    present_days: Decimal,
    paid_leave_days: Decimal,
    step_number: u32,
) -> EngineResult<ProrationResult> {
    if working_days <= Decimal::ZERO {
        return Err(EngineError::InvalidAttendance {
            field: "working_days".to_string(),
            message: format!("must be greater than zero, got {}", working_days),
        });
    }
    for (field, value) in [
        ("present_days", present_days),
        ("paid_leaves", paid_leave_days),
    ] {
        if value < Decimal::ZERO {
            return Err(EngineError::InvalidAttendance {
                field: field.to_string(),
                message: format!("cannot be negative, got {}", value),
            });
        }
    }

    let paid_days = present_days + paid_leave_days;
    let raw_ratio = paid_days / working_days;
    let ratio = raw_ratio.clamp(Decimal::ZERO, Decimal::ONE);
    let ratio_clamped = ratio != raw_ratio;

    let basic = round_currency(basic_salary * ratio);
    let scaled_allowances = round_currency(allowances * ratio);
    let loss_of_pay = (basic_salary + allowances) - (basic + scaled_allowances);

    let audit_step = AuditStep {
        step_number,
        rule_id: "attendance_proration".to_string(),
        rule_name: "Attendance Pro-ration".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "allowances": allowances.to_string(),
            "working_days": working_days.to_string(),
            "present_days": present_days.to_string(),
            "paid_leave_days": paid_leave_days.to_string()
        }),
        output: serde_json::json!({
            "paid_days": paid_days.to_string(),
            "ratio": ratio.normalize().to_string(),
            "ratio_clamped": ratio_clamped,
            "basic": basic.to_string(),
            "allowances": scaled_allowances.to_string(),
            "loss_of_pay": loss_of_pay.to_string()
        }),
        reasoning: if ratio_clamped {
            format!(
                "{} paid days exceed {} working days; ratio clamped to 1",
                paid_days, working_days
            )
        } else {
            format!(
                "{} paid days / {} working days = {}; basic {} and allowances {} scaled",
                paid_days,
                working_days,
                ratio.round_dp(4).normalize(),
                basic,
                scaled_allowances
            )
        },
    };

    Ok(ProrationResult {
        paid_days,
        ratio,
        ratio_clamped,
        basic,
        allowances: scaled_allowances,
        loss_of_pay,
        audit_step,
    })
}
