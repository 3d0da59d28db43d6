//! Pay-slip summary of a payroll record.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{
    DeductionBreakdown, InsuranceDeductions, OtherDeductions, PayrollRecord, SalarySummary,
    StatutoryDeductions,
};

use super::round_currency;

/// Builds the display-ready summary of a record.
///
/// Percentages are whole numbers, rounded half-up (toward positive infinity
/// for negative take-home), and zero when their denominator is zero.
pub fn generate_salary_summary(record: &PayrollRecord) -> SalarySummary {
    let deductions = &record.deductions;

    SalarySummary {
        gross_earnings: record.gross_earnings,
        total_deductions: record.total_deductions,
        net_pay: record.net_pay,
        deduction_breakdown: DeductionBreakdown {
            statutory: StatutoryDeductions {
                pf: deductions.pf_employee,
                esi: deductions.esi_employee,
                tds: deductions.tds,
                professional_tax: deductions.professional_tax,
            },
            insurance: InsuranceDeductions {
                health: deductions.health_insurance,
                term: deductions.term_insurance,
            },
            other: OtherDeductions {
                advance: deductions.advance_recovery,
                other: deductions.other,
            },
        },
        take_home_percentage: whole_percent(record.net_pay, record.gross_earnings),
        attendance_ratio_percent: whole_percent(
            record.attendance.present_days,
            record.attendance.working_days,
        ),
    }
}

/// Rounds half-up toward positive infinity, so -12.5 becomes -12.
fn whole_percent(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    let percent = numerator / denominator * Decimal::ONE_HUNDRED;
    if percent.is_sign_negative() {
        percent.round_dp_with_strategy(0, RoundingStrategy::MidpointTowardZero)
    } else {
        round_currency(percent)
    }
}
