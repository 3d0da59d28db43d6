//! Business-rule checks over a calculated payroll record.
//!
//! Findings are returned as data rather than errors: a record that fails
//! validation is still a complete calculation, it just must not be paid out.

use rust_decimal::Decimal;

use crate::models::{PayrollRecord, PayrollStatus, ValidationIssue, ValidationResult};

/// Tolerance for the gross = deductions + net identity.
const CONSERVATION_TOLERANCE: Decimal = Decimal::ONE;

/// Statutory PF employee rate used as a sanity ceiling (12%).
const DEFAULT_PF_RATE: Decimal = Decimal::from_parts(12, 0, 0, false, 2);

/// Validates a payroll record.
///
/// Errors:
/// - `GROSS_MISMATCH` when gross, deductions and net pay disagree by more
///   than one unit
/// - `NON_POSITIVE_GROSS` when gross earnings are zero or negative
/// - `PRESENT_EXCEEDS_WORKING` when present days exceed working days
///
/// Warnings:
/// - `NEGATIVE_NET_PAY` when deductions exceed gross
/// - `PF_ABOVE_DEFAULT_RATE` when employee PF is above 12% of basic
/// - `DAY_COUNTS_EXCEED_WORKING` when present, absent and leave days add up
///   to more than the working days
/// - `PAID_DAYS_CLAMPED` when the attendance ratio had to be clamped
pub fn validate_payroll(record: &PayrollRecord) -> ValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // An unrepresentable difference is a mismatch too.
    let within_tolerance = record
        .gross_earnings
        .checked_sub(record.total_deductions)
        .and_then(|expected| expected.checked_sub(record.net_pay))
        .is_some_and(|discrepancy| discrepancy.abs() <= CONSERVATION_TOLERANCE);
    if !within_tolerance {
        errors.push(ValidationIssue::new(
            "GROSS_MISMATCH",
            "net_pay",
            format!(
                "gross {} minus deductions {} does not equal net pay {}",
                record.gross_earnings, record.total_deductions, record.net_pay
            ),
        ));
    }

    if record.gross_earnings <= Decimal::ZERO {
        errors.push(ValidationIssue::new(
            "NON_POSITIVE_GROSS",
            "gross_earnings",
            format!("gross earnings {} must be positive", record.gross_earnings),
        ));
    }

    if record.attendance.present_days > record.attendance.working_days {
        errors.push(ValidationIssue::new(
            "PRESENT_EXCEEDS_WORKING",
            "attendance.present_days",
            format!(
                "present days {} exceed working days {}",
                record.attendance.present_days, record.attendance.working_days
            ),
        ));
    }

    if record.net_pay < Decimal::ZERO {
        warnings.push(ValidationIssue::new(
            "NEGATIVE_NET_PAY",
            "net_pay",
            format!("net pay {} is negative", record.net_pay),
        ));
    }

    let pf_ceiling = record.earnings.basic_salary * DEFAULT_PF_RATE;
    if record.deductions.pf_employee > pf_ceiling {
        warnings.push(ValidationIssue::new(
            "PF_ABOVE_DEFAULT_RATE",
            "deductions.pf_employee",
            format!(
                "employee PF {} is above 12% of basic ({})",
                record.deductions.pf_employee,
                pf_ceiling.normalize()
            ),
        ));
    }

    let attendance = &record.attendance;
    let accounted_days = [
        attendance.present_days,
        attendance.absent_days,
        attendance.paid_leave_days,
        attendance.unpaid_leave_days,
    ]
    .into_iter()
    .try_fold(Decimal::ZERO, |total, days| total.checked_add(days));
    if accounted_days.is_none_or(|days| days > attendance.working_days) {
        warnings.push(ValidationIssue::new(
            "DAY_COUNTS_EXCEED_WORKING",
            "attendance",
            format!(
                "present, absent and leave days add up to more than {} working days",
                attendance.working_days
            ),
        ));
    }

    if record.attendance.ratio_clamped {
        warnings.push(ValidationIssue::new(
            "PAID_DAYS_CLAMPED",
            "attendance.paid_days",
            format!(
                "paid days {} exceed working days {}; attendance ratio clamped to 1",
                record.attendance.paid_days, record.attendance.working_days
            ),
        ));
    }

    ValidationResult::from_issues(errors, warnings)
}

/// Validates a record and sets its status from the result.
///
/// The record comes back `invalid` if any error was reported, otherwise
/// `calculated`.
pub fn finalize(mut record: PayrollRecord) -> (PayrollRecord, ValidationResult) {
    let validation = validate_payroll(&record);
    record.status = if validation.is_valid {
        PayrollStatus::Calculated
    } else {
        PayrollStatus::Invalid
    };
    (record, validation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate_payroll;
    use crate::config::{StatutoryRateSnapshot, TaxSlabTable};
    use crate::models::{
        Adjustments, Allowances, AttendanceSummary, PayrollPeriod, SalaryStructure, TaxRegime,
    };
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_record(basic: &str, present: &str, paid_leaves: &str) -> PayrollRecord {
        let rates = StatutoryRateSnapshot {
            effective_date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            pf_employee_rate: dec("12"),
            pf_employer_rate: dec("12"),
            pf_wage_limit: dec("15000"),
            epf_rate: dec("3.67"),
            eps_rate: dec("8.33"),
            edli_rate: dec("0.5"),
            pf_admin_rate: dec("0.5"),
            esi_employee_rate: dec("0.75"),
            esi_employer_rate: dec("3.25"),
            esi_wage_limit: dec("25000"),
            pt_monthly_cap: dec("300"),
        };
        let salary = SalaryStructure {
            employee_id: "EMP001".to_string(),
            basic_salary: dec(basic),
            allowances: Allowances {
                housing: dec("5000"),
                ..Allowances::default()
            },
            voluntary_pf: Decimal::ZERO,
            health_insurance_premium: Decimal::ZERO,
            term_insurance_premium: Decimal::ZERO,
            tax_regime: TaxRegime::New,
        };
        let attendance = AttendanceSummary {
            employee_id: "EMP001".to_string(),
            period: PayrollPeriod {
                id: "2025-06".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            },
            working_days: dec("26"),
            present_days: dec(present),
            absent_days: Decimal::ZERO,
            paid_leaves: dec(paid_leaves),
            unpaid_leaves: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
        };
        calculate_payroll(
            &salary,
            &attendance,
            &rates,
            &TaxSlabTable::default(),
            Decimal::ZERO,
            &Adjustments::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_clean_record_is_valid() {
        let result = validate_payroll(&create_test_record("20000", "24", "2"));

        assert!(result.is_valid);
        assert!(result.errors.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_gross_mismatch() {
        let mut record = create_test_record("20000", "24", "2");
        record.net_pay += dec("2");
        let result = validate_payroll(&record);

        assert!(!result.is_valid);
        assert!(result.has_error("GROSS_MISMATCH"));
    }

    #[test]
    fn test_mismatch_within_tolerance_is_accepted() {
        let mut record = create_test_record("20000", "24", "2");
        record.net_pay += Decimal::ONE;
        assert!(validate_payroll(&record).is_valid);
    }

    #[test]
    fn test_zero_gross_is_an_error() {
        let record = create_test_record("20000", "0", "0");
        let result = validate_payroll(&record);

        assert!(result.has_error("NON_POSITIVE_GROSS"));
    }

    #[test]
    fn test_present_exceeding_working_days() {
        let record = create_test_record("20000", "27", "0");
        let result = validate_payroll(&record);

        assert!(result.has_error("PRESENT_EXCEEDS_WORKING"));
        assert!(result.has_warning("PAID_DAYS_CLAMPED"));
    }

    #[test]
    fn test_clamping_alone_is_only_a_warning() {
        let record = create_test_record("20000", "26", "2");
        let result = validate_payroll(&record);

        assert!(result.is_valid);
        assert!(result.has_warning("PAID_DAYS_CLAMPED"));
    }

    #[test]
    fn test_negative_net_pay_warning() {
        let mut record = create_test_record("20000", "24", "2");
        record.deductions.other = dec("50000");
        record.total_deductions += dec("50000");
        record.net_pay -= dec("50000");
        let result = validate_payroll(&record);

        assert!(result.is_valid);
        assert!(result.has_warning("NEGATIVE_NET_PAY"));
    }

    #[test]
    fn test_voluntary_pf_above_default_rate_warns() {
        let mut record = create_test_record("10000", "26", "0");
        // 10000 x 12% = 1200 statutory; any voluntary part goes over.
        record.deductions.pf_employee = dec("1500");
        let result = validate_payroll(&record);

        assert!(result.has_warning("PF_ABOVE_DEFAULT_RATE"));
    }

    #[test]
    fn test_day_counts_above_working_days_warn() {
        let mut record = create_test_record("20000", "20", "2");
        record.attendance.absent_days = dec("3");
        record.attendance.unpaid_leave_days = dec("2");
        let result = validate_payroll(&record);

        // 20 + 3 + 2 + 2 = 27 against 26 working days
        assert!(result.is_valid);
        assert!(result.has_warning("DAY_COUNTS_EXCEED_WORKING"));
        assert!(!result.has_warning("PAID_DAYS_CLAMPED"));
    }

    #[test]
    fn test_day_counts_matching_working_days_do_not_warn() {
        let mut record = create_test_record("20000", "20", "2");
        record.attendance.absent_days = dec("3");
        record.attendance.unpaid_leave_days = dec("1");

        assert!(!validate_payroll(&record).has_warning("DAY_COUNTS_EXCEED_WORKING"));
    }

    #[test]
    fn test_unrepresentable_totals_are_a_mismatch() {
        let mut record = create_test_record("20000", "24", "2");
        record.gross_earnings = Decimal::MAX;
        record.total_deductions = -Decimal::MAX;
        let result = validate_payroll(&record);

        assert!(result.has_error("GROSS_MISMATCH"));
    }

    #[test]
    fn test_finalize_sets_status() {
        let (record, validation) = finalize(create_test_record("20000", "24", "2"));
        assert!(validation.is_valid);
        assert_eq!(record.status, PayrollStatus::Calculated);

        let (record, validation) = finalize(create_test_record("20000", "27", "0"));
        assert!(!validation.is_valid);
        assert_eq!(record.status, PayrollStatus::Invalid);
    }
}
