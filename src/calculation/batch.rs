//! Parallel payroll runs over many employees.
//!
//! Each input is calculated and finalized independently on the `rayon`
//! thread pool. A failing employee is collected as a [`BatchFailure`] and
//! never aborts the rest of the run.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{ConfigLoader, PayrollSettings, StatutoryRateSnapshot, TaxSlabTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollInput, PayrollRecord, ValidationResult};

use super::{calculate_payroll_with_settings, finalize};

/// A finalized record and its validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// The finalized record.
    pub record: PayrollRecord,
    /// Business-rule findings for the record.
    pub validation: ValidationResult,
}

/// An employee whose payroll could not be calculated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// The employee the input was for.
    pub employee_id: String,
    /// The payroll period the input was for.
    pub period_id: String,
    /// Stable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

/// The outcome of a batch run. Both lists keep input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Successfully calculated records.
    pub records: Vec<BatchRecord>,
    /// Inputs that failed with an engine error.
    pub failures: Vec<BatchFailure>,
}

/// Runs payroll for every input against one rate snapshot and slab table.
pub fn run_payroll_batch(
    inputs: &[PayrollInput],
    rates: &StatutoryRateSnapshot,
    slabs: &TaxSlabTable,
    settings: &PayrollSettings,
) -> BatchOutcome {
    run_batch(inputs, |_| Ok(rates), slabs, settings)
}

/// Runs payroll for every input, selecting each input's rate snapshot from
/// the loaded configuration by its period start date.
///
/// An input whose period predates every snapshot fails with
/// `RATES_NOT_FOUND`.
pub fn run_configured_batch(inputs: &[PayrollInput], config: &ConfigLoader) -> BatchOutcome {
    run_batch(
        inputs,
        |input| config.statutory_rates_for(input.attendance.period.start_date),
        config.tax_slabs(),
        config.settings(),
    )
}

fn run_batch<'a, F>(
    inputs: &[PayrollInput],
    rates_for: F,
    slabs: &TaxSlabTable,
    settings: &PayrollSettings,
) -> BatchOutcome
where
    F: Fn(&PayrollInput) -> EngineResult<&'a StatutoryRateSnapshot> + Sync,
{
    let start_time = Instant::now();

    let results: Vec<Result<BatchRecord, BatchFailure>> = inputs
        .par_iter()
        .map(|input| {
            calculate_one(input, &rates_for, slabs, settings).map_err(|err| {
                warn!(
                    employee_id = %input.salary.employee_id,
                    period_id = %input.attendance.period.id,
                    error = %err,
                    "Payroll calculation failed"
                );
                BatchFailure {
                    employee_id: input.salary.employee_id.clone(),
                    period_id: input.attendance.period.id.clone(),
                    code: err.code().to_string(),
                    message: err.to_string(),
                }
            })
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(failure) => outcome.failures.push(failure),
        }
    }

    info!(
        inputs = inputs.len(),
        records = outcome.records.len(),
        failures = outcome.failures.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll batch completed"
    );

    outcome
}

fn calculate_one<'a, F>(
    input: &PayrollInput,
    rates_for: &F,
    slabs: &TaxSlabTable,
    settings: &PayrollSettings,
) -> Result<BatchRecord, EngineError>
where
    F: Fn(&PayrollInput) -> EngineResult<&'a StatutoryRateSnapshot>,
{
    let rates = rates_for(input)?;
    let record = calculate_payroll_with_settings(
        &input.salary,
        &input.attendance,
        rates,
        slabs,
        input.advance_deduction,
        &input.adjustments,
        settings,
    )?;
    let (record, validation) = finalize(record);
    Ok(BatchRecord { record, validation })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Adjustments, Allowances, AttendanceSummary, PayrollPeriod, PayrollStatus,
        SalaryStructure, TaxRegime,
    };
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_rates() -> StatutoryRateSnapshot {
        StatutoryRateSnapshot {
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
        }
    }

    fn create_test_input(employee_id: &str, present_days: &str) -> PayrollInput {
        PayrollInput {
            salary: SalaryStructure {
                employee_id: employee_id.to_string(),
                basic_salary: dec("20000"),
                allowances: Allowances {
                    housing: dec("8000"),
                    ..Allowances::default()
                },
                voluntary_pf: Decimal::ZERO,
                health_insurance_premium: Decimal::ZERO,
                term_insurance_premium: Decimal::ZERO,
                tax_regime: TaxRegime::New,
            },
            attendance: AttendanceSummary {
                employee_id: employee_id.to_string(),
                period: PayrollPeriod {
                    id: "2025-06".to_string(),
                    start_date: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                    end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
                },
                working_days: dec("26"),
                present_days: dec(present_days),
                absent_days: Decimal::ZERO,
                paid_leaves: Decimal::ZERO,
                unpaid_leaves: Decimal::ZERO,
                overtime_hours: Decimal::ZERO,
            },
            advance_deduction: Decimal::ZERO,
            adjustments: Adjustments::default(),
        }
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let inputs: Vec<PayrollInput> = (1..=50)
            .map(|i| create_test_input(&format!("EMP{:03}", i), "26"))
            .collect();
        let outcome = run_payroll_batch(
            &inputs,
            &create_test_rates(),
            &TaxSlabTable::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(outcome.records.len(), 50);
        assert!(outcome.failures.is_empty());
        for (input, entry) in inputs.iter().zip(&outcome.records) {
            assert_eq!(entry.record.employee_id, input.salary.employee_id);
        }
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let mut broken = create_test_input("EMP002", "26");
        broken.attendance.working_days = Decimal::ZERO;
        let inputs = vec![
            create_test_input("EMP001", "26"),
            broken,
            create_test_input("EMP003", "26"),
        ];
        let outcome = run_payroll_batch(
            &inputs,
            &create_test_rates(),
            &TaxSlabTable::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(outcome.records.len(), 2);
        assert_eq!(outcome.failures.len(), 1);
        let failure = &outcome.failures[0];
        assert_eq!(failure.employee_id, "EMP002");
        assert_eq!(failure.period_id, "2025-06");
        assert_eq!(failure.code, "INVALID_ATTENDANCE");
    }

    #[test]
    fn test_oversized_salary_fails_alone() {
        let mut oversized = create_test_input("EMP002", "26");
        oversized.salary.basic_salary = dec("10000000000000000000000000000");
        let inputs = vec![create_test_input("EMP001", "26"), oversized];
        let outcome = run_payroll_batch(
            &inputs,
            &create_test_rates(),
            &TaxSlabTable::default(),
            &PayrollSettings::default(),
        );

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].record.employee_id, "EMP001");
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].employee_id, "EMP002");
        assert_eq!(outcome.failures[0].code, "INVALID_SALARY_STRUCTURE");
    }

    #[test]
    fn test_records_are_finalized() {
        let inputs = vec![create_test_input("EMP001", "27")];
        let outcome = run_payroll_batch(
            &inputs,
            &create_test_rates(),
            &TaxSlabTable::default(),
            &PayrollSettings::default(),
        );

        let entry = &outcome.records[0];
        assert_eq!(entry.record.status, PayrollStatus::Invalid);
        assert!(entry.validation.has_error("PRESENT_EXCEEDS_WORKING"));
    }

    #[test]
    fn test_configured_batch_reports_missing_rates() {
        let config = ConfigLoader::load("./config/default").unwrap();
        let mut early = create_test_input("EMP002", "26");
        early.attendance.period = PayrollPeriod {
            id: "2019-06".to_string(),
            start_date: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2019, 6, 30).unwrap(),
        };
        let inputs = vec![create_test_input("EMP001", "26"), early];

        let outcome = run_configured_batch(&inputs, &config);

        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.failures[0].code, "RATES_NOT_FOUND");
        assert_eq!(outcome.failures[0].period_id, "2019-06");
    }

    #[test]
    fn test_empty_batch() {
        let outcome = run_payroll_batch(
            &[],
            &create_test_rates(),
            &TaxSlabTable::default(),
            &PayrollSettings::default(),
        );
        assert_eq!(outcome, BatchOutcome::default());
    }
}
