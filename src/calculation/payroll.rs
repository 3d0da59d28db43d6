//! Payroll aggregation for one employee and one period.
//!
//! Stages run in a fixed order: attendance pro-ration, overtime, provident
//! fund, gross earnings, ESI, TDS and professional tax. PF is deducted from
//! net pay but never reduces the gross that ESI, TDS and PT are computed on.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::{PayrollSettings, StatutoryRateSnapshot, TaxSlabTable};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Adjustments, AttendanceBreakdown, AttendanceSummary, AuditTrace, Deductions,
    EmployerContributions, Earnings, MAX_MONTHLY_AMOUNT, PayrollRecord, PayrollStatus,
    SalaryStructure, TaxComputation, record_id_for,
};

use super::{
    calculate_esi, calculate_overtime, calculate_professional_tax, calculate_provident_fund,
    calculate_tds, prorate_attendance,
};

/// Calculates a payroll record using the default [`PayrollSettings`].
///
/// See [`calculate_payroll_with_settings`].
pub fn calculate_payroll(
    salary: &SalaryStructure,
    attendance: &AttendanceSummary,
    rates: &StatutoryRateSnapshot,
    slabs: &TaxSlabTable,
    advance_deduction: Decimal,
    adjustments: &Adjustments,
) -> EngineResult<PayrollRecord> {
    calculate_payroll_with_settings(
        salary,
        attendance,
        rates,
        slabs,
        advance_deduction,
        adjustments,
        &PayrollSettings::default(),
    )
}

/// Calculates a payroll record for one employee and period.
///
/// The returned record has status `calculated`; run it through
/// [`finalize`](super::finalize) to apply the business-rule checks.
///
/// # Errors
///
/// Returns a configuration-kind [`EngineError`] when an input breaks its
/// contract: negative or oversized amounts or day counts, zero working days,
/// a period ending before it starts, salary and attendance for different
/// employees, or malformed rates, slabs or settings.
pub fn calculate_payroll_with_settings(
    salary: &SalaryStructure,
    attendance: &AttendanceSummary,
    rates: &StatutoryRateSnapshot,
    slabs: &TaxSlabTable,
    advance_deduction: Decimal,
    adjustments: &Adjustments,
    settings: &PayrollSettings,
) -> EngineResult<PayrollRecord> {
    salary.validate()?;
    attendance.validate()?;
    adjustments.validate()?;
    if advance_deduction < Decimal::ZERO {
        return Err(EngineError::InvalidAdjustment {
            field: "advance_deduction".to_string(),
            message: format!("cannot be negative, got {}", advance_deduction),
        });
    }
    if advance_deduction > MAX_MONTHLY_AMOUNT {
        return Err(EngineError::InvalidAdjustment {
            field: "advance_deduction".to_string(),
            message: format!(
                "{} exceeds the maximum of {}",
                advance_deduction, MAX_MONTHLY_AMOUNT
            ),
        });
    }
    if salary.employee_id != attendance.employee_id {
        return Err(EngineError::EmployeeMismatch {
            salary_employee: salary.employee_id.clone(),
            attendance_employee: attendance.employee_id.clone(),
        });
    }
    rates.validate()?;
    settings.validate()?;

    let mut trace = AuditTrace::default();
    let mut step_number: u32 = 1;

    let proration = prorate_attendance(
        salary.basic_salary,
        salary.allowances.total(),
        attendance.working_days,
        attendance.present_days,
        attendance.paid_leaves,
        step_number,
    )?;
    debug!(
        employee_id = %salary.employee_id,
        ratio = %proration.ratio,
        basic = %proration.basic,
        allowances = %proration.allowances,
        "Attendance pro-rated"
    );
    trace.steps.push(proration.audit_step);
    step_number += 1;

    let overtime = calculate_overtime(
        proration.basic,
        attendance.overtime_hours,
        &settings.overtime,
        step_number,
    )?;
    debug!(
        employee_id = %salary.employee_id,
        overtime_pay = %overtime.overtime_pay,
        "Overtime calculated"
    );
    trace.steps.push(overtime.audit_step);
    step_number += 1;

    let pf = calculate_provident_fund(proration.basic, rates, salary.voluntary_pf, step_number);
    debug!(
        employee_id = %salary.employee_id,
        pf_employee = %pf.employee_contribution,
        pf_employer = %pf.employer.total,
        "Provident fund calculated"
    );
    trace.steps.push(pf.audit_step);
    step_number += 1;

    let earnings = Earnings {
        basic_salary: proration.basic,
        allowances: proration.allowances,
        overtime_pay: overtime.overtime_pay,
        extra_earnings: adjustments.extra_earnings,
    };
    let gross_earnings = earnings.total();

    let esi = calculate_esi(gross_earnings, rates, step_number);
    debug!(
        employee_id = %salary.employee_id,
        gross = %gross_earnings,
        applicable = esi.applicable,
        esi_employee = %esi.employee_contribution,
        "ESI calculated"
    );
    trace.steps.push(esi.audit_step);
    step_number += 1;

    let tds = calculate_tds(
        gross_earnings,
        salary.tax_regime,
        slabs,
        settings.tds_mandatory,
        step_number,
    )?;
    debug!(
        employee_id = %salary.employee_id,
        regime = %salary.tax_regime,
        annual_tax = %tds.annual_tax,
        monthly_tds = %tds.monthly_tds,
        "TDS calculated"
    );
    trace.steps.push(tds.audit_step);
    step_number += 1;

    let pt = calculate_professional_tax(
        gross_earnings,
        &settings.professional_tax,
        rates.pt_monthly_cap,
        step_number,
    )?;
    debug!(
        employee_id = %salary.employee_id,
        professional_tax = %pt.amount,
        "Professional tax calculated"
    );
    trace.steps.push(pt.audit_step);

    let deductions = Deductions {
        pf_employee: pf.employee_contribution,
        esi_employee: esi.employee_contribution,
        tds: tds.monthly_tds,
        professional_tax: pt.amount,
        health_insurance: salary.health_insurance_premium,
        term_insurance: salary.term_insurance_premium,
        advance_recovery: advance_deduction,
        other: adjustments.extra_deductions,
    };
    let total_deductions = deductions.total();
    let net_pay = gross_earnings - total_deductions;

    debug!(
        employee_id = %salary.employee_id,
        period_id = %attendance.period.id,
        gross = %gross_earnings,
        total_deductions = %total_deductions,
        net_pay = %net_pay,
        "Payroll calculated"
    );

    Ok(PayrollRecord {
        record_id: record_id_for(&salary.employee_id, &attendance.period.id),
        employee_id: salary.employee_id.clone(),
        period: attendance.period.clone(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        status: PayrollStatus::Calculated,
        attendance: AttendanceBreakdown {
            working_days: attendance.working_days,
            present_days: attendance.present_days,
            absent_days: attendance.absent_days,
            paid_leave_days: attendance.paid_leaves,
            unpaid_leave_days: attendance.unpaid_leaves,
            paid_days: proration.paid_days,
            attendance_ratio: proration.ratio,
            ratio_clamped: proration.ratio_clamped,
            loss_of_pay: proration.loss_of_pay,
        },
        earnings,
        deductions,
        employer_contributions: EmployerContributions {
            pf: pf.employer,
            esi: esi.employer_contribution,
        },
        esi_applicable: esi.applicable,
        tax: TaxComputation {
            regime: salary.tax_regime,
            annual_gross: tds.annual_gross,
            annual_tax: tds.annual_tax,
            monthly_tds: tds.monthly_tds,
            effective_rate: tds.effective_rate,
        },
        gross_earnings,
        total_deductions,
        net_pay,
        audit_trace: trace,
    })
}
