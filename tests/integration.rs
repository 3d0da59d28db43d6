//! Integration tests for the payroll engine HTTP API.
//!
//! This test suite covers:
//! - The full calculation of a standard monthly payroll
//! - Attendance pro-ration and overtime
//! - ESI eligibility at and above the wage limit
//! - Old and new tax regimes
//! - Rate snapshot selection by period
//! - Validation, summary and batch endpoints
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/payroll/calculate", body).await
}

fn create_salary(employee_id: &str, basic: &str, allowances: Value, regime: &str) -> Value {
    json!({
        "employee_id": employee_id,
        "basic_salary": basic,
        "allowances": allowances,
        "tax_regime": regime
    })
}

fn create_attendance(
    employee_id: &str,
    period_start: &str,
    working_days: &str,
    present_days: &str,
    paid_leaves: &str,
    overtime_hours: &str,
) -> Value {
    json!({
        "employee_id": employee_id,
        "period": {
            "id": &period_start[..7],
            "start_date": period_start,
            "end_date": period_start
        },
        "working_days": working_days,
        "present_days": present_days,
        "paid_leaves": paid_leaves,
        "overtime_hours": overtime_hours
    })
}

/// The standard scenario: basic 20,000 plus 10,850 allowances, full month.
fn create_standard_request() -> Value {
    json!({
        "salary": create_salary(
            "EMP001",
            "20000",
            json!({ "housing": "8000", "conveyance": "1600", "medical": "1250" }),
            "old"
        ),
        "attendance": create_attendance("EMP001", "2025-06-01", "26", "24", "2", "0")
    })
}

fn amount(value: &Value) -> Decimal {
    decimal(value.as_str().expect("amount should serialize as a string"))
}

fn assert_amount(result: &Value, pointer: &str, expected: &str) {
    let actual = amount(result.pointer(pointer).unwrap_or_else(|| panic!("{} missing", pointer)));
    assert_eq!(
        actual.normalize(),
        decimal(expected).normalize(),
        "Expected {} = {}, got {}",
        pointer,
        expected,
        actual
    );
}

// =============================================================================
// Standard calculation
// =============================================================================

#[tokio::test]
async fn test_standard_monthly_payroll() {
    let (status, result) = post_calculate(create_standard_request()).await;

    assert_eq!(status, StatusCode::OK);
    let record = &result["record"];
    assert_amount(record, "/attendance/attendance_ratio", "1");
    assert_amount(record, "/gross_earnings", "30850");
    assert_amount(record, "/deductions/pf_employee", "1800");
    assert_amount(record, "/deductions/esi_employee", "0");
    assert_amount(record, "/tax/annual_gross", "370200");
    assert_amount(record, "/tax/annual_tax", "6250");
    assert_amount(record, "/deductions/tds", "521");
    assert_amount(record, "/deductions/professional_tax", "200");
    assert_amount(record, "/total_deductions", "2521");
    assert_amount(record, "/net_pay", "28329");
    assert_eq!(record["esi_applicable"], false);
    assert_eq!(record["status"], "calculated");
    assert_eq!(result["validation"]["is_valid"], true);
}

#[tokio::test]
async fn test_employer_contributions_are_reported() {
    let (_, result) = post_calculate(create_standard_request()).await;
    let employer = &result["record"]["employer_contributions"];

    // 15000 x 3.67% = 550.5 -> 551, x 8.33% = 1249.5 -> 1250, x 0.5% = 75
    assert_amount(employer, "/pf/epf", "551");
    assert_amount(employer, "/pf/eps", "1250");
    assert_amount(employer, "/pf/edli", "75");
    assert_amount(employer, "/pf/admin_charge", "75");
    assert_amount(employer, "/pf/total", "1951");
    assert_amount(employer, "/esi", "0");
}

#[tokio::test]
async fn test_audit_trace_covers_every_stage() {
    let (_, result) = post_calculate(create_standard_request()).await;
    let steps = result["record"]["audit_trace"]["steps"].as_array().unwrap();

    let rule_ids: Vec<&str> = steps
        .iter()
        .map(|s| s["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "attendance_proration",
            "overtime",
            "provident_fund",
            "esi",
            "tds",
            "professional_tax"
        ]
    );
    assert!(steps.iter().all(|s| !s["reasoning"].as_str().unwrap().is_empty()));
}

#[tokio::test]
async fn test_repeat_calculation_is_identical() {
    let (_, first) = post_calculate(create_standard_request()).await;
    let (_, second) = post_calculate(create_standard_request()).await;

    assert_eq!(first["record"], second["record"]);
    assert_eq!(first["record"]["record_id"], second["record"]["record_id"]);
}

#[tokio::test]
async fn test_record_id_differs_by_period() {
    let (_, june) = post_calculate(create_standard_request()).await;
    let mut july_request = create_standard_request();
    july_request["attendance"] =
        create_attendance("EMP001", "2025-07-01", "27", "27", "0", "0");
    let (_, july) = post_calculate(july_request).await;

    assert_ne!(june["record"]["record_id"], july["record"]["record_id"]);
}

// =============================================================================
// Attendance and overtime
// =============================================================================

#[tokio::test]
async fn test_partial_attendance_prorates_fixed_pay() {
    let mut request = create_standard_request();
    request["attendance"] = create_attendance("EMP001", "2025-06-01", "26", "21", "2", "0");
    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    let record = &result["record"];
    assert_amount(record, "/earnings/basic_salary", "17692");
    assert_amount(record, "/earnings/allowances", "9598");
    assert_amount(record, "/attendance/loss_of_pay", "3560");
    assert_amount(record, "/gross_earnings", "27290");
}

#[tokio::test]
async fn test_overtime_is_paid_on_prorated_basic() {
    let mut request = create_standard_request();
    request["attendance"] = create_attendance("EMP001", "2025-06-01", "26", "24", "2", "5");
    let (_, result) = post_calculate(request).await;

    // 20000 / 208 x 5 x 1.5 = 721.15 -> 721
    assert_amount(&result["record"], "/earnings/overtime_pay", "721");
    assert_amount(&result["record"], "/gross_earnings", "31571");
}

#[tokio::test]
async fn test_present_days_above_working_days_is_invalid() {
    let mut request = create_standard_request();
    request["attendance"] = create_attendance("EMP001", "2025-06-01", "26", "27", "0", "0");
    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["record"]["status"], "invalid");
    assert_eq!(result["record"]["attendance"]["ratio_clamped"], true);
    let codes: Vec<&str> = result["validation"]["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["PRESENT_EXCEEDS_WORKING"]);
}

// =============================================================================
// ESI and professional tax
// =============================================================================

#[tokio::test]
async fn test_esi_applies_at_the_wage_limit() {
    let request = json!({
        "salary": create_salary("EMP002", "15000", json!({ "housing": "10000" }), "new"),
        "attendance": create_attendance("EMP002", "2025-06-01", "26", "26", "0", "0")
    });
    let (_, result) = post_calculate(request).await;
    let record = &result["record"];

    // 25000 x 0.75% = 187.5 -> 188, x 3.25% = 812.5 -> 813
    assert_eq!(record["esi_applicable"], true);
    assert_amount(record, "/deductions/esi_employee", "188");
    assert_amount(record, "/employer_contributions/esi", "813");
    assert_amount(record, "/deductions/professional_tax", "150");
}

#[tokio::test]
async fn test_low_earner_pays_no_professional_tax() {
    let request = json!({
        "salary": create_salary("EMP003", "12000", json!({}), "new"),
        "attendance": create_attendance("EMP003", "2025-06-01", "26", "26", "0", "0")
    });
    let (_, result) = post_calculate(request).await;
    let record = &result["record"];

    assert_amount(record, "/deductions/professional_tax", "0");
    assert_amount(record, "/deductions/pf_employee", "1440");
    assert_amount(record, "/deductions/esi_employee", "90");
    assert_amount(record, "/deductions/tds", "0");
    assert_amount(record, "/net_pay", "10470");
}

#[tokio::test]
async fn test_earlier_snapshot_caps_professional_tax() {
    // The 2024-04-01 snapshot caps PT at 200 and ESI eligibility at 21000.
    let request = json!({
        "salary": create_salary("EMP004", "40000", json!({ "housing": "20000" }), "new"),
        "attendance": create_attendance("EMP004", "2024-06-01", "26", "26", "0", "0")
    });
    let (status, result) = post_calculate(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&result["record"], "/deductions/professional_tax", "200");
}

// =============================================================================
// Tax regimes
// =============================================================================

#[tokio::test]
async fn test_new_regime_high_earner() {
    // 100000 x 12 = 1,200,000:
    // 400000 x 5% = 20000, 300000 x 10% = 30000, 200000 x 15% = 30000
    // = 80000, + 4% cess = 83200; / 12 = 6933.33 -> 6933
    let request = json!({
        "salary": create_salary("EMP005", "60000", json!({ "housing": "40000" }), "new"),
        "attendance": create_attendance("EMP005", "2025-06-01", "26", "26", "0", "0")
    });
    let (_, result) = post_calculate(request).await;
    let record = &result["record"];

    assert_amount(record, "/tax/annual_tax", "83200");
    assert_amount(record, "/deductions/tds", "6933");
    assert_amount(record, "/deductions/professional_tax", "300");
    assert_eq!(record["tax"]["regime"], "new");
}

#[tokio::test]
async fn test_same_gross_old_regime_taxes_more() {
    let salary = |regime: &str| {
        json!({
            "salary": create_salary("EMP006", "60000", json!({ "housing": "40000" }), regime),
            "attendance": create_attendance("EMP006", "2025-06-01", "26", "26", "0", "0")
        })
    };
    let (_, old) = post_calculate(salary("old")).await;
    let (_, new) = post_calculate(salary("new")).await;

    assert!(
        amount(&old["record"]["tax"]["annual_tax"]) > amount(&new["record"]["tax"]["annual_tax"])
    );
}

// =============================================================================
// Validate and summary endpoints
// =============================================================================

#[tokio::test]
async fn test_validate_endpoint_detects_tampered_record() {
    let (_, result) = post_calculate(create_standard_request()).await;
    let mut record = result["record"].clone();
    record["net_pay"] = json!("30000");

    let (status, validation) =
        post_json(create_router_for_test(), "/payroll/validate", record).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(validation["is_valid"], false);
    assert_eq!(validation["errors"][0]["code"], "GROSS_MISMATCH");
}

#[tokio::test]
async fn test_summary_endpoint() {
    let (_, result) = post_calculate(create_standard_request()).await;

    let (status, summary) = post_json(
        create_router_for_test(),
        "/payroll/summary",
        result["record"].clone(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_amount(&summary, "/net_pay", "28329");
    assert_amount(&summary, "/deduction_breakdown/statutory/pf", "1800");
    assert_amount(&summary, "/deduction_breakdown/statutory/tds", "521");
    assert_amount(&summary, "/deduction_breakdown/statutory/professional_tax", "200");
    // 28329 / 30850 = 91.8% -> 92; 24 / 26 = 92.3% -> 92
    assert_amount(&summary, "/take_home_percentage", "92");
    assert_amount(&summary, "/attendance_ratio_percent", "92");
}

// =============================================================================
// Batch endpoint
// =============================================================================

#[tokio::test]
async fn test_batch_collects_failures_without_aborting() {
    let mut broken = create_standard_request();
    broken["attendance"]["employee_id"] = json!("EMP999");
    let body = json!({
        "entries": [create_standard_request(), broken, create_standard_request()]
    });

    let (status, outcome) = post_json(create_router_for_test(), "/payroll/batch", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["records"].as_array().unwrap().len(), 2);
    let failures = outcome["failures"].as_array().unwrap();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0]["code"], "EMPLOYEE_MISMATCH");
    assert_eq!(failures[0]["employee_id"], "EMP001");
    assert_amount(&outcome, "/records/0/record/net_pay", "28329");
}

#[tokio::test]
async fn test_empty_batch() {
    let (status, outcome) =
        post_json(create_router_for_test(), "/payroll/batch", json!({ "entries": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(outcome["records"].as_array().unwrap().is_empty());
    assert!(outcome["failures"].as_array().unwrap().is_empty());
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/payroll/calculate")
                .header("Content-Type", "application/json")
                .body(Body::from("{\"salary\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_salary_returns_validation_error() {
    let mut request = create_standard_request();
    request.as_object_mut().unwrap().remove("salary");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_unknown_regime_is_malformed() {
    let mut request = create_standard_request();
    request["salary"]["tax_regime"] = json!("flat");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_negative_basic_salary_returns_400() {
    let mut request = create_standard_request();
    request["salary"]["basic_salary"] = json!("-100");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SALARY_STRUCTURE");
}

#[tokio::test]
async fn test_negative_advance_returns_400() {
    let mut request = create_standard_request();
    request["advance_deduction"] = json!("-1");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_ADJUSTMENT");
}

#[tokio::test]
async fn test_oversized_basic_salary_returns_400() {
    let mut request = create_standard_request();
    request["salary"]["basic_salary"] = json!("79228162514264337593543950335");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_SALARY_STRUCTURE");
}

#[tokio::test]
async fn test_period_ending_before_start_returns_400() {
    let mut request = create_standard_request();
    request["attendance"]["period"]["end_date"] = json!("2025-05-31");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_ATTENDANCE");
}

#[tokio::test]
async fn test_period_before_any_snapshot_returns_400() {
    let mut request = create_standard_request();
    request["attendance"] = create_attendance("EMP001", "2020-06-01", "26", "24", "2", "0");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "RATES_NOT_FOUND");
}

#[tokio::test]
async fn test_employee_mismatch_returns_400() {
    let mut request = create_standard_request();
    request["attendance"]["employee_id"] = json!("EMP002");
    let (status, error) = post_calculate(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "EMPLOYEE_MISMATCH");
    assert!(error["message"].as_str().unwrap().contains("EMP002"));
}
