//! Integration tests for the payroll engine.
//!
//! This test suite covers:
//! - Gross-to-net and net-to-gross through `/calculate`
//! - Annual schedules through `/schedule`
//! - Parameter inspection through `/parameters/{year}`
//! - Error codes and status mapping
//! - Properties of the calculation core (monotonicity, composition, round trip)

use std::str::FromStr;
use std::sync::OnceLock;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    DEFAULT_TOLERANCE, calculate_payslip, find_gross, period_tax, total_liability,
};
use payroll_engine::config::{ParameterStore, YearParameters};
use payroll_engine::models::EmployeeClass;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let store = ParameterStore::open("./config/params").expect("Failed to load params");
    AppState::new(store)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn field(json: &Value, pointer: &str) -> Decimal {
    let value = json
        .pointer(pointer)
        .unwrap_or_else(|| panic!("missing {} in {}", pointer, json));
    match value {
        Value::String(s) => decimal(s),
        other => decimal(&other.to_string()),
    }
}

fn params_2026() -> &'static YearParameters {
    static PARAMS: OnceLock<YearParameters> = OnceLock::new();
    PARAMS.get_or_init(|| {
        ParameterStore::load_year("./config/params", 2026).expect("Failed to load 2026 params")
    })
}

async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn post_json(router: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

async fn post_calculate(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/calculate", body.to_string()).await
}

async fn post_schedule(body: Value) -> (StatusCode, Value) {
    post_json(create_router_for_test(), "/schedule", body.to_string()).await
}

async fn get_parameters(year: &str) -> (StatusCode, Value) {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/parameters/{}", year))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

// =============================================================================
// Gross to net
// =============================================================================

#[tokio::test]
async fn test_gross_to_net_standard_worker() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "50000"
    }))
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    assert_eq!(json["mode"], "gross_to_net");
    assert_eq!(json["employee_type"], "normal_4a");
    assert_eq!(json["year"], 2026);
    assert!(json.get("found_gross").is_none());
    assert!(json["calculation_id"].as_str().is_some());
    assert!(json["engine_version"].as_str().is_some());

    assert_eq!(field(&json, "/payslip/sgk_employee"), decimal("7000"));
    assert_eq!(field(&json, "/payslip/income_tax_net"), decimal("2163.68"));
    assert_eq!(field(&json, "/payslip/stamp_tax_net"), decimal("128.80"));
    assert_eq!(field(&json, "/summary/net"), decimal("40207.52"));
    assert_eq!(field(&json, "/summary/taxes"), decimal("2292.48"));
    assert_eq!(field(&json, "/summary/contributions"), decimal("7500"));

    // cum_tax_base_new 42500 sits in the first bracket.
    assert_eq!(json["bracket"]["index"], 0);
    assert_eq!(field(&json, "/bracket/rate"), decimal("0.15"));
    assert_eq!(field(&json, "/bracket/remaining_in_bracket"), decimal("107500"));
}

#[tokio::test]
async fn test_gross_to_net_minimum_wage_is_tax_free() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "33030.00"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&json, "/payslip/income_tax_net"), Decimal::ZERO);
    assert_eq!(field(&json, "/payslip/stamp_tax_net"), Decimal::ZERO);
    assert_eq!(field(&json, "/summary/net"), decimal("28075.50"));
}

#[tokio::test]
async fn test_gross_to_net_retiree() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": 50000,
        "employee_type": "emekli_sgdp"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["employee_type"], "emekli_sgdp");
    assert_eq!(field(&json, "/payslip/sgk_employee"), decimal("3750"));
    assert_eq!(field(&json, "/payslip/unemployment_employee"), Decimal::ZERO);
    // 50000 - 3750 - 2726.175 - 128.8023
    assert_eq!(field(&json, "/summary/net"), decimal("43395.02"));
}

#[tokio::test]
async fn test_gross_to_net_uses_cumulative_base() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "40000",
        "cum_base": "140000"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(field(&json, "/payslip/income_tax_gross"), decimal("6300"));
    assert_eq!(field(&json, "/payslip/cum_tax_base_new"), decimal("174000"));
    assert_eq!(json["bracket"]["index"], 1);
    assert_eq!(field(&json, "/bracket/rate"), decimal("0.20"));
    assert_eq!(field(&json, "/bracket/remaining_in_bracket"), decimal("176000"));
}

#[tokio::test]
async fn test_unbounded_bracket_has_no_remaining_amount() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "100000",
        "cum_base": "5000000"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["bracket"]["index"], 4);
    assert_eq!(field(&json, "/bracket/rate"), decimal("0.40"));
    assert!(json["bracket"]["remaining_in_bracket"].is_null());
}

#[tokio::test]
async fn test_gross_to_net_earlier_year() {
    let (status_2025, json_2025) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "50000",
        "year": 2025
    }))
    .await;
    let (_, json_2026) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "50000"
    }))
    .await;

    assert_eq!(status_2025, StatusCode::OK);
    assert_eq!(json_2025["year"], 2025);
    // Lower 2025 minimum wage means a smaller exemption.
    assert!(field(&json_2025, "/summary/net") < field(&json_2026, "/summary/net"));
}

// =============================================================================
// Net to gross
// =============================================================================

#[tokio::test]
async fn test_net_to_gross_finds_matching_gross() {
    let (status, json) = post_calculate(json!({
        "mode": "net_to_gross",
        "amount": "40207.52"
    }))
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    assert_eq!(json["mode"], "net_to_gross");

    let found_gross = field(&json, "/found_gross");
    assert_eq!(field(&json, "/payslip/gross"), found_gross);
    assert!((found_gross - decimal("50000")).abs() <= decimal("0.02"));
    assert!((field(&json, "/summary/net") - decimal("40207.52")).abs() <= DEFAULT_TOLERANCE);
}

#[tokio::test]
async fn test_net_to_gross_above_ceiling() {
    let (status, json) = post_calculate(json!({
        "mode": "net_to_gross",
        "amount": "250000",
        "cum_base": "600000"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(field(&json, "/found_gross") > decimal("297270"));
    assert!((field(&json, "/summary/net") - decimal("250000")).abs() <= decimal("0.02"));
}

// =============================================================================
// Annual schedule
// =============================================================================

#[tokio::test]
async fn test_schedule_with_constant_gross() {
    let (status, json) = post_schedule(json!({ "gross": "60000" })).await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    let months = json["months"].as_array().unwrap();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0]["month"], 1);
    assert_eq!(field(&json, "/totals/gross"), decimal("720000"));

    for pair in months.windows(2) {
        assert_eq!(
            field(&pair[1], "/cum_tax_base_prev"),
            field(&pair[0], "/cum_tax_base_new")
        );
    }
}

#[tokio::test]
async fn test_schedule_with_monthly_list() {
    let (status, json) = post_schedule(json!({
        "monthly_gross": ["40000", "40000", "90000"],
        "employee_type": "emekli_sgdp"
    }))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["months"].as_array().unwrap().len(), 3);
    assert_eq!(field(&json, "/totals/gross"), decimal("170000"));
    assert_eq!(field(&json, "/totals/unemployment_employee"), Decimal::ZERO);
}

#[tokio::test]
async fn test_schedule_with_thirteen_months_is_invalid() {
    let (status, json) = post_schedule(json!({
        "monthly_gross": vec!["40000"; 13]
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_schedule_without_amounts_is_invalid() {
    let (status, json) = post_schedule(json!({ "year": 2026 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

// =============================================================================
// Parameters
// =============================================================================

#[tokio::test]
async fn test_parameters_for_loaded_year() {
    let (status, json) = get_parameters("2026").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["year"], 2026);
    assert_eq!(field(&json, "/min_wage_gross"), decimal("33030"));
    assert_eq!(field(&json, "/sgk_ceiling_monthly"), decimal("297270"));

    let tariff = json["income_tax_tariff"].as_array().unwrap();
    assert_eq!(tariff.len(), 5);
    assert!(tariff[4]["up_to"].is_null());
    assert_eq!(field(&json, "/rates/emekli_sgdp/sgdp_employee"), decimal("0.075"));
}

#[tokio::test]
async fn test_parameters_for_unknown_year() {
    let (status, json) = get_parameters("2031").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "PARAMETERS_NOT_FOUND");
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_unknown_year_is_not_found() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "50000",
        "year": 1999
    }))
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "PARAMETERS_NOT_FOUND");
}

#[tokio::test]
async fn test_invalid_employee_class() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "50000",
        "employee_type": "memur"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_EMPLOYEE_CLASS");
    assert!(json["message"].as_str().unwrap().contains("memur"));
}

#[tokio::test]
async fn test_missing_amount_is_validation_error() {
    let (status, json) = post_calculate(json!({ "mode": "gross_to_net" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_malformed_json() {
    let (status, json) = post_json(
        create_router_for_test(),
        "/calculate",
        "{ \"mode\": \"gross_to_net\", ".to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_unknown_mode_is_malformed() {
    let (status, json) = post_calculate(json!({
        "mode": "sideways",
        "amount": "50000"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_negative_amount_is_invalid_input() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "-100"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_oversized_net_target_is_invalid_input() {
    let (status, json) = post_calculate(json!({
        "mode": "net_to_gross",
        "amount": "30000000000000000000000000000"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert!(json["message"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn test_oversized_gross_and_cum_base_are_invalid_input() {
    let (status, json) = post_calculate(json!({
        "mode": "gross_to_net",
        "amount": "50000000000000000000000000000",
        "cum_base": "50000000000000000000000000000"
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_oversized_schedule_month_is_invalid_input() {
    let (status, json) = post_schedule(json!({
        "monthly_gross": ["40000", "50000000000000000000000000000"]
    }))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_largest_accepted_amount_is_calculated() {
    let (status, json) = post_calculate(json!({
        "mode": "net_to_gross",
        "amount": "1000000000000000"
    }))
    .await;

    assert_eq!(status, StatusCode::OK, "body: {}", json);
    assert!(field(&json, "/found_gross") <= decimal("1000000000000000"));
}

#[tokio::test]
async fn test_non_numeric_year_in_path_is_invalid_input() {
    let (status, json) = get_parameters("abc").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_INPUT");
    assert!(json["message"].as_str().unwrap().contains("year"));
}

#[test]
fn test_invalid_parameter_directory_fails_to_open() {
    let result = ParameterStore::open("./config/invalid");
    assert!(result.is_err());
}

// =============================================================================
// Properties
// =============================================================================

fn money(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #[test]
    fn prop_net_never_exceeds_gross(gross in money(100_000_000), cum in money(500_000_000)) {
        let payslip = calculate_payslip(gross, cum, EmployeeClass::Normal, params_2026()).unwrap();
        prop_assert!(payslip.net <= payslip.gross);
    }

    #[test]
    fn prop_net_is_monotone_in_gross(
        a in money(100_000_000),
        b in money(100_000_000),
        cum in money(500_000_000),
    ) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        for class in EmployeeClass::ALL {
            let net_low = calculate_payslip(low, cum, class, params_2026()).unwrap().net;
            let net_high = calculate_payslip(high, cum, class, params_2026()).unwrap().net;
            prop_assert!(net_low <= net_high, "{}: net({}) = {} > net({}) = {}", class, low, net_low, high, net_high);
        }
    }

    #[test]
    fn prop_period_tax_composes(x in money(1_000_000_000), y in money(1_000_000_000)) {
        let tariff = params_2026().tariff();
        prop_assert_eq!(
            period_tax(Decimal::ZERO, x + y, tariff),
            period_tax(Decimal::ZERO, x, tariff) + period_tax(x, y, tariff)
        );
        prop_assert_eq!(period_tax(Decimal::ZERO, x, tariff), total_liability(x, tariff));
    }

    #[test]
    fn prop_net_to_gross_round_trip(
        target in (3_000_000i64..=40_000_000).prop_map(|c| Decimal::new(c, 2)),
        cum in money(200_000_000),
    ) {
        let params = params_2026();
        let gross = find_gross(target, cum, EmployeeClass::Normal, params, DEFAULT_TOLERANCE).unwrap();
        let net = calculate_payslip(gross, cum, EmployeeClass::Normal, params).unwrap().net;
        prop_assert!((net - target).abs() <= decimal("0.02"), "target {} got {} from {}", target, net, gross);
    }
}
