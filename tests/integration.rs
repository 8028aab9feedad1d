//! Integration tests for the performance engine HTTP API.
//!
//! This test suite covers:
//! - Recording daily performance, including clamping, task failure and leave
//! - Monthly compensation over a full month of August 2025
//! - Summary recomputation after records change
//! - Leaderboard ranking and inactive employees
//! - Employee onboarding and profile updates
//! - Department, distribution, company and trend analytics
//! - Business-day listing
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

use performance_engine::api::{AppState, create_router};
use performance_engine::calculation::business_days;
use performance_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/acme").expect("Failed to load config");
    AppState::new(config)
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn decimal_field(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal fields serialize as strings"))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn put_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("PUT")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    send(
        router,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post_performance(router: &Router, employee_id: &str, date: &str, completed: &str) -> Value {
    let (status, body) = post_json(
        router.clone(),
        "/performance",
        json!({
            "employee_id": employee_id,
            "date": date,
            "completed_hours": completed,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    body
}

fn new_employee_body(email: &str) -> Value {
    json!({
        "name": "Nisha Patel",
        "email": email,
        "designation": "Financial Analyst",
        "department": "Finance",
        "base_salary": "40000",
        "join_date": "2025-08-04",
        "employment_type": "full_time",
        "performed_by": "hr.admin"
    })
}

// =============================================================================
// Daily Performance
// =============================================================================

#[tokio::test]
async fn test_record_nominal_day() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP20250001",
            "date": "2025-08-01",
            "completed_hours": "9"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "created");
    let record = &body["record"];
    assert_eq!(record["employee_id"], "EMP20250001");
    assert_eq!(record["date"], "2025-08-01");
    assert_eq!(decimal_field(&record["available_hours"]), decimal("9"));
    assert_eq!(decimal_field(&record["efficiency"]), decimal("1"));
    assert_eq!(decimal_field(&record["approved_points"]), decimal("9"));
    assert!(body["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_record_meetings_and_factors() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP20250002",
            "date": "2025-08-04",
            "meeting_hours": "2",
            "completed_hours": "7",
            "complexity_factor": "1.5",
            "qa_factor": "0.8"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let record = &body["record"];
    assert_eq!(decimal_field(&record["available_hours"]), decimal("7"));
    assert_eq!(decimal_field(&record["raw_points"]), decimal("8.4"));
    assert_eq!(decimal_field(&record["approved_points"]), decimal("8.4"));
}

#[tokio::test]
async fn test_record_clamps_completed_hours() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP20250001",
            "date": "2025-08-05",
            "completed_hours": "20"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let record = &body["record"];
    assert_eq!(decimal_field(&record["completed_hours"]), decimal("16"));
    assert_eq!(decimal_field(&record["efficiency"]).round_dp(4), decimal("1.7778"));
    assert_eq!(decimal_field(&record["overtime_points"]), decimal("7"));
    assert_eq!(decimal_field(&record["approved_points"]), decimal("28.44"));

    let warnings = body["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "INPUT_CLAMPED");
    assert_eq!(warnings[0]["message"], "completed_hours clamped from 20 to 16");
}

#[tokio::test]
async fn test_record_failed_task_earns_nothing() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP20250001",
            "date": "2025-08-06",
            "completed_hours": "8",
            "task_failed": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["record"]["raw_points"]), decimal("8"));
    assert_eq!(decimal_field(&body["record"]["approved_points"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_record_leave_day() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP20250001",
            "date": "2025-08-07",
            "completed_hours": "0",
            "leave_taken": true
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["record"]["available_hours"]), Decimal::ZERO);
    assert_eq!(decimal_field(&body["record"]["efficiency"]), Decimal::ZERO);
    assert_eq!(decimal_field(&body["record"]["approved_points"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_record_same_date_twice_replaces() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;
    let body = post_performance(&router, "EMP20250001", "2025-08-01", "4.5").await;

    assert_eq!(body["outcome"], "updated");
    assert_eq!(decimal_field(&body["record"]["approved_points"]), decimal("2.25"));
}

// =============================================================================
// Monthly Compensation
// =============================================================================

#[tokio::test]
async fn test_full_month_compensation() {
    let router = create_router_for_test();
    for date in business_days(2025, 8).unwrap() {
        post_performance(&router, "EMP20250001", &date.to_string(), "9").await;
    }

    let (status, body) = get_json(router, "/employees/EMP20250001/compensation/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["employee_id"], "EMP20250001");
    assert_eq!(body["year"], 2025);
    assert_eq!(body["month"], 8);
    assert!(body["calculation_id"].as_str().is_some());

    let summary = &body["summary"];
    assert_eq!(summary["total_workdays"], 26);
    assert_eq!(decimal_field(&summary["total_points"]), decimal("234"));
    assert_eq!(decimal_field(&summary["avg_efficiency"]), decimal("1"));
    assert_eq!(decimal_field(&summary["max_possible_points"]), decimal("260"));
    assert_eq!(decimal_field(&summary["max_bonus_amount"]), decimal("25000"));
    assert_eq!(
        decimal_field(&summary["bonus_rate_per_point"]).round_dp(2),
        decimal("96.15")
    );
    assert_eq!(decimal_field(&summary["final_bonus"]), decimal("22500"));
    assert_eq!(decimal_field(&summary["total_compensation"]), decimal("72500"));

    assert_eq!(body["daily_records"].as_array().unwrap().len(), 26);
}

#[tokio::test]
async fn test_compensation_audit_trace() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;

    let (status, body) = get_json(router, "/employees/EMP20250001/compensation/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    let steps = body["audit_trace"]["steps"].as_array().unwrap();
    let rule_ids: Vec<&str> = steps.iter().map(|s| s["rule_id"].as_str().unwrap()).collect();
    assert_eq!(
        rule_ids,
        vec!["monthly_point_totals", "bonus_rate", "bonus_cap", "total_compensation"]
    );
    assert!(body["audit_trace"]["duration_us"].as_u64().is_some());
}

#[tokio::test]
async fn test_compensation_without_records() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/employees/EMP20250002/compensation/2025/8",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body["summary"]["final_bonus"]), Decimal::ZERO);
    assert_eq!(decimal_field(&body["summary"]["total_compensation"]), decimal("42000"));
    assert_eq!(body["audit_trace"]["warnings"][0]["code"], "NO_RECORDS");
}

#[tokio::test]
async fn test_compensation_recomputed_after_new_records() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;

    let (_, first) = get_json(router.clone(), "/employees/EMP20250001/compensation/2025/8").await;
    assert_eq!(decimal_field(&first["summary"]["total_points"]), decimal("9"));

    post_performance(&router, "EMP20250001", "2025-08-02", "4.5").await;

    let (_, second) = get_json(router, "/employees/EMP20250001/compensation/2025/8").await;
    assert_eq!(decimal_field(&second["summary"]["total_points"]), decimal("11.25"));
    assert_ne!(first["calculation_id"], second["calculation_id"]);
}

#[tokio::test]
async fn test_compensation_ignores_other_months() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-07-31", "9").await;
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;
    post_performance(&router, "EMP20250001", "2025-09-01", "9").await;

    let (_, body) = get_json(router, "/employees/EMP20250001/compensation/2025/8").await;
    assert_eq!(decimal_field(&body["summary"]["total_points"]), decimal("9"));
}

// =============================================================================
// Leaderboard
// =============================================================================

#[tokio::test]
async fn test_leaderboard_ranks_active_employees() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "4.5").await;
    post_performance(&router, "EMP20250002", "2025-08-01", "9").await;
    post_performance(&router, "EMP20250004", "2025-08-01", "16").await;

    let (status, body) = get_json(router, "/leaderboard/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    let entries = body["entries"].as_array().unwrap();
    let ids: Vec<&str> = entries
        .iter()
        .map(|e| e["employee_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["EMP20250002", "EMP20250001", "EMP20250003"]);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["grade"], "B+");
    assert_eq!(entries[0]["grade_description"], "Very Good");
    assert_eq!(decimal_field(&entries[0]["avg_efficiency_percent"]), decimal("100"));
    assert_eq!(entries[2]["work_days"], 0);
}

// =============================================================================
// Onboarding
// =============================================================================

#[tokio::test]
async fn test_onboard_employee() {
    let router = create_router_for_test();
    let (status, body) = post_json(
        router.clone(),
        "/employees",
        new_employee_body("nisha.patel@acme.test"),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "EMP20250005");
    assert_eq!(body["is_active"], true);

    let recorded = post_performance(&router, "EMP20250005", "2025-08-04", "9").await;
    assert_eq!(recorded["record"]["employee_id"], "EMP20250005");
}

#[tokio::test]
async fn test_onboard_duplicate_email() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/employees",
        new_employee_body("asha.rao@acme.test"),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_EMPLOYEE");
}

#[tokio::test]
async fn test_onboard_invalid_email() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/employees",
        new_employee_body("not-an-address"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Employee Updates
// =============================================================================

#[tokio::test]
async fn test_update_salary_changes_compensation() {
    let router = create_router_for_test();
    for date in business_days(2025, 8).unwrap() {
        post_performance(&router, "EMP20250001", &date.to_string(), "9").await;
    }

    let (status, body) = put_json(
        router.clone(),
        "/employees/EMP20250001",
        json!({"base_salary": "60000", "designation": "Staff Engineer", "performed_by": "hr.admin"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "unexpected body: {}", body);
    assert_eq!(decimal_field(&body["base_salary"]), decimal("60000"));
    assert_eq!(body["designation"], "Staff Engineer");
    assert_eq!(body["email"], "asha.rao@acme.test");

    let (_, compensation) = get_json(router, "/employees/EMP20250001/compensation/2025/8").await;
    let summary = &compensation["summary"];
    assert_eq!(decimal_field(&summary["final_bonus"]), decimal("27000"));
    assert_eq!(decimal_field(&summary["total_compensation"]), decimal("87000"));
}

#[tokio::test]
async fn test_update_unknown_employee() {
    let (status, body) = put_json(
        create_router_for_test(),
        "/employees/EMP99990001",
        json!({"designation": "Analyst"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_update_to_taken_email() {
    let (status, body) = put_json(
        create_router_for_test(),
        "/employees/EMP20250001",
        json!({"email": "ravi.kumar@acme.test"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_EMPLOYEE");
}

#[tokio::test]
async fn test_salary_above_ceiling_rejected() {
    let router = create_router_for_test();
    let (status, body) = put_json(
        router.clone(),
        "/employees/EMP20250001",
        json!({"base_salary": "1000000000000000000000000000"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let mut new_body = new_employee_body("nisha.patel@acme.test");
    new_body["base_salary"] = json!("1000000000000000000000000000");
    let (status, body) = post_json(router, "/employees", new_body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Analytics
// =============================================================================

#[tokio::test]
async fn test_department_performance() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;
    post_performance(&router, "EMP20250002", "2025-08-01", "4.5").await;
    post_performance(&router, "EMP20250004", "2025-08-01", "9").await;

    let (status, body) = get_json(router, "/analytics/departments/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    let departments = body["departments"].as_array().unwrap();
    let names: Vec<&str> = departments
        .iter()
        .map(|d| d["department"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Engineering", "Operations", "Product Management"]);

    assert_eq!(decimal_field(&departments[0]["avg_points"]), decimal("9"));
    assert_eq!(departments[0]["grade"], "A");
    assert_eq!(departments[1]["record_count"], 0);
    assert_eq!(departments[1]["grade"], "C");
    assert_eq!(decimal_field(&departments[2]["avg_points"]), decimal("2.2"));
    assert_eq!(decimal_field(&departments[2]["avg_efficiency_percent"]), decimal("50"));
}

#[tokio::test]
async fn test_performance_distribution() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;

    let (status, body) = get_json(router, "/analytics/distribution/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_employees"], 3);
    let buckets = body["buckets"].as_array().unwrap();
    let bands: Vec<&str> = buckets.iter().map(|b| b["band"].as_str().unwrap()).collect();
    assert_eq!(bands, vec!["top", "high", "average", "needs_support"]);
    let counts: Vec<u64> = buckets.iter().map(|b| b["count"].as_u64().unwrap()).collect();
    assert_eq!(counts, vec![0, 1, 2, 0]);
    assert_eq!(decimal_field(&buckets[1]["percent"]), decimal("33"));
    assert_eq!(decimal_field(&buckets[2]["percent"]), decimal("67"));
}

#[tokio::test]
async fn test_company_stats() {
    let router = create_router_for_test();
    for date in business_days(2025, 8).unwrap() {
        post_performance(&router, "EMP20250001", &date.to_string(), "9").await;
    }

    let (status, body) = get_json(router, "/analytics/company/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["year"], 2025);
    assert_eq!(body["total_employees"], 3);
    assert_eq!(decimal_field(&body["total_points"]), decimal("234"));
    assert_eq!(decimal_field(&body["total_hours"]), decimal("234"));
    assert_eq!(decimal_field(&body["total_projected_bonus"]), decimal("22500"));
    assert_eq!(decimal_field(&body["avg_points_per_employee"]), decimal("78"));
}

#[tokio::test]
async fn test_performance_trend() {
    let router = create_router_for_test();
    post_performance(&router, "EMP20250001", "2025-08-01", "9").await;

    let (status, body) = get_json(router, "/employees/EMP20250001/trend/2025-08-20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["end_date"], "2025-08-20");
    let points = body["points"].as_array().unwrap();
    assert_eq!(points.len(), 30);
    assert_eq!(points[0]["date"], "2025-07-22");
    assert_eq!(points[10]["date"], "2025-08-01");
    assert_eq!(decimal_field(&points[10]["approved_points"]), decimal("9"));
    assert_eq!(decimal_field(&points[11]["approved_points"]), Decimal::ZERO);
    assert_eq!(decimal_field(&points[29]["target"]), decimal("10"));
}

#[tokio::test]
async fn test_error_invalid_trend_date() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/employees/EMP20250001/trend/2025-02-30",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PATH");
}

#[tokio::test]
async fn test_error_analytics_invalid_month() {
    for uri in [
        "/analytics/departments/2025/13",
        "/analytics/distribution/2025/0",
        "/analytics/company/2025/13",
    ] {
        let (status, body) = get_json(create_router_for_test(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["code"], "INVALID_PERIOD", "{}", uri);
    }
}

// =============================================================================
// Business Days
// =============================================================================

#[tokio::test]
async fn test_business_days_august_2025() {
    let (status, body) = get_json(create_router_for_test(), "/business-days/2025/8").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 26);
    let dates: Vec<&str> = body["dates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d.as_str().unwrap())
        .collect();
    assert_eq!(dates[0], "2025-08-01");
    assert_eq!(dates[25], "2025-08-30");
    assert!(!dates.contains(&"2025-08-03"));
}

#[tokio::test]
async fn test_business_days_february_leap_year() {
    let (status, body) = get_json(create_router_for_test(), "/business-days/2024/2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 25);
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_error_unknown_employee_compensation() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/employees/EMP99990001/compensation/2025/8",
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
    assert!(body["message"].as_str().unwrap().contains("EMP99990001"));
}

#[tokio::test]
async fn test_error_unknown_employee_performance() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP99990001",
            "date": "2025-08-01",
            "completed_hours": "9"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_error_invalid_month() {
    let (status, body) = get_json(
        create_router_for_test(),
        "/employees/EMP20250001/compensation/2025/13",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");

    let (status, body) = get_json(create_router_for_test(), "/business-days/2025/0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PERIOD");

    let (status, _) = get_json(create_router_for_test(), "/leaderboard/2025/13").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_non_numeric_period() {
    let (status, body) = get_json(create_router_for_test(), "/leaderboard/2025/august").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_PATH");
}

#[tokio::test]
async fn test_error_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/performance")
                .header("Content-Type", "application/json")
                .body(Body::from("{invalid json}"))
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
async fn test_error_missing_completed_hours() {
    let (status, body) = post_json(
        create_router_for_test(),
        "/performance",
        json!({
            "employee_id": "EMP20250001",
            "date": "2025-08-01"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("missing field"));
}

#[tokio::test]
async fn test_error_invalid_employment_type() {
    let mut body = new_employee_body("nisha.patel@acme.test");
    body["employment_type"] = json!("freelance");

    let (status, error) = post_json(create_router_for_test(), "/employees", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "MALFORMED_JSON");
}
