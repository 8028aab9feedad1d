//! HTTP request handlers for the performance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::business_days;
use crate::error::EngineError;

use super::request::{EmployeeRequest, EmployeeUpdateRequest, PerformanceRequest};
use super::response::{
    ApiError, ApiErrorResponse, BusinessDaysResponse, CompanyStatsResponse,
    DepartmentPerformanceResponse, DistributionResponse, LeaderboardResponse, PerformanceResponse,
    TrendResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/performance", post(record_performance_handler))
        .route(
            "/employees/:employee_id/compensation/:year/:month",
            get(compensation_handler),
        )
        .route("/employees", post(onboard_employee_handler))
        .route("/employees/:employee_id", put(update_employee_handler))
        .route(
            "/employees/:employee_id/trend/:end_date",
            get(performance_trend_handler),
        )
        .route("/leaderboard/:year/:month", get(leaderboard_handler))
        .route(
            "/analytics/departments/:year/:month",
            get(department_performance_handler),
        )
        .route(
            "/analytics/distribution/:year/:month",
            get(performance_distribution_handler),
        )
        .route("/analytics/company/:year/:month", get(company_stats_handler))
        .route("/business-days/:year/:month", get(business_days_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    error_response(err.into())
}

/// Maps a JSON body rejection to a 400 response body.
fn json_rejection_error(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error)
}

fn path_rejection_error(correlation_id: Uuid, rejection: PathRejection) -> ApiErrorResponse {
    let message = rejection.body_text();
    warn!(
        correlation_id = %correlation_id,
        error = %message,
        "Invalid path parameters"
    );
    ApiErrorResponse::bad_request(ApiError::with_details(
        "INVALID_PATH",
        "Invalid path parameters",
        message,
    ))
}

/// Handler for POST /performance.
///
/// Records one day of performance for an employee, clamping inputs into range.
async fn record_performance_handler(
    State(state): State<AppState>,
    payload: Result<Json<PerformanceRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing performance update");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let start_time = Instant::now();
    match state.service().record_daily_performance(
        &request.employee_id,
        request.date,
        request.to_input(),
        &request.performed_by,
    ) {
        Ok(recorded) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                approved_points = %recorded.record.metrics().approved_points,
                warnings = recorded.warnings.len(),
                duration_us = start_time.elapsed().as_micros(),
                "Performance recorded"
            );
            json_response(
                StatusCode::OK,
                PerformanceResponse {
                    record: recorded.record,
                    outcome: recorded.outcome,
                    warnings: recorded.warnings,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:employee_id/compensation/:year/:month.
///
/// Recomputes the employee's monthly summary and returns it with its audit trace.
async fn compensation_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (employee_id, year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        year,
        month,
        "Processing compensation request"
    );

    match state.service().monthly_compensation(&employee_id, year, month) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                calculation_id = %result.calculation_id,
                employee_id = %employee_id,
                total_points = %result.summary.total_points,
                final_bonus = %result.summary.final_bonus,
                duration_us = result.audit_trace.duration_us,
                "Compensation calculated"
            );
            json_response(StatusCode::OK, result)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /leaderboard/:year/:month.
async fn leaderboard_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(correlation_id = %correlation_id, year, month, "Processing leaderboard request");

    match state.service().leaderboard(year, month) {
        Ok(entries) => json_response(
            StatusCode::OK,
            LeaderboardResponse {
                year,
                month,
                entries,
            },
        ),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /employees.
///
/// Onboards an employee and responds with 201 and the assigned employee code.
async fn onboard_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<EmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee onboarding");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let performed_by = request.performed_by.clone();
    match state.service().onboard_employee(request.into(), &performed_by) {
        Ok(employee) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                "Employee onboarded"
            );
            json_response(StatusCode::CREATED, employee)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PUT /employees/:employee_id.
///
/// Applies a partial profile change and responds with the updated employee.
async fn update_employee_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    payload: Result<Json<EmployeeUpdateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let employee_id = match path {
        Ok(Path(id)) => id,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(correlation_id = %correlation_id, employee_id = %employee_id, "Processing employee update");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return error_response(json_rejection_error(correlation_id, rejection)),
    };

    let performed_by = request.performed_by.clone();
    match state
        .service()
        .update_employee(&employee_id, request.into(), &performed_by)
    {
        Ok(employee) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %employee.id,
                "Employee updated"
            );
            json_response(StatusCode::OK, employee)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:employee_id/trend/:end_date.
async fn performance_trend_handler(
    State(state): State<AppState>,
    path: Result<Path<(String, NaiveDate)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (employee_id, end_date) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee_id,
        end_date = %end_date,
        "Processing performance trend request"
    );

    match state.service().performance_trend(&employee_id, end_date) {
        Ok(points) => json_response(
            StatusCode::OK,
            TrendResponse {
                employee_id,
                end_date,
                points,
            },
        ),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /analytics/departments/:year/:month.
async fn department_performance_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(correlation_id = %correlation_id, year, month, "Processing department analytics request");

    match state.service().department_performance(year, month) {
        Ok(departments) => json_response(
            StatusCode::OK,
            DepartmentPerformanceResponse {
                year,
                month,
                departments,
            },
        ),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /analytics/distribution/:year/:month.
async fn performance_distribution_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(correlation_id = %correlation_id, year, month, "Processing distribution request");

    match state.service().performance_distribution(year, month) {
        Ok(buckets) => json_response(
            StatusCode::OK,
            DistributionResponse {
                year,
                month,
                total_employees: buckets.iter().map(|b| b.count).sum(),
                buckets,
            },
        ),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /analytics/company/:year/:month.
async fn company_stats_handler(
    State(state): State<AppState>,
    path: Result<Path<(i32, u32)>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let (year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };
    info!(correlation_id = %correlation_id, year, month, "Processing company stats request");

    match state.service().company_stats(year, month) {
        Ok(stats) => json_response(StatusCode::OK, CompanyStatsResponse { year, month, stats }),
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /business-days/:year/:month.
async fn business_days_handler(path: Result<Path<(i32, u32)>, PathRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let (year, month) = match path {
        Ok(Path(params)) => params,
        Err(rejection) => return error_response(path_rejection_error(correlation_id, rejection)),
    };

    match business_days(year, month) {
        Ok(days) => {
            let dates: Vec<_> = days.collect();
            json_response(
                StatusCode::OK,
                BusinessDaysResponse {
                    year,
                    month,
                    count: dates.len() as u32,
                    dates,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}
