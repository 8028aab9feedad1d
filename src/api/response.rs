//! Response types for the performance engine API.
//!
//! This module defines the success bodies that are not plain domain models,
//! the error response structures and the mapping from [`EngineError`] to
//! HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calculation::{
    CompanyStats, DepartmentPerformance, DistributionBucket, LeaderboardEntry, TrendPoint,
};
use crate::error::EngineError;
use crate::models::{AuditWarning, DailyRecord};
use crate::store::UpsertOutcome;

/// Body returned by `POST /performance`.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceResponse {
    /// The stored record with its derived metrics.
    pub record: DailyRecord,
    /// Whether the record was created or replaced an earlier one.
    pub outcome: UpsertOutcome,
    /// Warnings for inputs that were clamped into range.
    pub warnings: Vec<AuditWarning>,
}

/// Body returned by `GET /leaderboard/:year/:month`.
#[derive(Debug, Clone, Serialize)]
pub struct LeaderboardResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Ranked entries.
    pub entries: Vec<LeaderboardEntry>,
}

/// Body returned by `GET /business-days/:year/:month`.
#[derive(Debug, Clone, Serialize)]
pub struct BusinessDaysResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Number of business days.
    pub count: u32,
    /// The business days in ascending order.
    pub dates: Vec<NaiveDate>,
}

/// Body returned by `GET /analytics/departments/:year/:month`.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentPerformanceResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// One row per department, ordered by name.
    pub departments: Vec<DepartmentPerformance>,
}

/// Body returned by `GET /analytics/distribution/:year/:month`.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Active employees counted.
    pub total_employees: u32,
    /// Buckets from the best band down.
    pub buckets: Vec<DistributionBucket>,
}

/// Body returned by `GET /analytics/company/:year/:month`.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyStatsResponse {
    /// Calendar year.
    pub year: i32,
    /// Calendar month.
    pub month: u32,
    /// Company totals.
    #[serde(flatten)]
    pub stats: CompanyStats,
}

/// Body returned by `GET /employees/:employee_id/trend/:end_date`.
#[derive(Debug, Clone, Serialize)]
pub struct TrendResponse {
    /// The employee code.
    pub employee_id: String,
    /// Last day of the trend.
    pub end_date: NaiveDate,
    /// One point per day, oldest first.
    pub points: Vec<TrendPoint>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an employee not found error response.
    pub fn employee_not_found(employee_id: &str) -> Self {
        Self::with_details(
            "EMPLOYEE_NOT_FOUND",
            format!("Employee not found: {}", employee_id),
            format!("No employee is registered with code '{}'", employee_id),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response carrying `error`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::employee_not_found(&employee_id),
            },
            EngineError::DuplicateEmployee { field, value } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::with_details(
                    "DUPLICATE_EMPLOYEE",
                    format!("Employee already exists with {} '{}'", field, value),
                    format!("The {} must be unique across employees", field),
                ),
            },
            EngineError::InvalidPeriod { year, month } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PERIOD",
                    format!("Invalid period: year {}, month {}", year, month),
                    "Month must be between 1 and 12",
                ),
            },
            EngineError::InvalidInput { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid input field '{}': {}", field, message),
                    "The request contains invalid information",
                ),
            },
            EngineError::StorageError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("STORAGE_ERROR", "Storage failure", message),
            },
            EngineError::CalculationError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CALCULATION_ERROR",
                    "Calculation failed",
                    message,
                ),
            },
        }
    }
}
