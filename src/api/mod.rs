//! HTTP API module for the performance engine.
//!
//! This module provides the REST API endpoints for recording daily
//! performance, computing monthly compensation, ranking employees, company
//! analytics, and onboarding and updating employees.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{EmployeeRequest, EmployeeUpdateRequest, PerformanceRequest};
pub use response::{
    ApiError, ApiErrorResponse, BusinessDaysResponse, CompanyStatsResponse,
    DepartmentPerformanceResponse, DistributionResponse, LeaderboardResponse, PerformanceResponse,
    TrendResponse,
};
pub use state::AppState;
