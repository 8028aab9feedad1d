//! Request types for the performance engine API.
//!
//! This module defines the JSON request bodies for `POST /performance`,
//! `POST /employees` and `PUT /employees/:employee_id`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{DailyInput, EmployeeUpdate, EmploymentType, NewEmployee};

fn default_performed_by() -> String {
    "system".to_string()
}

/// Request body for the `POST /performance` endpoint.
///
/// Only `employee_id`, `date` and `completed_hours` are required; the other
/// inputs fall back to their documented defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceRequest {
    /// The employee code.
    pub employee_id: String,
    /// The date the performance applies to.
    pub date: NaiveDate,
    /// Hours of work completed.
    pub completed_hours: Decimal,
    /// Hours spent in meetings.
    #[serde(default)]
    pub meeting_hours: Option<Decimal>,
    /// Hours of work assigned.
    #[serde(default)]
    pub assigned_hours: Option<Decimal>,
    /// Task complexity multiplier.
    #[serde(default)]
    pub complexity_factor: Option<Decimal>,
    /// Quality assurance multiplier.
    #[serde(default)]
    pub qa_factor: Option<Decimal>,
    /// Whether the task failed quality review.
    #[serde(default)]
    pub task_failed: bool,
    /// Whether the employee was on leave.
    #[serde(default)]
    pub leave_taken: bool,
    /// Who is recording the performance.
    #[serde(default = "default_performed_by")]
    pub performed_by: String,
}

impl PerformanceRequest {
    /// Returns the raw daily input, with defaults applied to omitted fields.
    pub fn to_input(&self) -> DailyInput {
        let defaults = DailyInput::default();
        DailyInput {
            meeting_hours: self.meeting_hours.unwrap_or(defaults.meeting_hours),
            assigned_hours: self.assigned_hours.unwrap_or(defaults.assigned_hours),
            completed_hours: self.completed_hours,
            complexity_factor: self.complexity_factor.unwrap_or(defaults.complexity_factor),
            qa_factor: self.qa_factor.unwrap_or(defaults.qa_factor),
            task_failed: self.task_failed,
            leave_taken: self.leave_taken,
        }
    }
}

/// Request body for the `POST /employees` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Full name.
    pub name: String,
    /// Work e-mail address.
    pub email: String,
    /// Job title.
    pub designation: String,
    /// Department, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Date the employee joined.
    pub join_date: NaiveDate,
    /// Name of the reporting manager.
    #[serde(default)]
    pub reporting_manager: Option<String>,
    /// Employment arrangement.
    #[serde(default)]
    pub employment_type: EmploymentType,
    /// Who is onboarding the employee.
    #[serde(default = "default_performed_by")]
    pub performed_by: String,
}

impl From<EmployeeRequest> for NewEmployee {
    fn from(req: EmployeeRequest) -> Self {
        NewEmployee {
            name: req.name,
            email: req.email,
            designation: req.designation,
            department: req.department,
            base_salary: req.base_salary,
            join_date: req.join_date,
            reporting_manager: req.reporting_manager,
            employment_type: req.employment_type,
        }
    }
}

/// Request body for the `PUT /employees/:employee_id` endpoint.
///
/// Every profile field is optional; omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdateRequest {
    /// New full name.
    #[serde(default)]
    pub name: Option<String>,
    /// New work e-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// New job title.
    #[serde(default)]
    pub designation: Option<String>,
    /// New department.
    #[serde(default)]
    pub department: Option<String>,
    /// New monthly base salary.
    #[serde(default)]
    pub base_salary: Option<Decimal>,
    /// New reporting manager.
    #[serde(default)]
    pub reporting_manager: Option<String>,
    /// New employment arrangement.
    #[serde(default)]
    pub employment_type: Option<EmploymentType>,
    /// Activates or deactivates the employee.
    #[serde(default)]
    pub is_active: Option<bool>,
    /// Who is making the change.
    #[serde(default = "default_performed_by")]
    pub performed_by: String,
}

impl From<EmployeeUpdateRequest> for EmployeeUpdate {
    fn from(req: EmployeeUpdateRequest) -> Self {
        EmployeeUpdate {
            name: req.name,
            email: req.email,
            designation: req.designation,
            department: req.department,
            base_salary: req.base_salary,
            reporting_manager: req.reporting_manager,
            employment_type: req.employment_type,
            is_active: req.is_active,
        }
    }
}
