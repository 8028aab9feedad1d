//! Employee model and related types.
//!
//! Only [`Employee::base_salary`] feeds the bonus calculation; the remaining
//! profile fields are carried for lookups, onboarding, updates and analytics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    /// Full-time employment.
    #[default]
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship.
    Intern,
}

/// Represents an employee whose performance is tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Employee code, e.g. "EMP20250001".
    pub id: String,
    /// Full name.
    pub name: String,
    /// Work e-mail address, unique across employees.
    pub email: String,
    /// Job title.
    pub designation: String,
    /// Department name, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// Monthly base salary; the bonus is capped at half of it.
    pub base_salary: Decimal,
    /// The date the employee joined.
    pub join_date: NaiveDate,
    /// Name of the reporting manager, if any.
    #[serde(default)]
    pub reporting_manager: Option<String>,
    /// The type of employment arrangement.
    #[serde(default)]
    pub employment_type: EmploymentType,
    /// Inactive employees are excluded from the leaderboard.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// The profile supplied when onboarding an employee.
///
/// The employee code is assigned by the service, see
/// [`PerformanceService::onboard_employee`](crate::service::PerformanceService::onboard_employee).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEmployee {
    /// Full name.
    pub name: String,
    /// Work e-mail address, unique across employees.
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
    /// Name of the reporting manager, if any.
    #[serde(default)]
    pub reporting_manager: Option<String>,
    /// Employment arrangement.
    #[serde(default)]
    pub employment_type: EmploymentType,
}

impl NewEmployee {
    /// Builds an active employee with the given code.
    pub fn into_employee(self, id: impl Into<String>) -> Employee {
        Employee {
            id: id.into(),
            name: self.name,
            email: self.email,
            designation: self.designation,
            department: self.department,
            base_salary: self.base_salary,
            join_date: self.join_date,
            reporting_manager: self.reporting_manager,
            employment_type: self.employment_type,
            is_active: true,
        }
    }
}

/// A partial profile change. Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeUpdate {
    /// New full name.
    pub name: Option<String>,
    /// New work e-mail address.
    pub email: Option<String>,
    /// New job title.
    pub designation: Option<String>,
    /// New department.
    pub department: Option<String>,
    /// New monthly base salary; later compensation runs use it.
    pub base_salary: Option<Decimal>,
    /// New reporting manager.
    pub reporting_manager: Option<String>,
    /// New employment arrangement.
    pub employment_type: Option<EmploymentType>,
    /// Activates or deactivates the employee.
    pub is_active: Option<bool>,
}

impl EmployeeUpdate {
    /// Writes the supplied fields onto `employee`.
    pub fn apply_to(self, employee: &mut Employee) {
        if let Some(name) = self.name {
            employee.name = name;
        }
        if let Some(email) = self.email {
            employee.email = email;
        }
        if let Some(designation) = self.designation {
            employee.designation = designation;
        }
        if let Some(department) = self.department {
            employee.department = Some(department);
        }
        if let Some(base_salary) = self.base_salary {
            employee.base_salary = base_salary;
        }
        if let Some(manager) = self.reporting_manager {
            employee.reporting_manager = Some(manager);
        }
        if let Some(employment_type) = self.employment_type {
            employee.employment_type = employment_type;
        }
        if let Some(is_active) = self.is_active {
            employee.is_active = is_active;
        }
    }
}
