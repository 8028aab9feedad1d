//! Core data models for the Performance and Bonus Engine.
//!
//! This module contains the domain models shared by the calculation engine,
//! the store and the HTTP API.

mod compensation_result;
mod daily_record;
mod employee;
mod monthly_summary;

pub use compensation_result::{AuditStep, AuditTrace, AuditWarning, CompensationResult};
pub use daily_record::{DailyInput, DailyMetrics, DailyRecord};
pub use employee::{Employee, EmployeeUpdate, EmploymentType, NewEmployee};
pub use monthly_summary::{MonthlySummary, SummaryKey};
