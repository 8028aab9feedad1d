//! Compensation result models.
//!
//! This module contains the [`CompensationResult`] returned when a monthly
//! summary is (re)computed, together with the audit types that record how each
//! figure was derived.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{DailyRecord, MonthlySummary};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use performance_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "monthly_point_totals".to_string(),
///     rule_name: "Monthly Point Totals".to_string(),
///     formula: "total_points = sum(approved_points)".to_string(),
///     input: serde_json::json!({"records": 26}),
///     output: serde_json::json!({"total_points": "234"}),
///     reasoning: "26 records contributed 234 approved points".to_string(),
/// };
/// assert_eq!(step.rule_id, "monthly_point_totals");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The formula the rule evaluates.
    pub formula: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while accepting input or calculating.
///
/// Warnings never stop a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The result of computing one employee's compensation for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompensationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The employee the calculation is for.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    /// The persisted monthly summary.
    pub summary: MonthlySummary,
    /// The daily records the summary was built from, ordered by date.
    pub daily_records: Vec<DailyRecord>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
