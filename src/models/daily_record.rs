//! Daily performance record model.
//!
//! A [`DailyRecord`] pairs the raw inputs an employee logs for one date with
//! the metrics derived from them. The derived metrics are private and only
//! ever produced by the daily metric calculator, so a record can never carry
//! metrics that disagree with its inputs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::compute_daily_metrics;

/// The raw inputs logged for one employee on one date.
///
/// Values are expected to be inside their documented ranges; callers clamp
/// them with [`clamp_daily_input`](crate::calculation::clamp_daily_input)
/// before building a record.
///
/// # Example
///
/// ```
/// use performance_engine::models::DailyInput;
/// use rust_decimal::Decimal;
///
/// let input = DailyInput {
///     completed_hours: Decimal::new(8, 0),
///     ..DailyInput::default()
/// };
/// assert_eq!(input.assigned_hours, Decimal::new(9, 0));
/// assert_eq!(input.complexity_factor, Decimal::ONE);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyInput {
    /// Hours spent in meetings, in [0, 9].
    pub meeting_hours: Decimal,
    /// Hours of work assigned for the day, in [1, 12].
    pub assigned_hours: Decimal,
    /// Hours of work actually completed, in [0, 16].
    pub completed_hours: Decimal,
    /// Task complexity multiplier, in [0.5, 3.0].
    pub complexity_factor: Decimal,
    /// Quality assurance multiplier, in [0.3, 2.0].
    pub qa_factor: Decimal,
    /// Whether the day's task failed quality review.
    pub task_failed: bool,
    /// Whether the employee was on leave.
    pub leave_taken: bool,
}

impl Default for DailyInput {
    fn default() -> Self {
        Self {
            meeting_hours: Decimal::ZERO,
            assigned_hours: Decimal::new(9, 0),
            completed_hours: Decimal::ZERO,
            complexity_factor: Decimal::ONE,
            qa_factor: Decimal::ONE,
            task_failed: false,
            leave_taken: false,
        }
    }
}

/// Metrics derived from a [`DailyInput`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetrics {
    /// Hours available for task work after meetings (0 on leave).
    pub available_hours: Decimal,
    /// Completed over available hours, capped at 2.0.
    pub efficiency: Decimal,
    /// Completed hours weighted by complexity and QA factors.
    pub raw_points: Decimal,
    /// Hours completed beyond the assigned hours. Informational only.
    pub overtime_points: Decimal,
    /// Quality-gated, efficiency-weighted points used for the bonus.
    pub approved_points: Decimal,
}

/// A day of performance data for one employee.
///
/// Unique on `(employee_id, date)`.
///
/// # Example
///
/// ```
/// use performance_engine::models::{DailyInput, DailyRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let record = DailyRecord::new(
///     "EMP20250001",
///     NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
///     DailyInput {
///         completed_hours: Decimal::new(9, 0),
///         ..DailyInput::default()
///     },
/// );
/// assert_eq!(record.metrics().approved_points, Decimal::new(9, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRecord {
    employee_id: String,
    date: NaiveDate,
    #[serde(flatten)]
    input: DailyInput,
    #[serde(flatten)]
    metrics: DailyMetrics,
}

impl DailyRecord {
    /// Creates a record, deriving its metrics from `input`.
    pub fn new(employee_id: impl Into<String>, date: NaiveDate, input: DailyInput) -> Self {
        let metrics = compute_daily_metrics(&input);
        Self {
            employee_id: employee_id.into(),
            date,
            input,
            metrics,
        }
    }

    /// Returns a copy of this record with new inputs and freshly derived metrics.
    pub fn with_input(&self, input: DailyInput) -> Self {
        Self::new(self.employee_id.clone(), self.date, input)
    }

    /// The employee this record belongs to.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// The calendar date of this record.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The raw inputs.
    pub fn input(&self) -> &DailyInput {
        &self.input
    }

    /// The derived metrics.
    pub fn metrics(&self) -> &DailyMetrics {
        &self.metrics
    }
}
