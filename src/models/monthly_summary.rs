//! Monthly summary model.
//!
//! A [`MonthlySummary`] is a materialized view over one employee's daily
//! records for a calendar month. It is recomputed and overwritten whenever it
//! is requested, never patched in place.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifies the summary of one employee for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SummaryKey {
    /// The employee the summary belongs to.
    pub employee_id: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
}

impl SummaryKey {
    /// Creates a new summary key.
    pub fn new(employee_id: impl Into<String>, year: i32, month: u32) -> Self {
        Self {
            employee_id: employee_id.into(),
            year,
            month,
        }
    }
}

impl std::fmt::Display for SummaryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}-{:02}", self.employee_id, self.year, self.month)
    }
}

/// Monthly totals, averages and compensation for one employee.
///
/// # Example
///
/// ```
/// use performance_engine::calculation::aggregate_month;
/// use rust_decimal::Decimal;
///
/// let summary = aggregate_month(Decimal::new(50000, 0), &[], 26);
/// assert_eq!(summary.total_workdays, 26);
/// assert_eq!(summary.final_bonus, Decimal::ZERO);
/// assert_eq!(summary.total_compensation, Decimal::new(50000, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Number of business days in the month.
    pub total_workdays: u32,
    /// Sum of approved points over all records.
    pub total_points: Decimal,
    /// Mean efficiency over records where no leave was taken.
    pub avg_efficiency: Decimal,
    /// Sum of completed hours.
    pub total_hours: Decimal,
    /// Number of records with a failed task.
    pub task_failures: u32,
    /// Number of records with leave taken.
    pub leave_days: u32,
    /// Number of records with positive overtime points.
    pub overtime_days: u32,
    /// The base salary used for this calculation.
    pub base_salary: Decimal,
    /// Business days times the nominal daily point ceiling.
    pub max_possible_points: Decimal,
    /// The bonus ceiling, half of the base salary.
    pub max_bonus_amount: Decimal,
    /// Currency paid per approved point.
    pub bonus_rate_per_point: Decimal,
    /// Bonus before the ceiling is applied.
    pub calculated_bonus: Decimal,
    /// Bonus after the ceiling is applied.
    pub final_bonus: Decimal,
    /// Base salary plus final bonus.
    pub total_compensation: Decimal,
}
