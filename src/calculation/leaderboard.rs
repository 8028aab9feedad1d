//! Monthly leaderboard.
//!
//! Ranks employees by the approved points they earned in a month.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DailyRecord, Employee};

use super::performance_grade::PerformanceGrade;

/// One employee's row on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// Position on the board, starting at 1.
    pub rank: u32,
    /// The employee code.
    pub employee_id: String,
    /// The employee's name.
    pub name: String,
    /// The employee's department, if any.
    pub department: Option<String>,
    /// Sum of approved points, rounded to 2 decimal places.
    pub total_points: Decimal,
    /// Number of records that were not leave.
    pub work_days: u32,
    /// Mean efficiency over work days as a percentage, rounded to 1 decimal place.
    pub avg_efficiency_percent: Decimal,
    /// Approved points per work day, rounded to 2 decimal places.
    pub avg_points_per_day: Decimal,
    /// Grade for the average points per work day.
    pub grade: PerformanceGrade,
    /// Description of the grade.
    pub grade_description: String,
    /// Sum of completed hours.
    pub total_hours: Decimal,
    /// Days whose task failed quality review.
    pub task_failures: u32,
    /// Days with hours completed beyond the assigned hours.
    pub overtime_days: u32,
}

/// Builds a ranked leaderboard from each employee's records for a month.
///
/// Entries are ordered by `total_points` descending. Employees with equal
/// points keep employee id order.
pub fn build_leaderboard(employees: Vec<(Employee, Vec<DailyRecord>)>) -> Vec<LeaderboardEntry> {
    let mut employees = employees;
    employees.sort_by(|(a, _), (b, _)| a.id.cmp(&b.id));

    let mut entries: Vec<LeaderboardEntry> = employees
        .into_iter()
        .map(|(employee, records)| entry_for(employee, &records))
        .collect();

    entries.sort_by(|a, b| b.total_points.cmp(&a.total_points));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
    entries
}

fn entry_for(employee: Employee, records: &[DailyRecord]) -> LeaderboardEntry {
    let total_points: Decimal = records.iter().map(|r| r.metrics().approved_points).sum();
    let total_hours: Decimal = records.iter().map(|r| r.input().completed_hours).sum();

    let working: Vec<&DailyRecord> = records.iter().filter(|r| !r.input().leave_taken).collect();
    let work_days = working.len() as u32;

    let (avg_efficiency, avg_points) = if working.is_empty() {
        (Decimal::ZERO, Decimal::ZERO)
    } else {
        let days = Decimal::from(work_days);
        let efficiency: Decimal = working.iter().map(|r| r.metrics().efficiency).sum();
        (efficiency / days, total_points / days)
    };
    let grade = PerformanceGrade::from_average_points(avg_points);

    LeaderboardEntry {
        rank: 0,
        employee_id: employee.id,
        name: employee.name,
        department: employee.department,
        total_points: total_points.round_dp(2),
        work_days,
        avg_efficiency_percent: (avg_efficiency * Decimal::ONE_HUNDRED).round_dp(1),
        avg_points_per_day: avg_points.round_dp(2),
        grade,
        grade_description: grade.description().to_string(),
        total_hours,
        task_failures: records.iter().filter(|r| r.input().task_failed).count() as u32,
        overtime_days: records
            .iter()
            .filter(|r| r.metrics().overtime_points > Decimal::ZERO)
            .count() as u32,
    }
}
