//! Company analytics.
//!
//! Month-level views over many employees' records: a per-department
//! breakdown, the spread of employees across performance bands and company
//! totals. Also the per-day trend of a single employee's points.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{DailyRecord, Employee};

use super::bonus::DAILY_POINT_CEILING;
use super::monthly_aggregate::aggregate_month;
use super::performance_grade::PerformanceGrade;

/// Department name reported for employees without one.
pub const UNASSIGNED_DEPARTMENT: &str = "Unassigned";

/// Number of days covered by a performance trend.
pub const TREND_DAYS: u32 = 30;

/// One department's performance for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartmentPerformance {
    /// Department name.
    pub department: String,
    /// Employees in the department.
    pub employee_count: u32,
    /// Daily records the averages are taken over.
    pub record_count: u32,
    /// Mean approved points per record, rounded to 1 decimal place.
    pub avg_points: Decimal,
    /// Mean efficiency per record as a percentage, rounded to 1 decimal place.
    pub avg_efficiency_percent: Decimal,
    /// Grade for the unrounded average points.
    pub grade: PerformanceGrade,
}

/// Builds a per-department breakdown, ordered by department name.
///
/// Averages are taken over every record of the department's employees,
/// leave days included. A department whose employees have no records
/// averages zero.
pub fn department_performance(
    employees: &[(Employee, Vec<DailyRecord>)],
) -> Vec<DepartmentPerformance> {
    let mut departments: BTreeMap<&str, Vec<&(Employee, Vec<DailyRecord>)>> = BTreeMap::new();
    for row in employees {
        let name = row.0.department.as_deref().unwrap_or(UNASSIGNED_DEPARTMENT);
        departments.entry(name).or_default().push(row);
    }

    departments
        .into_iter()
        .map(|(name, rows)| {
            let records: Vec<&DailyRecord> = rows.iter().flat_map(|(_, r)| r.iter()).collect();
            let (avg_points, avg_efficiency) = if records.is_empty() {
                (Decimal::ZERO, Decimal::ZERO)
            } else {
                let count = Decimal::from(records.len());
                let points: Decimal = records.iter().map(|r| r.metrics().approved_points).sum();
                let efficiency: Decimal = records.iter().map(|r| r.metrics().efficiency).sum();
                (points / count, efficiency / count)
            };

            DepartmentPerformance {
                department: name.to_string(),
                employee_count: rows.len() as u32,
                record_count: records.len() as u32,
                avg_points: avg_points.round_dp(1),
                avg_efficiency_percent: (avg_efficiency * Decimal::ONE_HUNDRED).round_dp(1),
                grade: PerformanceGrade::for_department_average(avg_points),
            }
        })
        .collect()
}

/// A band of average daily points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    /// 10 or more points per work day.
    Top,
    /// 7 or more points per work day.
    High,
    /// 4 or more points per work day, or no work days recorded.
    Average,
    /// Below 4 points per work day.
    NeedsSupport,
}

impl PerformanceBand {
    /// All bands, best first.
    pub const ALL: [PerformanceBand; 4] = [Self::Top, Self::High, Self::Average, Self::NeedsSupport];

    /// Places an average of approved points per work day in a band.
    pub fn from_average_points(average: Decimal) -> Self {
        if average >= Decimal::new(10, 0) {
            Self::Top
        } else if average >= Decimal::new(7, 0) {
            Self::High
        } else if average >= Decimal::new(4, 0) {
            Self::Average
        } else {
            Self::NeedsSupport
        }
    }

    /// Display label for the band.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Top => "Top Performers",
            Self::High => "High Performers",
            Self::Average => "Average",
            Self::NeedsSupport => "Needs Support",
        }
    }
}

/// Employees in one band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionBucket {
    /// The band.
    pub band: PerformanceBand,
    /// Display label for the band.
    pub label: String,
    /// Employees in the band.
    pub count: u32,
    /// Share of all employees, rounded half-to-even to a whole percent.
    pub percent: Decimal,
}

/// Counts employees per band, best band first.
///
/// Bands use average points over work days (leave excluded). Employees
/// without any work day count as [`PerformanceBand::Average`]. With no
/// employees every count and percentage is zero.
pub fn performance_distribution(
    employees: &[(Employee, Vec<DailyRecord>)],
) -> Vec<DistributionBucket> {
    let mut counts: BTreeMap<usize, u32> = BTreeMap::new();
    for (_, records) in employees {
        let working: Vec<&DailyRecord> =
            records.iter().filter(|r| !r.input().leave_taken).collect();
        let band = if working.is_empty() {
            PerformanceBand::Average
        } else {
            let points: Decimal = working.iter().map(|r| r.metrics().approved_points).sum();
            PerformanceBand::from_average_points(points / Decimal::from(working.len()))
        };
        *counts.entry(band as usize).or_default() += 1;
    }

    let total = Decimal::from(employees.len());
    PerformanceBand::ALL
        .iter()
        .map(|band| {
            let count = counts.get(&(*band as usize)).copied().unwrap_or(0);
            let percent = if total.is_zero() {
                Decimal::ZERO
            } else {
                (Decimal::from(count) * Decimal::ONE_HUNDRED / total).round_dp(0)
            };
            DistributionBucket {
                band: *band,
                label: band.label().to_string(),
                count,
                percent,
            }
        })
        .collect()
}

/// Company-wide totals for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanyStats {
    /// Employees included.
    pub total_employees: u32,
    /// Sum of approved points.
    pub total_points: Decimal,
    /// Sum of completed hours.
    pub total_hours: Decimal,
    /// Sum of each employee's capped bonus at the points earned so far.
    pub total_projected_bonus: Decimal,
    /// Total points per employee, rounded to 2 decimal places.
    pub avg_points_per_employee: Decimal,
}

/// Totals points, hours and projected bonuses across employees.
pub fn company_stats(
    employees: &[(Employee, Vec<DailyRecord>)],
    business_day_count: u32,
) -> CompanyStats {
    let mut stats = CompanyStats {
        total_employees: employees.len() as u32,
        total_points: Decimal::ZERO,
        total_hours: Decimal::ZERO,
        total_projected_bonus: Decimal::ZERO,
        avg_points_per_employee: Decimal::ZERO,
    };

    for (employee, records) in employees {
        let summary = aggregate_month(employee.base_salary, records, business_day_count);
        stats.total_points += summary.total_points;
        stats.total_hours += summary.total_hours;
        stats.total_projected_bonus += summary.final_bonus;
    }

    if !employees.is_empty() {
        stats.avg_points_per_employee =
            (stats.total_points / Decimal::from(employees.len())).round_dp(2);
    }
    stats
}

/// One day on a performance trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    /// The day.
    pub date: NaiveDate,
    /// Approved points recorded for the day, zero if none.
    pub approved_points: Decimal,
    /// Nominal daily points.
    pub target: Decimal,
}

/// Returns the first day of a `days`-long window ending on `end`.
pub fn trend_window_start(end: NaiveDate, days: u32) -> NaiveDate {
    end.checked_sub_days(Days::new(u64::from(days.saturating_sub(1))))
        .unwrap_or(NaiveDate::MIN)
}

/// Lays an employee's records out over the `days` days ending on `end`.
///
/// Every day in the window gets a point; days without a record show zero.
///
/// # Examples
///
/// ```
/// use performance_engine::calculation::performance_trend;
/// use chrono::NaiveDate;
///
/// let end = NaiveDate::from_ymd_opt(2025, 8, 31).unwrap();
/// let trend = performance_trend(&[], end, 30);
///
/// assert_eq!(trend.len(), 30);
/// assert_eq!(trend[0].date, NaiveDate::from_ymd_opt(2025, 8, 2).unwrap());
/// assert_eq!(trend[29].date, end);
/// ```
pub fn performance_trend(records: &[DailyRecord], end: NaiveDate, days: u32) -> Vec<TrendPoint> {
    if days == 0 {
        return Vec::new();
    }

    let points: BTreeMap<NaiveDate, Decimal> = records
        .iter()
        .map(|r| (r.date(), r.metrics().approved_points))
        .collect();

    trend_window_start(end, days)
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| TrendPoint {
            date,
            approved_points: points.get(&date).copied().unwrap_or(Decimal::ZERO),
            target: DAILY_POINT_CEILING,
        })
        .collect()
}
