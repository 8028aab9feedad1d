//! Monthly aggregation.
//!
//! Folds one employee's daily records for a calendar month into a
//! [`MonthlySummary`]: point and hour totals, average efficiency on working
//! days, failure/leave/overtime counts, and the bonus figures from
//! [`calculate_bonus`].

use rust_decimal::Decimal;

use crate::models::{AuditStep, DailyRecord, MonthlySummary};

use super::bonus::calculate_bonus;

/// The result of aggregating a month, including audit steps.
#[derive(Debug, Clone)]
pub struct MonthlyAggregation {
    /// The aggregated summary.
    pub summary: MonthlySummary,
    /// Audit steps for the totals and bonus stages, numbered from 1.
    pub audit_steps: Vec<AuditStep>,
}

/// Aggregates a month of daily records into a summary.
///
/// The records are expected to belong to one employee and one calendar
/// month; this function does not filter them. Calling it twice with the same
/// arguments yields identical summaries.
///
/// # Examples
///
/// ```
/// use performance_engine::calculation::aggregate_month;
/// use performance_engine::models::{DailyInput, DailyRecord};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let records: Vec<DailyRecord> = (1..=3)
///     .map(|day| {
///         DailyRecord::new(
///             "EMP20250001",
///             NaiveDate::from_ymd_opt(2025, 8, day).unwrap(),
///             DailyInput { completed_hours: Decimal::new(9, 0), ..DailyInput::default() },
///         )
///     })
///     .collect();
///
/// let summary = aggregate_month(Decimal::new(50000, 0), &records, 26);
/// assert_eq!(summary.total_points, Decimal::new(27, 0));
/// assert_eq!(summary.avg_efficiency, Decimal::ONE);
/// ```
pub fn aggregate_month(
    base_salary: Decimal,
    records: &[DailyRecord],
    business_day_count: u32,
) -> MonthlySummary {
    aggregate_month_with_audit(base_salary, records, business_day_count).summary
}

/// Aggregates a month of daily records and records how each figure was reached.
pub fn aggregate_month_with_audit(
    base_salary: Decimal,
    records: &[DailyRecord],
    business_day_count: u32,
) -> MonthlyAggregation {
    let total_points: Decimal = records.iter().map(|r| r.metrics().approved_points).sum();
    let total_hours: Decimal = records.iter().map(|r| r.input().completed_hours).sum();

    let working: Vec<&DailyRecord> = records.iter().filter(|r| !r.input().leave_taken).collect();
    let avg_efficiency = if working.is_empty() {
        Decimal::ZERO
    } else {
        let sum: Decimal = working.iter().map(|r| r.metrics().efficiency).sum();
        sum / Decimal::from(working.len())
    };

    let task_failures = count(records, |r| r.input().task_failed);
    let leave_days = count(records, |r| r.input().leave_taken);
    let overtime_days = count(records, |r| r.metrics().overtime_points > Decimal::ZERO);

    let totals_step = AuditStep {
        step_number: 1,
        rule_id: "monthly_point_totals".to_string(),
        rule_name: "Monthly Point Totals".to_string(),
        formula: "total_points = sum(approved_points); avg_efficiency = mean(efficiency where no leave)"
            .to_string(),
        input: serde_json::json!({
            "records": records.len(),
            "working_records": working.len(),
        }),
        output: serde_json::json!({
            "total_points": total_points.normalize().to_string(),
            "total_hours": total_hours.normalize().to_string(),
            "avg_efficiency": avg_efficiency.round_dp(4).normalize().to_string(),
            "task_failures": task_failures,
            "leave_days": leave_days,
            "overtime_days": overtime_days,
        }),
        reasoning: format!(
            "{} records ({} working, {} leave, {} failed) contributed {} approved points",
            records.len(),
            working.len(),
            leave_days,
            task_failures,
            total_points.normalize()
        ),
    };

    let bonus_result = calculate_bonus(base_salary, total_points, business_day_count, 2);
    let bonus = bonus_result.bonus;

    let mut audit_steps = Vec::with_capacity(1 + bonus_result.audit_steps.len());
    audit_steps.push(totals_step);
    audit_steps.extend(bonus_result.audit_steps);

    MonthlyAggregation {
        summary: MonthlySummary {
            total_workdays: business_day_count,
            total_points,
            avg_efficiency,
            total_hours,
            task_failures,
            leave_days,
            overtime_days,
            base_salary,
            max_possible_points: bonus.max_possible_points,
            max_bonus_amount: bonus.max_bonus_amount,
            bonus_rate_per_point: bonus.bonus_rate_per_point,
            calculated_bonus: bonus.calculated_bonus,
            final_bonus: bonus.final_bonus,
            total_compensation: bonus.total_compensation,
        },
        audit_steps,
    }
}

fn count(records: &[DailyRecord], predicate: impl Fn(&DailyRecord) -> bool) -> u32 {
    records.iter().filter(|r| predicate(r)).count() as u32
}
