//! Daily metric calculation.
//!
//! Converts one day's raw inputs into available hours, efficiency, raw points,
//! overtime points and approved points. Each step depends only on the inputs
//! and on earlier steps, and the whole pipeline is total over in-range input.

use rust_decimal::Decimal;

use crate::models::{DailyInput, DailyMetrics};

/// Length of the nominal workday in hours.
///
/// Availability is measured against this constant, not against the day's
/// assigned hours.
pub const NOMINAL_WORKDAY_HOURS: Decimal = Decimal::from_parts(9, 0, 0, false, 0);

/// Upper bound on daily efficiency (200%).
pub const MAX_EFFICIENCY: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Decimal places kept on approved points.
pub const APPROVED_POINTS_DECIMAL_PLACES: u32 = 2;

/// Computes every derived metric for a day.
///
/// # Examples
///
/// ```
/// use performance_engine::calculation::compute_daily_metrics;
/// use performance_engine::models::DailyInput;
/// use rust_decimal::Decimal;
///
/// let metrics = compute_daily_metrics(&DailyInput {
///     completed_hours: Decimal::new(9, 0),
///     ..DailyInput::default()
/// });
///
/// assert_eq!(metrics.available_hours, Decimal::new(9, 0));
/// assert_eq!(metrics.efficiency, Decimal::ONE);
/// assert_eq!(metrics.raw_points, Decimal::new(9, 0));
/// assert_eq!(metrics.overtime_points, Decimal::ZERO);
/// assert_eq!(metrics.approved_points, Decimal::new(9, 0));
/// ```
pub fn compute_daily_metrics(input: &DailyInput) -> DailyMetrics {
    let available_hours = available_hours(input.meeting_hours, input.leave_taken);
    let efficiency = efficiency(input.completed_hours, available_hours);
    let raw_points = raw_points(
        input.completed_hours,
        input.complexity_factor,
        input.qa_factor,
    );
    let overtime_points = overtime_points(input.completed_hours, input.assigned_hours);
    let approved_points = approved_points(efficiency, raw_points, input.task_failed);

    DailyMetrics {
        available_hours,
        efficiency,
        raw_points,
        overtime_points,
        approved_points,
    }
}

/// Hours left for task work after meetings; zero on a leave day.
pub fn available_hours(meeting_hours: Decimal, leave_taken: bool) -> Decimal {
    if leave_taken {
        return Decimal::ZERO;
    }
    (NOMINAL_WORKDAY_HOURS - meeting_hours).max(Decimal::ZERO)
}

/// Completed over available hours, capped at [`MAX_EFFICIENCY`].
///
/// Zero when no hours are available.
pub fn efficiency(completed_hours: Decimal, available_hours: Decimal) -> Decimal {
    if available_hours.is_zero() {
        return Decimal::ZERO;
    }
    (completed_hours / available_hours).min(MAX_EFFICIENCY)
}

/// Completed hours weighted by complexity and QA. Uncapped.
pub fn raw_points(completed_hours: Decimal, complexity_factor: Decimal, qa_factor: Decimal) -> Decimal {
    completed_hours * complexity_factor * qa_factor
}

/// Hours completed beyond the assigned hours.
pub fn overtime_points(completed_hours: Decimal, assigned_hours: Decimal) -> Decimal {
    (completed_hours - assigned_hours).max(Decimal::ZERO)
}

/// The quality gate.
///
/// A failed task forfeits every point for the day. Otherwise the points are
/// efficiency times raw points, rounded half-to-even to two places.
pub fn approved_points(efficiency: Decimal, raw_points: Decimal, task_failed: bool) -> Decimal {
    if task_failed {
        return Decimal::ZERO;
    }
    (efficiency * raw_points).round_dp(APPROVED_POINTS_DECIMAL_PLACES)
}
