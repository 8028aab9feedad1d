//! Calculation logic for the performance engine.
//!
//! This module contains the pure calculation functions: daily metrics from a
//! day's inputs, the Monday to Saturday business-day calendar, monthly
//! aggregation and bonus, input clamping at the boundary, performance
//! grading for the leaderboard, and company analytics.

mod analytics;
mod bonus;
mod business_days;
mod daily_metrics;
mod input_limits;
mod leaderboard;
mod monthly_aggregate;
mod performance_grade;

pub use analytics::{
    CompanyStats, DepartmentPerformance, DistributionBucket, PerformanceBand, TREND_DAYS,
    TrendPoint, UNASSIGNED_DEPARTMENT, company_stats, department_performance,
    performance_distribution, performance_trend, trend_window_start,
};
pub use bonus::{
    BONUS_CAP_RATIO, BonusBreakdown, BonusCalculationResult, DAILY_POINT_CEILING, MAX_BASE_SALARY,
    calculate_bonus, max_bonus_amount,
};
pub use business_days::{BusinessDays, business_day_count, business_days, is_business_day};
pub use daily_metrics::{
    APPROVED_POINTS_DECIMAL_PLACES, MAX_EFFICIENCY, NOMINAL_WORKDAY_HOURS, approved_points,
    available_hours, compute_daily_metrics, efficiency, overtime_points, raw_points,
};
pub use input_limits::{ClampedInput, INPUT_CLAMPED, clamp_daily_input};
pub use leaderboard::{LeaderboardEntry, build_leaderboard};
pub use monthly_aggregate::{MonthlyAggregation, aggregate_month, aggregate_month_with_audit};
pub use performance_grade::PerformanceGrade;
