//! Bonus calculation.
//!
//! Converts a month's approved points into a bonus. The month's business days
//! set a nominal point ceiling; half of the base salary is spread evenly over
//! that ceiling to give a rate per point, and the resulting bonus is capped at
//! half of the base salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::AuditStep;

/// Nominal full-performance points per business day.
pub const DAILY_POINT_CEILING: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Share of base salary that caps the monthly bonus (50%).
pub const BONUS_CAP_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Largest monthly base salary accepted at onboarding and in the roster (10^12).
pub const MAX_BASE_SALARY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// The bonus figures for one employee-month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusBreakdown {
    /// Business days times [`DAILY_POINT_CEILING`].
    pub max_possible_points: Decimal,
    /// Base salary times [`BONUS_CAP_RATIO`].
    pub max_bonus_amount: Decimal,
    /// Currency paid per approved point.
    pub bonus_rate_per_point: Decimal,
    /// Bonus before the cap.
    pub calculated_bonus: Decimal,
    /// Bonus after the cap.
    pub final_bonus: Decimal,
    /// Base salary plus final bonus.
    pub total_compensation: Decimal,
}

/// The result of a bonus calculation, including its audit steps.
#[derive(Debug, Clone)]
pub struct BonusCalculationResult {
    /// The calculated bonus figures.
    pub bonus: BonusBreakdown,
    /// Audit steps for the rate, cap and compensation stages.
    pub audit_steps: Vec<AuditStep>,
}

/// Returns the bonus ceiling for a base salary.
pub fn max_bonus_amount(base_salary: Decimal) -> Decimal {
    base_salary * BONUS_CAP_RATIO
}

/// Calculates the bonus and total compensation for a month.
///
/// When the month has no business days the rate, calculated bonus and final
/// bonus are all zero rather than dividing by zero. Approved points are not
/// capped; only the bonus amount is.
///
/// Never panics on overflow. Inputs far outside [`MAX_BASE_SALARY`] fall back
/// to rate-first multiplication and then saturate at `Decimal::MAX` before
/// the cap is applied.
///
/// # Arguments
///
/// * `base_salary` - The employee's monthly base salary
/// * `total_points` - Sum of approved points for the month
/// * `business_day_count` - Number of business days in the month
/// * `step_number` - The step number of the first audit step produced
///
/// # Examples
///
/// ```
/// use performance_engine::calculation::calculate_bonus;
/// use rust_decimal::Decimal;
///
/// let result = calculate_bonus(Decimal::new(50000, 0), Decimal::new(234, 0), 26, 1);
///
/// assert_eq!(result.bonus.max_possible_points, Decimal::new(260, 0));
/// assert_eq!(result.bonus.final_bonus, Decimal::new(22500, 0));
/// assert_eq!(result.bonus.total_compensation, Decimal::new(72500, 0));
/// assert_eq!(result.audit_steps.len(), 3);
/// ```
pub fn calculate_bonus(
    base_salary: Decimal,
    total_points: Decimal,
    business_day_count: u32,
    step_number: u32,
) -> BonusCalculationResult {
    let max_possible_points = Decimal::from(business_day_count) * DAILY_POINT_CEILING;
    let max_bonus_amount = max_bonus_amount(base_salary);

    let (bonus_rate_per_point, calculated_bonus, final_bonus) =
        if max_possible_points > Decimal::ZERO {
            let rate = max_bonus_amount / max_possible_points;
            // Multiplying before dividing keeps the bonus exact when the rate
            // is a repeating decimal (e.g. 25000 / 260).
            let calculated = total_points
                .checked_mul(max_bonus_amount)
                .and_then(|product| product.checked_div(max_possible_points))
                .or_else(|| total_points.checked_mul(rate))
                .unwrap_or_else(|| total_points.saturating_mul(rate));
            (rate, calculated, calculated.min(max_bonus_amount))
        } else {
            (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
        };
    let total_compensation = base_salary.saturating_add(final_bonus);

    let rate_reasoning = if max_possible_points > Decimal::ZERO {
        format!(
            "Bonus ceiling {} spread over {} possible points ({} business days x {})",
            max_bonus_amount.normalize(),
            max_possible_points.normalize(),
            business_day_count,
            DAILY_POINT_CEILING
        )
    } else {
        "Month has no business days, bonus rate is zero".to_string()
    };

    let cap_reasoning = if calculated_bonus > max_bonus_amount {
        format!(
            "Calculated bonus {} exceeds ceiling {}, capped",
            calculated_bonus.round_dp(2).normalize(),
            max_bonus_amount.normalize()
        )
    } else {
        format!(
            "Calculated bonus {} is within ceiling {}",
            calculated_bonus.round_dp(2).normalize(),
            max_bonus_amount.normalize()
        )
    };

    let audit_steps = vec![
        AuditStep {
            step_number,
            rule_id: "bonus_rate".to_string(),
            rule_name: "Bonus Rate per Point".to_string(),
            formula: "(base_salary x 0.5) / (business_days x 10)".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.normalize().to_string(),
                "business_days": business_day_count,
            }),
            output: serde_json::json!({
                "max_possible_points": max_possible_points.normalize().to_string(),
                "max_bonus_amount": max_bonus_amount.normalize().to_string(),
                "bonus_rate_per_point": bonus_rate_per_point.round_dp(4).normalize().to_string(),
            }),
            reasoning: rate_reasoning,
        },
        AuditStep {
            step_number: step_number + 1,
            rule_id: "bonus_cap".to_string(),
            rule_name: "Bonus Cap".to_string(),
            formula: "min(total_points x bonus_rate_per_point, max_bonus_amount)".to_string(),
            input: serde_json::json!({
                "total_points": total_points.normalize().to_string(),
                "max_bonus_amount": max_bonus_amount.normalize().to_string(),
            }),
            output: serde_json::json!({
                "calculated_bonus": calculated_bonus.round_dp(2).normalize().to_string(),
                "final_bonus": final_bonus.round_dp(2).normalize().to_string(),
            }),
            reasoning: cap_reasoning,
        },
        AuditStep {
            step_number: step_number + 2,
            rule_id: "total_compensation".to_string(),
            rule_name: "Total Compensation".to_string(),
            formula: "base_salary + final_bonus".to_string(),
            input: serde_json::json!({
                "base_salary": base_salary.normalize().to_string(),
                "final_bonus": final_bonus.round_dp(2).normalize().to_string(),
            }),
            output: serde_json::json!({
                "total_compensation": total_compensation.round_dp(2).normalize().to_string(),
            }),
            reasoning: format!(
                "Base salary {} plus bonus {}",
                base_salary.normalize(),
                final_bonus.round_dp(2).normalize()
            ),
        },
    ];

    BonusCalculationResult {
        bonus: BonusBreakdown {
            max_possible_points,
            max_bonus_amount,
            bonus_rate_per_point,
            calculated_bonus,
            final_bonus,
            total_compensation,
        },
        audit_steps,
    }
}
