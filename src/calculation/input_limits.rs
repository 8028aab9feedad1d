//! Input boundary clamping.
//!
//! Raw daily inputs are clamped into their configured ranges once, before a
//! [`DailyRecord`](crate::models::DailyRecord) is built. Each adjustment is
//! reported as an [`AuditWarning`] rather than rejecting the input.

use rust_decimal::Decimal;

use crate::config::{FieldRange, InputLimits};
use crate::models::{AuditWarning, DailyInput};

/// Warning code emitted for every clamped field.
pub const INPUT_CLAMPED: &str = "INPUT_CLAMPED";

/// A daily input after clamping, with one warning per adjusted field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClampedInput {
    /// The input with every numeric field inside its range.
    pub input: DailyInput,
    /// Warnings for fields that were moved into range.
    pub warnings: Vec<AuditWarning>,
}

/// Clamps each numeric field of `input` into its range from `limits`.
///
/// Boolean flags pass through unchanged.
///
/// # Examples
///
/// ```
/// use performance_engine::calculation::clamp_daily_input;
/// use performance_engine::config::InputLimits;
/// use performance_engine::models::DailyInput;
/// use rust_decimal::Decimal;
///
/// let raw = DailyInput {
///     completed_hours: Decimal::new(20, 0),
///     ..DailyInput::default()
/// };
/// let clamped = clamp_daily_input(raw, &InputLimits::default());
///
/// assert_eq!(clamped.input.completed_hours, Decimal::new(16, 0));
/// assert_eq!(clamped.warnings.len(), 1);
/// assert_eq!(clamped.warnings[0].code, "INPUT_CLAMPED");
/// ```
pub fn clamp_daily_input(input: DailyInput, limits: &InputLimits) -> ClampedInput {
    let mut warnings = Vec::new();

    let clamped = DailyInput {
        meeting_hours: clamp_field(
            "meeting_hours",
            input.meeting_hours,
            limits.meeting_hours,
            &mut warnings,
        ),
        assigned_hours: clamp_field(
            "assigned_hours",
            input.assigned_hours,
            limits.assigned_hours,
            &mut warnings,
        ),
        completed_hours: clamp_field(
            "completed_hours",
            input.completed_hours,
            limits.completed_hours,
            &mut warnings,
        ),
        complexity_factor: clamp_field(
            "complexity_factor",
            input.complexity_factor,
            limits.complexity_factor,
            &mut warnings,
        ),
        qa_factor: clamp_field("qa_factor", input.qa_factor, limits.qa_factor, &mut warnings),
        task_failed: input.task_failed,
        leave_taken: input.leave_taken,
    };

    ClampedInput {
        input: clamped,
        warnings,
    }
}

fn clamp_field(
    field: &str,
    value: Decimal,
    range: FieldRange,
    warnings: &mut Vec<AuditWarning>,
) -> Decimal {
    if range.contains(value) {
        return value;
    }

    let clamped = range.clamp(value);
    warnings.push(AuditWarning {
        code: INPUT_CLAMPED.to_string(),
        message: format!(
            "{} clamped from {} to {}",
            field,
            value.normalize(),
            clamped.normalize()
        ),
        severity: "low".to_string(),
    });
    clamped
}
