//! Configuration types for the performance engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::Employee;

/// Metadata about the company running the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// The company name.
    pub name: String,
    /// ISO 4217 code of the currency salaries are paid in.
    pub currency: String,
}

/// An inclusive range a numeric input is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FieldRange {
    /// Lowest accepted value.
    pub min: Decimal,
    /// Highest accepted value.
    pub max: Decimal,
}

impl FieldRange {
    /// Creates a range from `min` to `max`, inclusive.
    pub const fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the range.
    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.max(self.min).min(self.max)
    }

    /// Returns true if `value` lies within the range.
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted ranges for each numeric daily input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InputLimits {
    /// Range for meeting hours.
    pub meeting_hours: FieldRange,
    /// Range for assigned hours.
    pub assigned_hours: FieldRange,
    /// Range for completed hours.
    pub completed_hours: FieldRange,
    /// Range for the complexity factor.
    pub complexity_factor: FieldRange,
    /// Range for the QA factor.
    pub qa_factor: FieldRange,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            meeting_hours: FieldRange::new(Decimal::ZERO, Decimal::new(9, 0)),
            assigned_hours: FieldRange::new(Decimal::ONE, Decimal::new(12, 0)),
            completed_hours: FieldRange::new(Decimal::ZERO, Decimal::new(16, 0)),
            complexity_factor: FieldRange::new(Decimal::new(5, 1), Decimal::new(30, 1)),
            qa_factor: FieldRange::new(Decimal::new(3, 1), Decimal::new(20, 1)),
        }
    }
}

/// Policy configuration file structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyConfig {
    /// Input clamping ranges.
    #[serde(default)]
    pub input_limits: InputLimits,
}

/// Employee roster file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Employees known at startup.
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// The complete configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    company: CompanyMetadata,
    policy: PolicyConfig,
    roster: Vec<Employee>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    ///
    /// The roster is sorted by employee id.
    pub fn new(company: CompanyMetadata, policy: PolicyConfig, roster: Vec<Employee>) -> Self {
        let mut sorted_roster = roster;
        sorted_roster.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            company,
            policy,
            roster: sorted_roster,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.company
    }

    /// Returns the input clamping ranges.
    pub fn input_limits(&self) -> &InputLimits {
        &self.policy.input_limits
    }

    /// Returns the initial employee roster.
    pub fn roster(&self) -> &[Employee] {
        &self.roster
    }
}
