//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::MAX_BASE_SALARY;
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::types::{
    CompanyMetadata, EngineConfig, InputLimits, PolicyConfig, RosterConfig,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/acme/
/// ├── company.yaml    # Company name and currency
/// ├── policy.yaml     # Input clamping ranges
/// └── employees.yaml  # Employee roster loaded at startup
/// ```
///
/// # Example
///
/// ```no_run
/// use performance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/acme").unwrap();
/// println!("Company: {}", loader.company().name);
/// println!("Employees: {}", loader.roster().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or an invalid value (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let company = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;
        let policy = Self::load_yaml::<PolicyConfig>(&path.join("policy.yaml"))?;
        let roster_path = path.join("employees.yaml");
        let roster = Self::load_yaml::<RosterConfig>(&roster_path)?;

        Self::validate_policy(&policy, &path.join("policy.yaml"))?;
        Self::validate_roster(&roster.employees, &roster_path)?;

        debug!(
            company = %company.name,
            employees = roster.employees.len(),
            "Loaded engine configuration"
        );

        Ok(Self {
            config: EngineConfig::new(company, policy, roster.employees),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Checks every configured range is ordered and lies inside the
    /// documented range for its field, so clamped inputs stay in the domain
    /// the daily formulas are defined on.
    fn validate_policy(policy: &PolicyConfig, path: &Path) -> EngineResult<()> {
        let limits = &policy.input_limits;
        let documented = InputLimits::default();
        let ranges = [
            ("meeting_hours", limits.meeting_hours, documented.meeting_hours),
            ("assigned_hours", limits.assigned_hours, documented.assigned_hours),
            ("completed_hours", limits.completed_hours, documented.completed_hours),
            ("complexity_factor", limits.complexity_factor, documented.complexity_factor),
            ("qa_factor", limits.qa_factor, documented.qa_factor),
        ];

        for (field, range, bounds) in ranges {
            if range.min > range.max {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("{} range has min {} above max {}", field, range.min, range.max),
                });
            }
            if !bounds.contains(range.min) || !bounds.contains(range.max) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "{} range {}..{} lies outside {}..{}",
                        field, range.min, range.max, bounds.min, bounds.max
                    ),
                });
            }
        }
        Ok(())
    }

    fn validate_roster(employees: &[Employee], path: &Path) -> EngineResult<()> {
        for (i, employee) in employees.iter().enumerate() {
            if employees[..i].iter().any(|e| e.id == employee.id) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate employee id '{}'", employee.id),
                });
            }
            if employee.base_salary.is_sign_negative() {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("employee '{}' has a negative base salary", employee.id),
                });
            }
            if employee.base_salary > MAX_BASE_SALARY {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "employee '{}' has a base salary above {}",
                        employee.id, MAX_BASE_SALARY
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Returns the input clamping ranges.
    pub fn input_limits(&self) -> &InputLimits {
        self.config.input_limits()
    }

    /// Returns the employee roster, sorted by id.
    pub fn roster(&self) -> &[Employee] {
        self.config.roster()
    }

    /// Gets a roster employee by id.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use performance_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/acme")?;
    /// let employee = loader.get_employee("EMP20250001")?;
    /// println!("Base salary: {}", employee.base_salary);
    /// # Ok::<(), performance_engine::error::EngineError>(())
    /// ```
    pub fn get_employee(&self, employee_id: &str) -> EngineResult<&Employee> {
        self.config
            .roster()
            .iter()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}
