//! Performance service.
//!
//! [`PerformanceService`] ties the calculation engine to a
//! [`PerformanceStore`]: it clamps and records daily inputs, recomputes and
//! persists monthly summaries, builds leaderboards and analytics, and onboards
//! and updates employees. Recomputation of a given `(employee, year, month)`
//! summary is serialized so that concurrent requests cannot interleave the
//! read and the overwrite. Roster changes are serialized so that uniqueness
//! checks and writes happen as one step.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    CompanyStats, DepartmentPerformance, DistributionBucket, LeaderboardEntry, MAX_BASE_SALARY,
    TREND_DAYS, TrendPoint, aggregate_month_with_audit, build_leaderboard, business_day_count,
    clamp_daily_input, company_stats, department_performance, performance_distribution,
    performance_trend, trend_window_start,
};
use crate::config::{ConfigLoader, InputLimits};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditTrace, AuditWarning, CompensationResult, DailyInput, DailyRecord, Employee,
    EmployeeUpdate, MonthlySummary, NewEmployee, SummaryKey,
};
use crate::store::{AuditEntry, InMemoryStore, PerformanceStore, StoreError, UpsertOutcome};

/// Audit action recorded when a daily record is written.
pub const PERFORMANCE_UPDATED: &str = "Performance Updated";

/// Audit action recorded when an employee is onboarded.
pub const EMPLOYEE_ONBOARDED: &str = "Employee Onboarded";

/// Audit action recorded when an employee's profile is changed.
pub const EMPLOYEE_UPDATED: &str = "Employee Updated";

/// The outcome of recording a day of performance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedPerformance {
    /// The stored record with its derived metrics.
    pub record: DailyRecord,
    /// Whether the record was new or replaced an earlier one for the same date.
    pub outcome: UpsertOutcome,
    /// One warning per input field that was clamped.
    pub warnings: Vec<AuditWarning>,
}

/// Orchestrates the store and the calculation engine.
pub struct PerformanceService {
    store: Arc<dyn PerformanceStore>,
    input_limits: InputLimits,
    summary_locks: Mutex<HashMap<SummaryKey, Arc<Mutex<()>>>>,
    roster_lock: Mutex<()>,
}

impl PerformanceService {
    /// Creates a service over `store`, clamping inputs into `input_limits`.
    pub fn new(store: Arc<dyn PerformanceStore>, input_limits: InputLimits) -> Self {
        Self {
            store,
            input_limits,
            summary_locks: Mutex::new(HashMap::new()),
            roster_lock: Mutex::new(()),
        }
    }

    /// Creates a service over an in-memory store seeded with the configured roster.
    pub fn from_config(config: &ConfigLoader) -> Self {
        let store = InMemoryStore::with_employees(config.roster().iter().cloned());
        Self::new(Arc::new(store), config.input_limits().clone())
    }

    /// Returns the input clamping ranges in use.
    pub fn input_limits(&self) -> &InputLimits {
        &self.input_limits
    }

    /// Looks up an employee, failing with `EmployeeNotFound` if absent.
    pub fn employee(&self, employee_id: &str) -> EngineResult<Employee> {
        self.store
            .get_employee(employee_id)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }

    /// Clamps, computes and stores one day of performance for an employee.
    ///
    /// A second call for the same employee and date replaces the earlier
    /// record. Every write appends a `"Performance Updated"` audit entry.
    pub fn record_daily_performance(
        &self,
        employee_id: &str,
        date: NaiveDate,
        raw_input: DailyInput,
        performed_by: &str,
    ) -> EngineResult<RecordedPerformance> {
        let employee = self.employee(employee_id)?;

        let clamped = clamp_daily_input(raw_input, &self.input_limits);
        for warning in &clamped.warnings {
            warn!(employee_id = %employee.id, %date, warning = %warning.message, "Input clamped");
        }

        let record = DailyRecord::new(employee.id.clone(), date, clamped.input);
        let outcome = self.store.upsert_daily_record(record.clone())?;

        let new_values = serde_json::to_value(&record).map_err(|e| EngineError::CalculationError {
            message: format!("failed to serialize daily record: {}", e),
        })?;
        self.store.append_audit(AuditEntry::new(
            employee.id.clone(),
            PERFORMANCE_UPDATED,
            new_values,
            performed_by,
        ))?;

        debug!(
            employee_id = %employee.id,
            %date,
            outcome = ?outcome,
            approved_points = %record.metrics().approved_points,
            "Recorded daily performance"
        );

        Ok(RecordedPerformance {
            record,
            outcome,
            warnings: clamped.warnings,
        })
    }

    /// Recomputes, persists and returns an employee's compensation for a month.
    ///
    /// The persisted summary is created on first computation and overwritten
    /// on every later one.
    pub fn monthly_compensation(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<CompensationResult> {
        let start_time = Instant::now();
        let workdays = business_day_count(year, month)?;
        let employee = self.employee(employee_id)?;
        let key = SummaryKey::new(employee.id.clone(), year, month);

        let (records, aggregation) = self.with_summary_lock(&key, || -> EngineResult<_> {
            let records = self.store.records_for_month(&employee.id, year, month)?;
            let aggregation = aggregate_month_with_audit(employee.base_salary, &records, workdays);
            let outcome = self.store.upsert_summary(key.clone(), aggregation.summary.clone())?;

            match outcome {
                UpsertOutcome::Created => info!(summary = %key, "Monthly summary created"),
                UpsertOutcome::Updated => info!(summary = %key, "Monthly summary overwritten"),
            }
            Ok((records, aggregation))
        })?;

        let warnings = compensation_warnings(&aggregation.summary, records.len());
        let duration = start_time.elapsed();

        Ok(CompensationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            employee_id: employee.id,
            year,
            month,
            summary: aggregation.summary,
            daily_records: records,
            audit_trace: AuditTrace {
                steps: aggregation.audit_steps,
                warnings,
                duration_us: duration.as_micros() as u64,
            },
        })
    }

    /// Returns the last persisted summary for an employee-month, if any.
    pub fn summary(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> EngineResult<Option<MonthlySummary>> {
        business_day_count(year, month)?;
        let employee = self.employee(employee_id)?;
        Ok(self.store.get_summary(&SummaryKey::new(employee.id, year, month))?)
    }

    /// Ranks active employees by the approved points they earned in a month.
    pub fn leaderboard(&self, year: i32, month: u32) -> EngineResult<Vec<LeaderboardEntry>> {
        business_day_count(year, month)?;
        Ok(build_leaderboard(self.active_employee_records(year, month)?))
    }

    /// Averages and grades active employees' points per department for a month.
    pub fn department_performance(
        &self,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<DepartmentPerformance>> {
        business_day_count(year, month)?;
        Ok(department_performance(&self.active_employee_records(year, month)?))
    }

    /// Counts active employees per performance band for a month.
    pub fn performance_distribution(
        &self,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<DistributionBucket>> {
        business_day_count(year, month)?;
        Ok(performance_distribution(&self.active_employee_records(year, month)?))
    }

    /// Totals active employees' points, hours and projected bonuses for a month.
    ///
    /// Nothing is persisted; use [`monthly_compensation`](Self::monthly_compensation)
    /// to materialise an employee's summary.
    pub fn company_stats(&self, year: i32, month: u32) -> EngineResult<CompanyStats> {
        let workdays = business_day_count(year, month)?;
        Ok(company_stats(&self.active_employee_records(year, month)?, workdays))
    }

    /// Returns an employee's approved points for the 30 days ending on `end`.
    pub fn performance_trend(
        &self,
        employee_id: &str,
        end: NaiveDate,
    ) -> EngineResult<Vec<TrendPoint>> {
        let employee = self.employee(employee_id)?;
        let start = trend_window_start(end, TREND_DAYS);
        let records = self.store.records_between(&employee.id, start, end)?;
        Ok(performance_trend(&records, end, TREND_DAYS))
    }

    /// Onboards a new employee and assigns the next employee code.
    ///
    /// Codes take the form `EMP{join year}{sequence:04}`, where the sequence is
    /// one more than the number of employees on record.
    pub fn onboard_employee(
        &self,
        new_employee: NewEmployee,
        performed_by: &str,
    ) -> EngineResult<Employee> {
        validate_new_employee(&new_employee)?;

        let _roster = self.roster_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let existing = self.store.list_employees()?;
        if email_taken(&existing, &new_employee.email, None) {
            return Err(EngineError::DuplicateEmployee {
                field: "email".to_string(),
                value: new_employee.email,
            });
        }

        let join_year = new_employee.join_date.year();
        let mut sequence = existing.len() + 1;
        let mut code = employee_code(join_year, sequence);
        while existing.iter().any(|e| e.id == code) {
            sequence += 1;
            code = employee_code(join_year, sequence);
        }

        let employee = self
            .store
            .insert_employee(new_employee.into_employee(code.clone()))
            .map_err(|e| match e {
                StoreError::Conflict => EngineError::DuplicateEmployee {
                    field: "id".to_string(),
                    value: code.clone(),
                },
                other => other.into(),
            })?;

        self.store.append_audit(AuditEntry::new(
            employee.id.clone(),
            EMPLOYEE_ONBOARDED,
            serde_json::json!({
                "name": employee.name,
                "email": employee.email,
                "designation": employee.designation,
                "base_salary": employee.base_salary,
            }),
            performed_by,
        ))?;

        info!(employee_id = %employee.id, "Employee onboarded");
        Ok(employee)
    }

    /// Applies a profile change to an existing employee.
    ///
    /// Writes an `"Employee Updated"` audit entry. A new base salary applies
    /// to every compensation computed afterwards, including for past months.
    pub fn update_employee(
        &self,
        employee_id: &str,
        update: EmployeeUpdate,
        performed_by: &str,
    ) -> EngineResult<Employee> {
        validate_profile(
            update.name.as_deref(),
            update.email.as_deref(),
            update.base_salary,
        )?;

        let _roster = self.roster_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut employee = self.employee(employee_id)?;
        if let Some(email) = &update.email {
            if email_taken(&self.store.list_employees()?, email, Some(&employee.id)) {
                return Err(EngineError::DuplicateEmployee {
                    field: "email".to_string(),
                    value: email.clone(),
                });
            }
        }

        let previous_salary = employee.base_salary;
        update.apply_to(&mut employee);
        let employee = self.store.update_employee(employee).map_err(|e| match e {
            StoreError::NotFound => EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            },
            other => other.into(),
        })?;

        self.store.append_audit(AuditEntry::new(
            employee.id.clone(),
            EMPLOYEE_UPDATED,
            serde_json::json!({
                "name": employee.name,
                "base_salary": employee.base_salary,
                "designation": employee.designation,
            }),
            performed_by,
        ))?;

        info!(
            employee_id = %employee.id,
            salary_changed = previous_salary != employee.base_salary,
            "Employee updated"
        );
        Ok(employee)
    }

    /// Returns the audit trail for an employee in the order it was written.
    pub fn audit_trail(&self, employee_id: &str) -> EngineResult<Vec<AuditEntry>> {
        Ok(self.store.audit_entries(employee_id)?)
    }

    fn active_employee_records(
        &self,
        year: i32,
        month: u32,
    ) -> EngineResult<Vec<(Employee, Vec<DailyRecord>)>> {
        let mut rows = Vec::new();
        for employee in self.store.list_employees()? {
            if !employee.is_active {
                continue;
            }
            let records = self.store.records_for_month(&employee.id, year, month)?;
            rows.push((employee, records));
        }
        Ok(rows)
    }

    /// Runs `f` holding the lock for `key`, then drops the lock entry if no
    /// other caller holds or waits on it.
    fn with_summary_lock<T>(&self, key: &SummaryKey, f: impl FnOnce() -> T) -> T {
        let lock = self.summary_lock(key);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            f()
        };
        drop(lock);

        let mut locks = self
            .summary_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if locks.get(key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(key);
        }
        result
    }

    fn summary_lock(&self, key: &SummaryKey) -> Arc<Mutex<()>> {
        let mut locks = self
            .summary_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.clone()).or_default().clone()
    }
}

fn employee_code(join_year: i32, sequence: usize) -> String {
    format!("EMP{}{:04}", join_year, sequence)
}

fn email_taken(employees: &[Employee], email: &str, except_id: Option<&str>) -> bool {
    employees
        .iter()
        .filter(|e| Some(e.id.as_str()) != except_id)
        .any(|e| e.email.eq_ignore_ascii_case(email.trim()))
}

fn validate_new_employee(new_employee: &NewEmployee) -> EngineResult<()> {
    validate_profile(
        Some(new_employee.name.as_str()),
        Some(new_employee.email.as_str()),
        Some(new_employee.base_salary),
    )
}

fn validate_profile(
    name: Option<&str>,
    email: Option<&str>,
    base_salary: Option<Decimal>,
) -> EngineResult<()> {
    if name.is_some_and(|n| n.trim().is_empty()) {
        return Err(EngineError::InvalidInput {
            field: "name".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    if email.is_some_and(|e| !e.contains('@')) {
        return Err(EngineError::InvalidInput {
            field: "email".to_string(),
            message: "must be an e-mail address".to_string(),
        });
    }
    if let Some(salary) = base_salary {
        if salary.is_sign_negative() {
            return Err(EngineError::InvalidInput {
                field: "base_salary".to_string(),
                message: "must not be negative".to_string(),
            });
        }
        if salary > MAX_BASE_SALARY {
            return Err(EngineError::InvalidInput {
                field: "base_salary".to_string(),
                message: format!("must not exceed {}", MAX_BASE_SALARY),
            });
        }
    }
    Ok(())
}

fn compensation_warnings(summary: &MonthlySummary, record_count: usize) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    if record_count == 0 {
        warnings.push(AuditWarning {
            code: "NO_RECORDS".to_string(),
            message: "No daily records for the month; bonus is zero".to_string(),
            severity: "medium".to_string(),
        });
    }
    if summary.calculated_bonus > summary.max_bonus_amount {
        warnings.push(AuditWarning {
            code: "BONUS_CAPPED".to_string(),
            message: format!(
                "Calculated bonus {} capped at {}",
                summary.calculated_bonus.round_dp(2),
                summary.max_bonus_amount
            ),
            severity: "low".to_string(),
        });
    }
    if summary.total_workdays == 0 && summary.total_points > Decimal::ZERO {
        warnings.push(AuditWarning {
            code: "NO_BUSINESS_DAYS".to_string(),
            message: "Month has no business days; points earn no bonus".to_string(),
            severity: "medium".to_string(),
        });
    }
    warnings
}
