//! Persistence boundary for employees, daily records, monthly summaries and
//! the audit trail.
//!
//! The [`PerformanceStore`] trait lets the service be exercised against any
//! backing store. [`InMemoryStore`] is the implementation used by the binary
//! and the tests.

mod memory;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DailyRecord, Employee, MonthlySummary, SummaryKey};

pub use memory::InMemoryStore;

/// Storage abstraction so the service can be exercised in isolation.
pub trait PerformanceStore: Send + Sync {
    /// Looks up an employee by id.
    fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError>;

    /// Inserts a new employee. Fails with [`StoreError::Conflict`] if the id is taken.
    fn insert_employee(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Replaces an existing employee. Fails with [`StoreError::NotFound`] if the id is unknown.
    fn update_employee(&self, employee: Employee) -> Result<Employee, StoreError>;

    /// Lists all employees ordered by id.
    fn list_employees(&self) -> Result<Vec<Employee>, StoreError>;

    /// Looks up the record for `(employee_id, date)`.
    fn get_daily_record(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, StoreError>;

    /// Inserts or replaces the record for its `(employee_id, date)`.
    fn upsert_daily_record(&self, record: DailyRecord) -> Result<UpsertOutcome, StoreError>;

    /// Returns an employee's records for a calendar month, ordered by date.
    fn records_for_month(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyRecord>, StoreError>;

    /// Returns an employee's records dated `start..=end`, ordered by date.
    fn records_between(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError>;

    /// Looks up a persisted monthly summary.
    fn get_summary(&self, key: &SummaryKey) -> Result<Option<MonthlySummary>, StoreError>;

    /// Creates or overwrites the summary stored under `key`.
    fn upsert_summary(
        &self,
        key: SummaryKey,
        summary: MonthlySummary,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Appends an entry to the audit trail.
    fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError>;

    /// Returns an employee's audit entries in insertion order.
    fn audit_entries(&self, employee_id: &str) -> Result<Vec<AuditEntry>, StoreError>;
}

/// Whether an upsert created a new row or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpsertOutcome {
    /// No row existed for the key.
    Created,
    /// An existing row was overwritten.
    Updated,
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A row with the same key already exists.
    #[error("record already exists")]
    Conflict,
    /// No row exists for the key.
    #[error("record not found")]
    NotFound,
    /// The store could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// An entry in the audit trail of changes made through the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique identifier of the entry.
    pub id: Uuid,
    /// The employee the change concerns.
    pub employee_id: String,
    /// What happened, e.g. `"Performance Updated"`.
    pub action: String,
    /// The values written by the change.
    pub new_values: serde_json::Value,
    /// Who made the change.
    pub performed_by: String,
    /// When the change was made.
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates an entry stamped with a fresh id and the current time.
    pub fn new(
        employee_id: impl Into<String>,
        action: impl Into<String>,
        new_values: serde_json::Value,
        performed_by: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            action: action.into(),
            new_values,
            performed_by: performed_by.into(),
            timestamp: Utc::now(),
        }
    }
}
