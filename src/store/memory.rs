//! In-memory [`PerformanceStore`] backed by `RwLock`-guarded maps.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use chrono::{Datelike, NaiveDate};

use crate::models::{DailyRecord, Employee, MonthlySummary, SummaryKey};

use super::{AuditEntry, PerformanceStore, StoreError, UpsertOutcome};

type RecordKey = (String, NaiveDate);

#[derive(Debug, Default)]
struct Tables {
    employees: RwLock<BTreeMap<String, Employee>>,
    records: RwLock<BTreeMap<RecordKey, DailyRecord>>,
    summaries: RwLock<HashMap<SummaryKey, MonthlySummary>>,
    audit: RwLock<Vec<AuditEntry>>,
}

/// A store that keeps everything in process memory.
///
/// Clones share the same tables.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    tables: Arc<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with `employees`.
    pub fn with_employees(employees: impl IntoIterator<Item = Employee>) -> Self {
        let store = Self::new();
        if let Ok(mut table) = store.tables.employees.write() {
            table.extend(employees.into_iter().map(|e| (e.id.clone(), e)));
        }
        store
    }
}

fn poisoned<T>(_: T) -> StoreError {
    StoreError::Unavailable("lock poisoned".to_string())
}

impl PerformanceStore for InMemoryStore {
    fn get_employee(&self, employee_id: &str) -> Result<Option<Employee>, StoreError> {
        let guard = self.tables.employees.read().map_err(poisoned)?;
        Ok(guard.get(employee_id).cloned())
    }

    fn insert_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        let mut guard = self.tables.employees.write().map_err(poisoned)?;
        if guard.contains_key(&employee.id) {
            return Err(StoreError::Conflict);
        }
        guard.insert(employee.id.clone(), employee.clone());
        Ok(employee)
    }

    fn update_employee(&self, employee: Employee) -> Result<Employee, StoreError> {
        let mut guard = self.tables.employees.write().map_err(poisoned)?;
        match guard.get_mut(&employee.id) {
            Some(slot) => {
                *slot = employee.clone();
                Ok(employee)
            }
            None => Err(StoreError::NotFound),
        }
    }

    fn list_employees(&self) -> Result<Vec<Employee>, StoreError> {
        let guard = self.tables.employees.read().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }

    fn get_daily_record(
        &self,
        employee_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyRecord>, StoreError> {
        let guard = self.tables.records.read().map_err(poisoned)?;
        Ok(guard.get(&(employee_id.to_string(), date)).cloned())
    }

    fn upsert_daily_record(&self, record: DailyRecord) -> Result<UpsertOutcome, StoreError> {
        let mut guard = self.tables.records.write().map_err(poisoned)?;
        let key = (record.employee_id().to_string(), record.date());
        Ok(match guard.insert(key, record) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        })
    }

    fn records_for_month(
        &self,
        employee_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DailyRecord>, StoreError> {
        let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return Ok(Vec::new());
        };

        let guard = self.tables.records.read().map_err(poisoned)?;
        Ok(guard
            .range((employee_id.to_string(), first)..)
            .take_while(|((id, date), _)| {
                id == employee_id && date.year() == year && date.month() == month
            })
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn records_between(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<DailyRecord>, StoreError> {
        if start > end {
            return Ok(Vec::new());
        }

        let guard = self.tables.records.read().map_err(poisoned)?;
        Ok(guard
            .range((employee_id.to_string(), start)..=(employee_id.to_string(), end))
            .map(|(_, record)| record.clone())
            .collect())
    }

    fn get_summary(&self, key: &SummaryKey) -> Result<Option<MonthlySummary>, StoreError> {
        let guard = self.tables.summaries.read().map_err(poisoned)?;
        Ok(guard.get(key).cloned())
    }

    fn upsert_summary(
        &self,
        key: SummaryKey,
        summary: MonthlySummary,
    ) -> Result<UpsertOutcome, StoreError> {
        let mut guard = self.tables.summaries.write().map_err(poisoned)?;
        Ok(match guard.insert(key, summary) {
            Some(_) => UpsertOutcome::Updated,
            None => UpsertOutcome::Created,
        })
    }

    fn append_audit(&self, entry: AuditEntry) -> Result<(), StoreError> {
        let mut guard = self.tables.audit.write().map_err(poisoned)?;
        guard.push(entry);
        Ok(())
    }

    fn audit_entries(&self, employee_id: &str) -> Result<Vec<AuditEntry>, StoreError> {
        let guard = self.tables.audit.read().map_err(poisoned)?;
        Ok(guard
            .iter()
            .filter(|entry| entry.employee_id == employee_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::aggregate_month;
    use crate::models::{DailyInput, EmploymentType};
    use rust_decimal::Decimal;

    fn employee(id: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: "Asha Rao".to_string(),
            email: "asha.rao@acme.test".to_string(),
            designation: "Engineer".to_string(),
            department: None,
            base_salary: Decimal::new(50000, 0),
            join_date: NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            reporting_manager: None,
            employment_type: EmploymentType::FullTime,
            is_active: true,
        }
    }

    fn record(id: &str, y: i32, m: u32, d: u32, completed: i64) -> DailyRecord {
        DailyRecord::new(
            id,
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            DailyInput {
                completed_hours: Decimal::new(completed, 0),
                ..DailyInput::default()
            },
        )
    }

    #[test]
    fn test_seeded_employees_are_listed_by_id() {
        let store = InMemoryStore::with_employees(vec![employee("EMP20250002"), employee("EMP20250001")]);
        let ids: Vec<String> = store.list_employees().unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["EMP20250001", "EMP20250002"]);
    }

    #[test]
    fn test_insert_employee_conflict() {
        let store = InMemoryStore::with_employees(vec![employee("EMP20250001")]);
        let result = store.insert_employee(employee("EMP20250001"));
        assert!(matches!(result, Err(StoreError::Conflict)));
        assert!(store.get_employee("EMP20250001").unwrap().is_some());
        assert!(store.get_employee("EMP20259999").unwrap().is_none());
    }

    #[test]
    fn test_update_employee_replaces_existing_only() {
        let store = InMemoryStore::with_employees(vec![employee("EMP20250001")]);
        let mut changed = employee("EMP20250001");
        changed.base_salary = Decimal::new(60000, 0);

        store.update_employee(changed).unwrap();
        let stored = store.get_employee("EMP20250001").unwrap().unwrap();
        assert_eq!(stored.base_salary, Decimal::new(60000, 0));

        let result = store.update_employee(employee("EMP20259999"));
        assert!(matches!(result, Err(StoreError::NotFound)));
        assert!(store.get_employee("EMP20259999").unwrap().is_none());
    }

    #[test]
    fn test_upsert_daily_record_replaces_same_date() {
        let store = InMemoryStore::new();

        let first = store.upsert_daily_record(record("EMP20250001", 2025, 8, 1, 9)).unwrap();
        let second = store.upsert_daily_record(record("EMP20250001", 2025, 8, 1, 4)).unwrap();

        assert_eq!(first, UpsertOutcome::Created);
        assert_eq!(second, UpsertOutcome::Updated);
        let stored = store
            .get_daily_record("EMP20250001", NaiveDate::from_ymd_opt(2025, 8, 1).unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(stored.input().completed_hours, Decimal::new(4, 0));
    }

    #[test]
    fn test_records_for_month_filters_employee_and_month() {
        let store = InMemoryStore::new();
        store.upsert_daily_record(record("EMP20250001", 2025, 7, 31, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250001", 2025, 8, 5, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250001", 2025, 8, 1, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250001", 2025, 9, 1, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250002", 2025, 8, 2, 9)).unwrap();

        let records = store.records_for_month("EMP20250001", 2025, 8).unwrap();
        let days: Vec<u32> = records.iter().map(|r| r.date().day()).collect();
        assert_eq!(days, vec![1, 5]);
    }

    #[test]
    fn test_records_for_invalid_month_is_empty() {
        let store = InMemoryStore::new();
        store.upsert_daily_record(record("EMP20250001", 2025, 8, 1, 9)).unwrap();
        assert!(store.records_for_month("EMP20250001", 2025, 13).unwrap().is_empty());
    }

    #[test]
    fn test_records_between_spans_months_inclusively() {
        let store = InMemoryStore::new();
        store.upsert_daily_record(record("EMP20250001", 2025, 7, 30, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250001", 2025, 7, 31, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250001", 2025, 8, 2, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250001", 2025, 8, 3, 9)).unwrap();
        store.upsert_daily_record(record("EMP20250002", 2025, 8, 1, 9)).unwrap();

        let start = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        let dates: Vec<NaiveDate> = store
            .records_between("EMP20250001", start, end)
            .unwrap()
            .iter()
            .map(|r| r.date())
            .collect();

        assert_eq!(dates, vec![start, end]);
        assert!(store.records_between("EMP20250001", end, start).unwrap().is_empty());
    }

    #[test]
    fn test_upsert_summary_reports_created_then_updated() {
        let store = InMemoryStore::new();
        let key = SummaryKey::new("EMP20250001", 2025, 8);
        let summary = aggregate_month(Decimal::new(50000, 0), &[], 26);

        assert_eq!(store.upsert_summary(key.clone(), summary.clone()).unwrap(), UpsertOutcome::Created);
        assert_eq!(store.upsert_summary(key.clone(), summary.clone()).unwrap(), UpsertOutcome::Updated);
        assert_eq!(store.get_summary(&key).unwrap(), Some(summary));
    }

    #[test]
    fn test_audit_entries_filtered_by_employee() {
        let store = InMemoryStore::new();
        store
            .append_audit(AuditEntry::new("EMP20250001", "Performance Updated", serde_json::json!({}), "hr"))
            .unwrap();
        store
            .append_audit(AuditEntry::new("EMP20250002", "Employee Onboarded", serde_json::json!({}), "hr"))
            .unwrap();

        let entries = store.audit_entries("EMP20250001").unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, "Performance Updated");
    }

    #[test]
    fn test_clones_share_tables() {
        let store = InMemoryStore::new();
        let clone = store.clone();
        clone.insert_employee(employee("EMP20250001")).unwrap();
        assert!(store.get_employee("EMP20250001").unwrap().is_some());
    }
}
