// In memory timesheet repository.
//
// Purpose
// - Exercise the service and the HTTP surface without a database.
//
// Responsibilities
// - Mirror the PostgreSQL adapter contract: unique (employee, month, year),
//   entries owned by an existing timesheet, cascade on delete, ordering rules.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::modules::timesheets::core::errors::TimesheetError;
use crate::modules::timesheets::core::hours::round2;
use crate::modules::timesheets::core::ports::TimesheetRepository;
use crate::modules::timesheets::core::timesheet::{
    EntryDraft, Timesheet, TimesheetEntry, TimesheetFilter, TimesheetStats,
};

#[derive(Default)]
struct Tables {
    timesheets: BTreeMap<i64, Timesheet>,
    entries: BTreeMap<i64, TimesheetEntry>,
    last_timesheet_id: i64,
    last_entry_id: i64,
}

impl Tables {
    fn has_period_conflict(&self, candidate: &Timesheet) -> bool {
        self.timesheets.values().any(|existing| {
            existing.id != candidate.id
                && existing.employee_name == candidate.employee_name
                && existing.month == candidate.month
                && existing.year == candidate.year
        })
    }
}

#[derive(Default)]
pub struct InMemoryTimesheetRepository {
    tables: RwLock<Tables>,
    is_offline: bool,
}

impl InMemoryTimesheetRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), TimesheetError> {
        if self.is_offline {
            return Err(TimesheetError::Backend("Timesheet repository offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TimesheetRepository for InMemoryTimesheetRepository {
    async fn create(&self, timesheet: &mut Timesheet) -> Result<i64, TimesheetError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if tables.has_period_conflict(timesheet) {
            return Err(TimesheetError::Duplicate);
        }
        tables.last_timesheet_id += 1;
        timesheet.id = tables.last_timesheet_id;
        timesheet.created_at = Utc::now();
        let header = Timesheet {
            entries: Vec::new(),
            ..timesheet.clone()
        };
        tables.timesheets.insert(header.id, header);
        Ok(timesheet.id)
    }

    async fn find_by_id(&self, id: i64) -> Result<Timesheet, TimesheetError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut timesheet = tables
            .timesheets
            .get(&id)
            .cloned()
            .ok_or(TimesheetError::NotFound)?;
        let mut entries: Vec<TimesheetEntry> = tables
            .entries
            .values()
            .filter(|entry| entry.timesheet_id == id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.work_date, entry.id));
        timesheet.entries = entries;
        Ok(timesheet)
    }

    async fn list(&self, filter: &TimesheetFilter) -> Result<Vec<Timesheet>, TimesheetError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let mut items: Vec<Timesheet> = tables
            .timesheets
            .values()
            .filter(|timesheet| filter.matches(timesheet))
            .cloned()
            .collect();
        items.sort_by_key(|t| (t.year, t.month, t.id));
        items.reverse();
        Ok(items)
    }

    async fn update(&self, timesheet: &Timesheet) -> Result<(), TimesheetError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if !tables.timesheets.contains_key(&timesheet.id) {
            return Err(TimesheetError::NotFound);
        }
        if tables.has_period_conflict(timesheet) {
            return Err(TimesheetError::Duplicate);
        }
        if let Some(stored) = tables.timesheets.get_mut(&timesheet.id) {
            stored.employee_name = timesheet.employee_name.clone();
            stored.department = timesheet.department.clone();
            stored.month = timesheet.month;
            stored.year = timesheet.year;
            stored.total_working_days = timesheet.total_working_days;
        }
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), TimesheetError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        tables
            .timesheets
            .remove(&id)
            .ok_or(TimesheetError::NotFound)?;
        tables.entries.retain(|_, entry| entry.timesheet_id != id);
        Ok(())
    }

    async fn add_entry(&self, entry: &mut TimesheetEntry) -> Result<i64, TimesheetError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        if !tables.timesheets.contains_key(&entry.timesheet_id) {
            return Err(TimesheetError::NotFound);
        }
        tables.last_entry_id += 1;
        entry.id = tables.last_entry_id;
        entry.created_at = Utc::now();
        tables.entries.insert(entry.id, entry.clone());
        Ok(entry.id)
    }

    async fn update_entry(&self, id: i64, draft: &EntryDraft) -> Result<(), TimesheetError> {
        self.ensure_online()?;
        let mut tables = self.tables.write().await;
        let stored = tables.entries.get_mut(&id).ok_or(TimesheetError::NotFound)?;
        if let Some(work_date) = draft.work_date {
            stored.work_date = work_date;
        }
        stored.start_time = draft.start_time;
        stored.end_time = draft.end_time;
        stored.total_hours = draft.total_hours;
        stored.overtime_hours = draft.overtime_hours;
        stored.remarks = draft.remarks.clone();
        Ok(())
    }

    async fn delete_entry(&self, id: i64) -> Result<(), TimesheetError> {
        self.ensure_online()?;
        self.tables
            .write()
            .await
            .entries
            .remove(&id)
            .map(|_| ())
            .ok_or(TimesheetError::NotFound)
    }

    async fn stats(&self, timesheet_id: i64) -> Result<TimesheetStats, TimesheetError> {
        self.ensure_online()?;
        let tables = self.tables.read().await;
        let stats = tables
            .entries
            .values()
            .filter(|entry| entry.timesheet_id == timesheet_id)
            .fold(TimesheetStats::default(), |mut acc, entry| {
                if let Some(hours) = entry.total_hours {
                    acc.days_filled += 1;
                    acc.total_hours += hours;
                }
                acc.overtime_hours += entry.overtime_hours.unwrap_or_default();
                acc
            });
        Ok(TimesheetStats {
            total_hours: round2(stats.total_hours),
            overtime_hours: round2(stats.overtime_hours),
            ..stats
        })
    }

    async fn ping(&self) -> Result<(), TimesheetError> {
        self.ensure_online()
    }
}

#[cfg(test)]
mod in_memory_timesheet_repository_tests {
    use super::*;
    use crate::tests::fixtures::timesheets::{TimesheetBuilder, entry_on};
    use rstest::{fixture, rstest};

    #[fixture]
    fn repository() -> InMemoryTimesheetRepository {
        InMemoryTimesheetRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_assign_ids_and_created_at_on_create(
        repository: InMemoryTimesheetRepository,
    ) {
        let mut first = TimesheetBuilder::new().build();
        let mut second = TimesheetBuilder::new().month(4).build();
        let first_id = repository.create(&mut first).await.unwrap();
        let second_id = repository.create(&mut second).await.unwrap();
        assert_eq!((first_id, second_id), (1, 2));
        assert_eq!(first.id, 1);
        assert!(first.created_at > chrono::DateTime::<Utc>::default());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_a_second_timesheet_for_the_same_period(
        repository: InMemoryTimesheetRepository,
    ) {
        repository
            .create(&mut TimesheetBuilder::new().build())
            .await
            .unwrap();
        let result = repository.create(&mut TimesheetBuilder::new().build()).await;
        assert_eq!(result, Err(TimesheetError::Duplicate));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_entry_for_an_unknown_timesheet(
        repository: InMemoryTimesheetRepository,
    ) {
        let mut entry = entry_on(99, "2024-03-01");
        assert_eq!(
            repository.add_entry(&mut entry).await,
            Err(TimesheetError::NotFound)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_cascade_entries_on_delete(repository: InMemoryTimesheetRepository) {
        let mut timesheet = TimesheetBuilder::new().build();
        let id = repository.create(&mut timesheet).await.unwrap();
        let entry_id = repository
            .add_entry(&mut entry_on(id, "2024-03-01"))
            .await
            .unwrap();
        repository.delete(id).await.unwrap();
        assert_eq!(
            repository.delete_entry(entry_id).await,
            Err(TimesheetError::NotFound)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_keep_the_stored_date_when_the_update_omits_it(
        repository: InMemoryTimesheetRepository,
    ) {
        let id = repository
            .create(&mut TimesheetBuilder::new().build())
            .await
            .unwrap();
        let entry_id = repository
            .add_entry(&mut entry_on(id, "2024-03-01"))
            .await
            .unwrap();
        let draft = EntryDraft {
            remarks: "WFH".into(),
            ..EntryDraft::default()
        };
        repository.update_entry(entry_id, &draft).await.unwrap();
        let stored = repository.find_by_id(id).await.unwrap();
        assert_eq!(stored.entries[0].work_date.to_string(), "2024-03-01");
        assert_eq!(stored.entries[0].remarks, "WFH");
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_if_the_repository_is_offline(
        mut repository: InMemoryTimesheetRepository,
    ) {
        repository.toggle_offline();
        let result = repository.list(&TimesheetFilter::default()).await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Timesheet repository offline")
        );
        assert!(repository.ping().await.is_err());
    }
}
