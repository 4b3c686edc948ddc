use std::sync::Arc;

use tracing::debug;

use crate::modules::timesheets::core::errors::TimesheetError;
use crate::modules::timesheets::core::hours::round2;
use crate::modules::timesheets::core::ports::TimesheetRepository;
use crate::modules::timesheets::core::timesheet::{
    EntryDraft, Timesheet, TimesheetFilter, TimesheetStats,
};

const MONTHS: std::ops::RangeInclusive<i32> = 1..=12;
const YEARS: std::ops::RangeInclusive<i32> = 1900..=2100;
// Hour columns are NUMERIC(6, 2).
const HOURS_LIMIT: f64 = 10_000.0;

/// Validates requests and derives computed values before delegating to storage.
#[derive(Clone)]
pub struct TimesheetService {
    repository: Arc<dyn TimesheetRepository>,
}

impl TimesheetService {
    pub fn new(repository: Arc<dyn TimesheetRepository>) -> Self {
        Self { repository }
    }

    pub async fn create_timesheet(&self, timesheet: &mut Timesheet) -> Result<i64, TimesheetError> {
        validate_header(timesheet)?;
        let id = self.repository.create(timesheet).await?;
        debug!(id, employee = %timesheet.employee_name, "timesheet created");
        Ok(id)
    }

    pub async fn get_timesheet(&self, id: i64) -> Result<Timesheet, TimesheetError> {
        self.repository.find_by_id(id).await
    }

    pub async fn list_timesheets(
        &self,
        filter: &TimesheetFilter,
    ) -> Result<Vec<Timesheet>, TimesheetError> {
        self.repository.list(filter).await
    }

    pub async fn update_timesheet(&self, timesheet: &Timesheet) -> Result<(), TimesheetError> {
        if timesheet.id == 0 {
            return Err(TimesheetError::invalid("timesheet id is required"));
        }
        validate_header(timesheet)?;
        self.repository.update(timesheet).await?;
        debug!(id = timesheet.id, "timesheet updated");
        Ok(())
    }

    pub async fn delete_timesheet(&self, id: i64) -> Result<(), TimesheetError> {
        self.repository.delete(id).await?;
        debug!(id, "timesheet deleted");
        Ok(())
    }

    pub async fn add_entry(
        &self,
        timesheet_id: i64,
        mut draft: EntryDraft,
    ) -> Result<i64, TimesheetError> {
        if timesheet_id == 0 {
            return Err(TimesheetError::invalid("timesheet id is required"));
        }
        let Some(work_date) = draft.work_date else {
            return Err(TimesheetError::invalid("work date is required"));
        };
        prepare_hours(&mut draft)?;
        let mut entry = draft.into_entry(timesheet_id, work_date);
        let id = self.repository.add_entry(&mut entry).await?;
        debug!(id, timesheet_id, %work_date, "entry added");
        Ok(id)
    }

    pub async fn update_entry(&self, id: i64, mut draft: EntryDraft) -> Result<(), TimesheetError> {
        if id == 0 {
            return Err(TimesheetError::invalid("entry id is required"));
        }
        prepare_hours(&mut draft)?;
        self.repository.update_entry(id, &draft).await?;
        debug!(id, "entry updated");
        Ok(())
    }

    pub async fn delete_entry(&self, id: i64) -> Result<(), TimesheetError> {
        self.repository.delete_entry(id).await?;
        debug!(id, "entry deleted");
        Ok(())
    }

    pub async fn stats(&self, timesheet_id: i64) -> Result<TimesheetStats, TimesheetError> {
        let stats = self.repository.stats(timesheet_id).await?;
        Ok(TimesheetStats {
            days_filled: stats.days_filled,
            total_hours: round2(stats.total_hours),
            overtime_hours: round2(stats.overtime_hours),
        })
    }

    pub async fn ping(&self) -> Result<(), TimesheetError> {
        self.repository.ping().await
    }
}

fn validate_header(timesheet: &Timesheet) -> Result<(), TimesheetError> {
    if timesheet.employee_name.trim().is_empty() {
        return Err(TimesheetError::invalid("employee name is required"));
    }
    if !MONTHS.contains(&timesheet.month) {
        return Err(TimesheetError::invalid("month must be between 1 and 12"));
    }
    if !YEARS.contains(&timesheet.year) {
        return Err(TimesheetError::invalid("year must be between 1900 and 2100"));
    }
    if timesheet.total_working_days.is_some_and(|days| days <= 0) {
        return Err(TimesheetError::invalid("total working days must be a positive number"));
    }
    Ok(())
}

/// Derives missing total hours, then rounds both hour fields to the stored precision.
fn prepare_hours(draft: &mut EntryDraft) -> Result<(), TimesheetError> {
    draft.derive_total_hours();
    draft.total_hours = draft.total_hours.map(round2);
    draft.overtime_hours = draft.overtime_hours.map(round2);
    let out_of_range = [draft.total_hours, draft.overtime_hours]
        .into_iter()
        .flatten()
        .any(|hours| !hours.is_finite() || hours.abs() >= HOURS_LIMIT);
    if out_of_range {
        return Err(TimesheetError::invalid("hours must be below 10000"));
    }
    Ok(())
}
