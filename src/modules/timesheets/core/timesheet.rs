// Timesheet aggregate: the monthly header and its daily entries.
//
// Purpose
// - Plain data shared by the service, the storage adapters and the transport.
//
// Boundaries
// - No input or output here. Validation lives in the application service.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::modules::timesheets::core::hours::hours_between;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Timesheet {
    pub id: i64,
    pub employee_name: String,
    pub department: String,
    pub month: i32,
    pub year: i32,
    pub total_working_days: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub entries: Vec<TimesheetEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimesheetEntry {
    pub id: i64,
    pub timesheet_id: i64,
    pub work_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub total_hours: Option<f64>,
    pub overtime_hours: Option<f64>,
    pub remarks: String,
    pub created_at: DateTime<Utc>,
}

/// Caller supplied entry fields, before the service validates them.
///
/// `work_date` is optional so an update can keep the stored date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntryDraft {
    pub work_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub total_hours: Option<f64>,
    pub overtime_hours: Option<f64>,
    pub remarks: String,
}

impl EntryDraft {
    /// Fills `total_hours` from the start and end time when it was not given.
    pub fn derive_total_hours(&mut self) {
        if self.total_hours.is_some() {
            return;
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            self.total_hours = Some(hours_between(start, end));
        }
    }

    pub fn into_entry(self, timesheet_id: i64, work_date: NaiveDate) -> TimesheetEntry {
        TimesheetEntry {
            id: 0,
            timesheet_id,
            work_date,
            start_time: self.start_time,
            end_time: self.end_time,
            total_hours: self.total_hours,
            overtime_hours: self.overtime_hours,
            remarks: self.remarks,
            created_at: DateTime::<Utc>::default(),
        }
    }
}

/// Conjunctive list filter. `None` imposes no constraint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimesheetFilter {
    pub employee_name: Option<String>,
    pub month: Option<i32>,
    pub year: Option<i32>,
}

impl TimesheetFilter {
    pub fn matches(&self, timesheet: &Timesheet) -> bool {
        self.employee_name
            .as_deref()
            .is_none_or(|name| timesheet.employee_name == name)
            && self.month.is_none_or(|month| timesheet.month == month)
            && self.year.is_none_or(|year| timesheet.year == year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimesheetStats {
    pub days_filled: i64,
    pub total_hours: f64,
    pub overtime_hours: f64,
}
