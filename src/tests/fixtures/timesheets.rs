// Shared test fixtures for timesheets and entries.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Deserialize;

use crate::modules::timesheets::core::parsing::parse_date;
use crate::modules::timesheets::core::timesheet::{EntryDraft, Timesheet, TimesheetEntry};

// JSON -> DTO (transport shape)
#[derive(Debug, Clone, Deserialize)]
pub struct TimesheetDto {
    pub employee_name: String,
    pub department: String,
    pub month: i32,
    pub year: i32,
    pub total_working_days: Option<i32>,
}

pub struct TimesheetBuilder {
    inner: Timesheet,
}

impl Default for TimesheetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimesheetBuilder {
    pub fn new() -> Self {
        let dto: TimesheetDto = serde_json::from_str(include_str!("json/timesheet.json")).unwrap();

        Self {
            inner: Timesheet {
                employee_name: dto.employee_name,
                department: dto.department,
                month: dto.month,
                year: dto.year,
                total_working_days: dto.total_working_days,
                ..Timesheet::default()
            },
        }
    }

    pub fn id(mut self, v: i64) -> Self {
        self.inner.id = v;
        self
    }

    pub fn employee_name(mut self, v: impl Into<String>) -> Self {
        self.inner.employee_name = v.into();
        self
    }

    pub fn department(mut self, v: impl Into<String>) -> Self {
        self.inner.department = v.into();
        self
    }

    pub fn month(mut self, v: i32) -> Self {
        self.inner.month = v;
        self
    }

    pub fn year(mut self, v: i32) -> Self {
        self.inner.year = v;
        self
    }

    pub fn total_working_days(mut self, v: Option<i32>) -> Self {
        self.inner.total_working_days = v;
        self
    }

    pub fn build(self) -> Timesheet {
        self.inner
    }
}

pub fn time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").ok()
}

pub fn draft_on(date: &str) -> EntryDraft {
    EntryDraft {
        work_date: Some(parse_date(date).unwrap()),
        ..EntryDraft::default()
    }
}

pub fn entry_on(timesheet_id: i64, date: &str) -> TimesheetEntry {
    TimesheetEntry {
        id: 0,
        timesheet_id,
        work_date: parse_date(date).unwrap(),
        start_time: None,
        end_time: None,
        total_hours: None,
        overtime_hours: None,
        remarks: String::new(),
        created_at: DateTime::<Utc>::default(),
    }
}

#[cfg(test)]
mod timesheet_builder_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_delegates_to_new_and_parses_json() {
        let built = TimesheetBuilder::default().build();
        assert_eq!(built.id, 0);
        assert_eq!(built.employee_name, "Budi Santoso");
        assert_eq!(built.department, "Engineering");
        assert_eq!((built.month, built.year), (3, 2024));
        assert_eq!(built.total_working_days, Some(21));
        assert!(built.entries.is_empty());
    }

    #[rstest]
    fn setters_override_all_fields_and_build_returns_inner() {
        let custom = TimesheetBuilder::new()
            .id(7)
            .employee_name("Sari")
            .department("Finance")
            .month(12)
            .year(2023)
            .total_working_days(None)
            .build();

        assert_eq!(custom.id, 7);
        assert_eq!(custom.employee_name, "Sari");
        assert_eq!(custom.department, "Finance");
        assert_eq!((custom.month, custom.year), (12, 2023));
        assert_eq!(custom.total_working_days, None);
    }
}
