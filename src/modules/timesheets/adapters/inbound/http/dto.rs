// Wire shapes of the timesheet endpoints and their conversions.

use axum::extract::Path;
use axum::extract::rejection::PathRejection;
use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::modules::timesheets::adapters::inbound::http::error::ApiError;
use crate::modules::timesheets::core::calendar::day_name;
use crate::modules::timesheets::core::parsing::{parse_date, parse_time};
use crate::modules::timesheets::core::timesheet::{
    EntryDraft, Timesheet, TimesheetEntry, TimesheetFilter, TimesheetStats,
};

const TIME_FORMAT: &str = "%H:%M:%S";

/// Resource ids are positive integers; anything else is a bad request.
pub fn resource_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = path?;
    if id <= 0 {
        return Err(ApiError::bad_request(
            "id",
            "must be a positive integer",
            "Invalid id",
        ));
    }
    Ok(id)
}

#[derive(Debug, Deserialize)]
pub struct TimesheetBody {
    pub employee_name: String,
    #[serde(default)]
    pub department: String,
    pub month: i32,
    pub year: i32,
    pub total_working_days: Option<i32>,
}

impl TimesheetBody {
    pub fn into_timesheet(self, id: i64) -> Timesheet {
        Timesheet {
            id,
            employee_name: self.employee_name,
            department: self.department,
            month: self.month,
            year: self.year,
            total_working_days: self.total_working_days,
            ..Timesheet::default()
        }
    }
}

/// List query. Month and year that do not parse as numbers are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct TimesheetQuery {
    pub employee_name: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl From<TimesheetQuery> for TimesheetFilter {
    fn from(query: TimesheetQuery) -> Self {
        let number = |value: Option<String>| value.and_then(|v| v.trim().parse().ok());
        Self {
            employee_name: query.employee_name.filter(|name| !name.is_empty()),
            month: number(query.month),
            year: number(query.year),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EntryBody {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub total_hours: Option<f64>,
    pub overtime_hours: Option<f64>,
    #[serde(default)]
    pub remarks: String,
}

impl EntryBody {
    /// Parses the textual fields. An absent or empty date stays `None`.
    pub fn into_draft(self) -> Result<EntryDraft, ApiError> {
        let work_date = match self.date.as_deref().filter(|d| !d.is_empty()) {
            None => None,
            Some(date) => Some(parse_date(date).map_err(|_| {
                ApiError::bad_request("date", "format YYYY-MM-DD", "Invalid date")
            })?),
        };
        Ok(EntryDraft {
            work_date,
            start_time: entry_time(self.start_time, "start_time", "Invalid start_time")?,
            end_time: entry_time(self.end_time, "end_time", "Invalid end_time")?,
            total_hours: self.total_hours,
            overtime_hours: self.overtime_hours,
            remarks: self.remarks,
        })
    }
}

/// Accepts `08.30` as a spelling of `08:30`.
pub fn normalize_time_separator(value: &str) -> String {
    value.replace('.', ":")
}

fn entry_time(
    value: Option<String>,
    field: &'static str,
    summary: &'static str,
) -> Result<Option<NaiveTime>, ApiError> {
    let normalized = normalize_time_separator(value.as_deref().unwrap_or_default());
    parse_time(&normalized)
        .map_err(|_| ApiError::bad_request(field, "format HH:MM or HH:MM:SS", summary))
}

#[derive(Debug, Serialize)]
pub struct IdResponse {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct TimesheetListItem {
    pub id: i64,
    pub employee_name: String,
    pub department: String,
    pub month: i32,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_working_days: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<&Timesheet> for TimesheetListItem {
    fn from(timesheet: &Timesheet) -> Self {
        Self {
            id: timesheet.id,
            employee_name: timesheet.employee_name.clone(),
            department: timesheet.department.clone(),
            month: timesheet.month,
            year: timesheet.year,
            total_working_days: timesheet.total_working_days,
            created_at: timesheet.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub days_filled: i64,
    pub total_hours: f64,
    pub overtime_hours: f64,
}

impl From<TimesheetStats> for SummaryResponse {
    fn from(stats: TimesheetStats) -> Self {
        Self {
            days_filled: stats.days_filled,
            total_hours: stats.total_hours,
            overtime_hours: stats.overtime_hours,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntryResponse {
    pub id: i64,
    pub date: String,
    pub day_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overtime_hours: Option<f64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub remarks: String,
}

impl From<&TimesheetEntry> for EntryResponse {
    fn from(entry: &TimesheetEntry) -> Self {
        let time = |t: Option<NaiveTime>| t.map(|t| t.format(TIME_FORMAT).to_string());
        Self {
            id: entry.id,
            date: entry.work_date.format("%Y-%m-%d").to_string(),
            day_name: day_name(entry.work_date),
            start_time: time(entry.start_time),
            end_time: time(entry.end_time),
            total_hours: entry.total_hours,
            overtime_hours: entry.overtime_hours,
            remarks: entry.remarks.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimesheetDetail {
    #[serde(flatten)]
    pub timesheet: TimesheetListItem,
    pub summary: SummaryResponse,
    pub entries: Vec<EntryResponse>,
}

impl TimesheetDetail {
    pub fn new(timesheet: &Timesheet, stats: TimesheetStats) -> Self {
        Self {
            timesheet: TimesheetListItem::from(timesheet),
            summary: stats.into(),
            entries: timesheet.entries.iter().map(EntryResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod dto_tests {
    use super::*;
    use crate::tests::fixtures::timesheets::{entry_on, time};
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case("08.30", "08:30")]
    #[case("17:45:10", "17:45:10")]
    #[case("", "")]
    fn it_should_normalize_dots_to_colons(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_time_separator(raw), expected);
    }

    #[rstest]
    fn it_should_parse_dotted_times_like_colon_times() {
        let dotted = EntryBody {
            date: Some("2024-03-15".into()),
            start_time: Some("08.30".into()),
            ..EntryBody::default()
        };
        let coloned = EntryBody {
            date: Some("2024-03-15".into()),
            start_time: Some("08:30".into()),
            ..EntryBody::default()
        };
        assert_eq!(dotted.into_draft().unwrap(), coloned.into_draft().unwrap());
    }

    #[rstest]
    #[case(EntryBody { date: Some("15/03/2024".into()), ..EntryBody::default() }, "date")]
    #[case(EntryBody { start_time: Some("25:00".into()), ..EntryBody::default() }, "start_time")]
    #[case(EntryBody { end_time: Some("noon".into()), ..EntryBody::default() }, "end_time")]
    fn it_should_name_the_offending_field(#[case] body: EntryBody, #[case] expected: &str) {
        match body.into_draft() {
            Err(ApiError::BadRequest { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected a bad request, got {other:?}"),
        }
    }

    #[rstest]
    fn it_should_leave_an_empty_date_unset() {
        let body = EntryBody {
            date: Some(String::new()),
            ..EntryBody::default()
        };
        assert_eq!(body.into_draft().unwrap().work_date, None);
    }

    #[rstest]
    fn it_should_ignore_unparsable_query_numbers() {
        let filter = TimesheetFilter::from(TimesheetQuery {
            employee_name: Some(String::new()),
            month: Some("march".into()),
            year: Some("2024".into()),
        });
        assert_eq!(
            filter,
            TimesheetFilter {
                employee_name: None,
                month: None,
                year: Some(2024)
            }
        );
    }

    #[rstest]
    fn it_should_serialize_entries_with_day_names_and_full_times() {
        let mut entry = entry_on(1, "2024-03-15");
        entry.id = 9;
        entry.start_time = time("08:00");
        entry.total_hours = Some(8.0);

        let value = serde_json::to_value(EntryResponse::from(&entry)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": 9,
                "date": "2024-03-15",
                "day_name": "Jumat",
                "start_time": "08:00:00",
                "total_hours": 8.0
            })
        );
    }
}
