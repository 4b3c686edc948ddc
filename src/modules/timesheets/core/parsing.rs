// Text to calendar value conversions used at the edge of the service.
//
// Dates are strict ISO `YYYY-MM-DD`. Times accept `HH:MM:SS` and `HH:MM`.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

use crate::modules::timesheets::core::errors::TimesheetError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S";
const SHORT_TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date {0:?}, expected YYYY-MM-DD")]
pub struct DateFormatError(pub String);

pub fn parse_date(value: &str) -> Result<NaiveDate, DateFormatError> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| DateFormatError(value.to_string()))?;
    // chrono tolerates unpadded fields; the wire format does not.
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(DateFormatError(value.to_string()));
    }
    Ok(date)
}

/// Parses a time of day. An empty string means "no value".
pub fn parse_time(value: &str) -> Result<Option<NaiveTime>, TimesheetError> {
    if value.is_empty() {
        return Ok(None);
    }
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(value, SHORT_TIME_FORMAT))
        .map(Some)
        .map_err(|_| TimesheetError::invalid(format!("time {value:?} must be HH:MM or HH:MM:SS")))
}
