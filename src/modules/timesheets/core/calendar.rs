// Indonesian calendar names, as printed on the paper timesheet.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

pub fn day_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

/// Month name for 1..=12, `Bulan-{n}` for anything else.
pub fn month_name(month: i32) -> String {
    usize::try_from(month)
        .ok()
        .and_then(|m| m.checked_sub(1))
        .and_then(|index| MONTH_NAMES.get(index))
        .map(|name| (*name).to_string())
        .unwrap_or_else(|| format!("Bulan-{month}"))
}
