use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};

use crate::internal_error::{InternalError, InternalResult};

pub const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Strict `YYYY-MM-DD`: chrono alone would also take unpadded months and days.
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    if text.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(text, CALENDAR_DATE_FORMAT).ok()
}

pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(CALENDAR_DATE_FORMAT).to_string()
}

/// Midnight UTC of a calendar date, the instant tracker start and goal dates are stored as.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Tracker start and goal dates arrive as calendar dates; `field` names the offending key.
pub fn parse_tracker_date(text: &str, field: &str) -> InternalResult<DateTime<Utc>> {
    parse_calendar_date(text).map(start_of_day).ok_or_else(|| {
        InternalError::bad_request(format!("Invalid {} format. Use YYYY-MM-DD", field))
    })
}

/// Entry dates are either full RFC 3339 instants or bare calendar dates. A bare
/// date takes the time-of-day of `now` in local time. The result is always UTC.
pub fn parse_entry_date(text: &str, now: DateTime<Local>) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    let date = parse_calendar_date(text)?;
    let local = date.and_time(now.time());

    match Local.from_local_datetime(&local).earliest() {
        Some(instant) => Some(instant.with_timezone(&Utc)),
        // Skipped by a DST transition
        None => Some(Utc.from_utc_datetime(&local)),
    }
}

pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
