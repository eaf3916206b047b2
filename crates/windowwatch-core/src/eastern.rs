//! US Eastern wall-clock display using fixed offsets.
//!
//! There is no timezone database here. Daylight time runs from the second
//! Sunday of March to the first Sunday of November, and both switches happen
//! at midnight on the standard-offset calendar rather than at 2:00 AM local.
//! Output near the real transitions differs from tzdata by up to two hours.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc, Weekday};

pub const STANDARD_OFFSET_HOURS: i64 = -5;
pub const DAYLIGHT_OFFSET_HOURS: i64 = -4;

/// Whether `now` falls in the simplified daylight period.
pub fn is_daylight(now: DateTime<Utc>) -> bool {
    let standard = now.naive_utc() + Duration::hours(STANDARD_OFFSET_HOURS);
    let year = standard.year();

    let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2);
    let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1);

    match (start, end) {
        (Some(start), Some(end)) => {
            standard >= start.and_time(NaiveTime::MIN) && standard < end.and_time(NaiveTime::MIN)
        }
        _ => false,
    }
}

pub fn offset_hours(now: DateTime<Utc>) -> i64 {
    if is_daylight(now) {
        DAYLIGHT_OFFSET_HOURS
    } else {
        STANDARD_OFFSET_HOURS
    }
}

pub fn zone_abbrev(now: DateTime<Utc>) -> &'static str {
    if is_daylight(now) {
        "EDT"
    } else {
        "EST"
    }
}

/// Eastern wall-clock time for `now`.
pub fn local(now: DateTime<Utc>) -> NaiveDateTime {
    now.naive_utc() + Duration::hours(offset_hours(now))
}

/// `Tue, Sep 23, 2025, 3:04:05 PM EDT`
pub fn format(now: DateTime<Utc>) -> String {
    format!(
        "{} {}",
        local(now).format("%a, %b %-d, %Y, %-I:%M:%S %p"),
        zone_abbrev(now)
    )
}

/// `Sep 23, 2025 • 12:00 PM ET`, used when describing a window bound.
pub fn format_bound(instant: DateTime<Utc>) -> String {
    let local = local(instant);
    format!(
        "{} • {} ET",
        local.format("%b %-d, %Y"),
        local.format("%-I:%M %p")
    )
}
