use chrono::{Datelike, Duration, Local, NaiveDate};

pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Canonical `YYYY-MM-DD` key for a calendar date.
pub fn to_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Inverse of [`to_key`]. Returns `None` for anything that isn't a valid key.
pub fn from_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_KEY_FORMAT).ok()
}

/// Calendar arithmetic over whole days.
///
/// Panics when the result leaves chrono's supported range; untrusted offsets
/// go through [`checked_add_days`].
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    date + Duration::days(n)
}

pub fn checked_add_days(date: NaiveDate, n: i64) -> Option<NaiveDate> {
    Duration::try_days(n).and_then(|d| date.checked_add_signed(d))
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_key() -> String {
    to_key(today())
}

/// Sunday that starts the week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    add_days(date, -(date.weekday().num_days_from_sunday() as i64))
}

/// The seven keys of the Sunday-first week containing `date`, ascending.
pub fn week_window(date: NaiveDate) -> Vec<String> {
    let start = week_start(date);
    (0..7).map(|i| to_key(add_days(start, i))).collect()
}
