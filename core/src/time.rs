use anyhow::{anyhow, Result};
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};

use crate::date::{checked_add_days, from_key};

pub const CLOCK_FORMAT: &str = "%H:%M";

/// Selected dates keep this much room on both sides so the week views around
/// them stay inside the calendar range.
const RANGE_MARGIN_DAYS: i64 = 31;

/// Parses an `HH:MM` wall-clock time. Blank or malformed input yields `None`.
pub fn parse_clock(input: &str) -> Option<NaiveTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(input, CLOCK_FORMAT).ok()
}

/// Minutes since midnight for an `HH:MM` string.
pub fn clock_minutes(input: &str) -> Option<i64> {
    parse_clock(input).map(|t| (t.hour() * 60 + t.minute()) as i64)
}

/// Resolves a date selector relative to `today`.
///
/// Accepts `today`/`tod`, `tomorrow`/`tom`, `yesterday`/`yes`, relative offsets
/// (`+3d`, `-1w`), weekday names meaning the most recent such day (`fri`,
/// `2:fri` for the one before that) and plain `YYYY-MM-DD` keys.
pub fn parse_human_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let date = resolve_date(input, today)?;
    let fits = checked_add_days(date, -RANGE_MARGIN_DAYS).is_some()
        && checked_add_days(date, RANGE_MARGIN_DAYS).is_some();
    if !fits {
        return Err(out_of_range(input));
    }
    Ok(date)
}

fn resolve_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let lowered = input.trim().to_lowercase();

    match lowered.as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return shift(today, 1, input),
        "yesterday" | "yes" => return shift(today, -1, input),
        _ => {}
    }

    if let Some(date) = from_key(&lowered) {
        return Ok(date);
    }

    if lowered.starts_with('+') || lowered.starts_with('-') {
        return parse_offset(&lowered, today);
    }

    if let Some((count, day_str)) = parse_weekday_token(&lowered) {
        if let Ok(target) = parse_weekday_str(day_str) {
            let mut days_back = today.weekday().num_days_from_sunday() as i64
                - target.num_days_from_sunday() as i64;
            if days_back < 0 {
                days_back += 7;
            }
            let days_back = (count - 1)
                .checked_mul(7)
                .and_then(|weeks| weeks.checked_add(days_back))
                .ok_or_else(|| out_of_range(input))?;
            return shift(today, -days_back, input);
        }
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn parse_offset(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let (sign, rest) = input.split_at(1);
    if rest.len() < 2 {
        return Err(anyhow!("Invalid relative format: {}", input));
    }
    let (num_str, unit) = rest.split_at(rest.len() - 1);
    let mut count: i64 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: {}", input))?;
    if sign == "-" {
        count = count.checked_neg().ok_or_else(|| out_of_range(input))?;
    }

    let days = match unit {
        "d" => count,
        "w" => count.checked_mul(7).ok_or_else(|| out_of_range(input))?,
        _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
    };
    shift(today, days, input)
}

fn shift(date: NaiveDate, days: i64, input: &str) -> Result<NaiveDate> {
    checked_add_days(date, days).ok_or_else(|| out_of_range(input))
}

fn out_of_range(input: &str) -> anyhow::Error {
    anyhow!("Date out of range: {}", input)
}

fn parse_weekday_token(input: &str) -> Option<(i64, &str)> {
    if input.contains(':') {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() == 2 {
            if let Ok(count) = parts[0].parse::<i64>() {
                if count >= 1 {
                    return Some((count, parts[1]));
                }
            }
        }
    } else {
        return Some((1, input));
    }
    None
}

fn parse_weekday_str(s: &str) -> Result<Weekday> {
    match s {
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        "sun" | "sunday" => Ok(Weekday::Sun),
        _ => Err(anyhow!("Invalid weekday")),
    }
}
