//! Derived figures for a day or a week. Daily and weekly views both go
//! through these so a quantity is only ever computed one way.

use crate::date::from_key;
use crate::model::entry::RowEntry;
use crate::model::record::{DailyRecord, SleepInterval};
use crate::service::dto::{DaySummary, WeeklySummary};
use crate::time::clock_minutes;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Minutes from `start` to `end`, wrapping past midnight when `end <= start`.
fn span_minutes(start: &str, end: &str) -> Option<i64> {
    let start = clock_minutes(start)?;
    let end = clock_minutes(end)?;
    let mut diff = end - start;
    if diff <= 0 {
        diff += MINUTES_PER_DAY;
    }
    Some(diff)
}

/// Time asleep: the sleep window minus every complete pause, floored at zero.
///
/// An unset start or end gives 0. Pauses missing either end are skipped.
pub fn sleep_minutes(sleep: &SleepInterval) -> i64 {
    let (Some(start), Some(end)) = (sleep.start.as_deref(), sleep.end.as_deref()) else {
        return 0;
    };
    let Some(total) = span_minutes(start, end) else {
        return 0;
    };

    let paused: i64 = sleep
        .pauses
        .iter()
        .filter_map(|p| span_minutes(&p.start, &p.end))
        .sum();

    (total - paused).max(0)
}

pub fn format_duration(minutes: i64) -> String {
    if minutes <= 0 {
        return "—".to_string();
    }
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// Reads a number out of free text, ignoring separators and currency marks.
/// Anything that still doesn't parse counts as zero.
pub fn parse_amount(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

pub fn numeric_total<'a, I>(rows: I) -> f64
where
    I: IntoIterator<Item = &'a RowEntry>,
{
    rows.into_iter().map(|r| parse_amount(&r.value)).sum()
}

pub fn total_calories(record: &DailyRecord) -> f64 {
    numeric_total(record.meals.all_rows())
}

pub fn total_costs(record: &DailyRecord) -> f64 {
    numeric_total(&record.costs)
}

pub fn day_summary(record: &DailyRecord) -> DaySummary {
    let weekday = from_key(&record.date_key)
        .map(|d| d.format("%a").to_string())
        .unwrap_or_default();

    DaySummary {
        date_key: record.date_key.clone(),
        weekday,
        water_done: record.water_cups.done_count(),
        todos_done: record.todos.iter().filter(|t| t.done).count(),
        todos_total: record.todos.len(),
        habits_done: record.habits.iter().filter(|h| h.checked).count(),
        habits_total: record.habits.len(),
        cleaning_done: record.cleaning_items.iter().filter(|c| c.done).count(),
        cleaning_total: record.cleaning_items.len(),
        sleep_minutes: sleep_minutes(&record.sleep),
        calories: total_calories(record),
        costs: total_costs(record),
        mood: record.mood,
    }
}

/// Component-wise sums over a week of records.
pub fn weekly_summary<'a, I>(records: I) -> WeeklySummary
where
    I: IntoIterator<Item = &'a DailyRecord>,
{
    let mut summary = WeeklySummary {
        water_total: WeeklySummary::WATER_TOTAL,
        ..Default::default()
    };

    for record in records {
        let day = day_summary(record);
        summary.sleep_minutes += day.sleep_minutes;
        summary.calories += day.calories;
        summary.costs += day.costs;
        summary.todos_done += day.todos_done;
        summary.todos_total += day.todos_total;
        summary.habits_done += day.habits_done;
        summary.habits_total += day.habits_total;
        summary.water_done += day.water_done;
    }

    summary
}
