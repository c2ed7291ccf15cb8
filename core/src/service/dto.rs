use serde::{Deserialize, Serialize};

use crate::model::record::{Mood, WATER_CUPS};

/// Per-day figures shown on a weekly overview card.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DaySummary {
    pub date_key: String, // YYYY-MM-DD
    pub weekday: String,  // Sun, Mon...
    pub water_done: usize,
    pub todos_done: usize,
    pub todos_total: usize,
    pub habits_done: usize,
    pub habits_total: usize,
    pub cleaning_done: usize,
    pub cleaning_total: usize,
    pub sleep_minutes: i64,
    pub calories: f64,
    pub costs: f64,
    pub mood: Option<Mood>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct WeeklySummary {
    pub sleep_minutes: i64,
    pub calories: f64,
    pub costs: f64,
    pub todos_done: usize,
    pub todos_total: usize,
    pub habits_done: usize,
    pub habits_total: usize,
    pub water_done: usize,
    pub water_total: usize,
}

impl WeeklySummary {
    pub const WATER_TOTAL: usize = WATER_CUPS * 7;
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeekOverview {
    pub anchor: String,
    pub days: Vec<DaySummary>,
    pub summary: WeeklySummary,
}
