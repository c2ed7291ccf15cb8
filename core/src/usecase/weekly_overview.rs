use chrono::NaiveDate;

use crate::date::{add_days, to_key, week_window};
use crate::repository::KeyValueStore;
use crate::service::aggregate::{day_summary, weekly_summary};
use crate::service::dto::WeekOverview;
use crate::service::planner_store::PlannerStore;

pub fn previous_week(anchor: NaiveDate) -> NaiveDate {
    add_days(anchor, -7)
}

pub fn next_week(anchor: NaiveDate) -> NaiveDate {
    add_days(anchor, 7)
}

/// Reads the seven days around an anchor date through `get_day`, so the
/// store's current day and dirty state are left alone.
pub struct WeeklyOverviewUseCase<'a, S: KeyValueStore> {
    store: &'a PlannerStore<S>,
}

impl<'a, S: KeyValueStore> WeeklyOverviewUseCase<'a, S> {
    pub fn new(store: &'a PlannerStore<S>) -> Self {
        Self { store }
    }

    pub fn overview(&self, anchor: NaiveDate) -> WeekOverview {
        let records: Vec<_> = week_window(anchor)
            .iter()
            .map(|key| self.store.get_day(key))
            .collect();

        let days = records.iter().map(|r| day_summary(r)).collect();
        let summary = weekly_summary(records.iter().map(|r| r.as_ref()));

        WeekOverview {
            anchor: to_key(anchor),
            days,
            summary,
        }
    }
}
