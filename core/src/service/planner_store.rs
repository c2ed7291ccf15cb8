use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::date::today_key;
use crate::error::StorageError;
use crate::model::database::PlannerDatabase;
use crate::model::entry::{
    new_id, CleaningItem, CleaningPatch, Entry, HabitEntry, HabitPatch, PausePatch, RowEntry,
    RowPatch, SleepPause, TodoEntry, TodoPatch,
};
use crate::model::record::{DailyRecord, MealSlot, Mood, NoteField};
use crate::repository::{KeyValueStore, LoadSource, PlannerRepository};
use crate::service::aggregate;
use crate::service::collection::{self, Direction};
use crate::service::dto::DaySummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    /// Freshly loaded, nothing changed yet.
    Loaded,
    /// In-memory changes not yet written.
    Dirty,
    Saved,
}

/// Owns the in-memory planner database for one session.
///
/// Every mutation builds a new record for the current day and a new database
/// around it; records of other days are shared, never copied or modified.
/// Nothing is written until [`PlannerStore::save_now`].
pub struct PlannerStore<S: KeyValueStore> {
    repo: PlannerRepository<S>,
    db: Arc<PlannerDatabase>,
    date_key: String,
    status: StoreStatus,
    last_saved_at: Option<DateTime<Utc>>,
    load_source: LoadSource,
}

impl<S: KeyValueStore> PlannerStore<S> {
    pub fn open(repo: PlannerRepository<S>, date_key: impl Into<String>) -> Self {
        let (db, load_source) = repo.load_with_source();
        Self {
            repo,
            db: Arc::new(db),
            date_key: date_key.into(),
            status: StoreStatus::Loaded,
            last_saved_at: None,
            load_source,
        }
    }

    pub fn open_today(repo: PlannerRepository<S>) -> Self {
        Self::open(repo, today_key())
    }

    pub fn date_key(&self) -> &str {
        &self.date_key
    }

    /// Switches the current day. Does not touch dirty state.
    pub fn set_date(&mut self, date_key: impl Into<String>) {
        self.date_key = date_key.into();
    }

    pub fn day(&self) -> Arc<DailyRecord> {
        self.db.day(&self.date_key)
    }

    /// Read-only access to any day without switching the current one.
    pub fn get_day(&self, date_key: &str) -> Arc<DailyRecord> {
        self.db.day(date_key)
    }

    pub fn database(&self) -> Arc<PlannerDatabase> {
        Arc::clone(&self.db)
    }

    pub fn status(&self) -> StoreStatus {
        self.status
    }

    pub fn is_dirty(&self) -> bool {
        self.status == StoreStatus::Dirty
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.load_source
    }

    pub fn repository(&self) -> &PlannerRepository<S> {
        &self.repo
    }

    /// Writes the full database. On failure the store stays dirty.
    pub fn save_now(&mut self) -> Result<(), StorageError> {
        match self.repo.save(&self.db) {
            Ok(()) => {
                let now = Utc::now();
                self.status = StoreStatus::Saved;
                self.last_saved_at = Some(now);
                info!(days = self.db.days.len(), saved_at = %now, "saved planner database");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "saving planner database failed");
                Err(err)
            }
        }
    }

    fn update_day<F>(&mut self, op: &str, f: F)
    where
        F: FnOnce(DailyRecord) -> DailyRecord,
    {
        self.status = StoreStatus::Dirty;
        let current = self.day();
        let next = f((*current).clone());
        self.db = Arc::new(self.db.with_day(&self.date_key, next));
        debug!(date_key = %self.date_key, op, "updated day");
    }

    fn note_missing<T: Entry>(&self, items: &[T], id: &str, op: &str) {
        if !collection::contains(items, id) {
            debug!(date_key = %self.date_key, op, id, "no entry with this id");
        }
    }

    // ---- Derived ----

    pub fn sleep_minutes(&self) -> i64 {
        aggregate::sleep_minutes(&self.day().sleep)
    }

    pub fn sleep_total_label(&self) -> String {
        aggregate::format_duration(self.sleep_minutes())
    }

    pub fn total_calories(&self) -> f64 {
        aggregate::total_calories(&self.day())
    }

    pub fn total_costs(&self) -> f64 {
        aggregate::total_costs(&self.day())
    }

    pub fn day_summary(&self) -> DaySummary {
        aggregate::day_summary(&self.day())
    }

    // ---- Sleep / mood ----

    pub fn set_mood(&mut self, mood: Option<Mood>) {
        self.update_day("set_mood", |mut day| {
            day.mood = mood;
            day
        });
    }

    pub fn set_sleep_start(&mut self, start: Option<&str>) {
        let start = clean_clock(start);
        self.update_day("set_sleep_start", |mut day| {
            day.sleep.start = start;
            day
        });
    }

    pub fn set_sleep_end(&mut self, end: Option<&str>) {
        let end = clean_clock(end);
        self.update_day("set_sleep_end", |mut day| {
            day.sleep.end = end;
            day
        });
    }

    /// Pauses are kept in the order they happened, so new ones go last.
    pub fn add_sleep_pause(&mut self, start: &str, end: &str) -> String {
        let pause = SleepPause::new(start.trim(), end.trim());
        let id = pause.id.clone();
        self.update_day("add_sleep_pause", |mut day| {
            day.sleep.pauses = collection::append(&day.sleep.pauses, pause);
            day
        });
        id
    }

    pub fn update_sleep_pause(&mut self, id: &str, patch: PausePatch) {
        self.note_missing(&self.day().sleep.pauses, id, "update_sleep_pause");
        self.update_day("update_sleep_pause", |mut day| {
            day.sleep.pauses = collection::patch(&day.sleep.pauses, id, &patch);
            day
        });
    }

    pub fn remove_sleep_pause(&mut self, id: &str) {
        self.note_missing(&self.day().sleep.pauses, id, "remove_sleep_pause");
        self.update_day("remove_sleep_pause", |mut day| {
            day.sleep.pauses = collection::remove(&day.sleep.pauses, id);
            day
        });
    }

    // ---- Water ----

    /// Out-of-range cups are ignored.
    pub fn set_water(&mut self, index: usize, value: bool) {
        self.update_day("set_water", |mut day| {
            day.water_cups = day.water_cups.with(index, value);
            day
        });
    }

    pub fn toggle_water(&mut self, index: usize) {
        self.update_day("toggle_water", |mut day| {
            let current = day.water_cups.get(index);
            day.water_cups = day.water_cups.with(index, !current);
            day
        });
    }

    // ---- Costs ----

    pub fn add_cost_row(&mut self) -> String {
        self.add_cost(RowEntry::new("", ""))
    }

    /// Adds a caller-built row. A row whose id is already taken gets a new one.
    pub fn add_cost(&mut self, mut row: RowEntry) -> String {
        if collection::contains(&self.day().costs, &row.id) {
            row.id = new_id();
        }
        let id = row.id.clone();
        self.update_day("add_cost_row", |mut day| {
            day.costs = collection::insert(&day.costs, row);
            day
        });
        id
    }

    pub fn update_cost_row(&mut self, id: &str, patch: RowPatch) {
        self.note_missing(&self.day().costs, id, "update_cost_row");
        self.update_day("update_cost_row", |mut day| {
            day.costs = collection::patch(&day.costs, id, &patch);
            day
        });
    }

    pub fn remove_cost_row(&mut self, id: &str) {
        self.note_missing(&self.day().costs, id, "remove_cost_row");
        self.update_day("remove_cost_row", |mut day| {
            day.costs = collection::remove(&day.costs, id);
            day
        });
    }

    pub fn move_cost_row(&mut self, id: &str, direction: Direction) {
        self.note_missing(&self.day().costs, id, "move_cost_row");
        self.update_day("move_cost_row", |mut day| {
            day.costs = collection::move_adjacent(&day.costs, id, direction);
            day
        });
    }

    pub fn sort_costs_by_priority(&mut self) {
        self.update_day("sort_costs_by_priority", |mut day| {
            day.costs = collection::sort_by_priority(&day.costs);
            day
        });
    }

    // ---- Meals ----

    pub fn add_meal_row(&mut self, meal: MealSlot) -> String {
        self.add_meal(meal, RowEntry::new("", ""))
    }

    pub fn add_meal(&mut self, meal: MealSlot, mut row: RowEntry) -> String {
        if collection::contains(self.day().meals.slot(meal), &row.id) {
            row.id = new_id();
        }
        let id = row.id.clone();
        self.update_day("add_meal_row", |mut day| {
            let rows = collection::insert(day.meals.slot(meal), row);
            day.meals = day.meals.with_slot(meal, rows);
            day
        });
        id
    }

    pub fn update_meal_row(&mut self, meal: MealSlot, id: &str, patch: RowPatch) {
        self.note_missing(self.day().meals.slot(meal), id, "update_meal_row");
        self.update_day("update_meal_row", |mut day| {
            let rows = collection::patch(day.meals.slot(meal), id, &patch);
            day.meals = day.meals.with_slot(meal, rows);
            day
        });
    }

    pub fn remove_meal_row(&mut self, meal: MealSlot, id: &str) {
        self.note_missing(self.day().meals.slot(meal), id, "remove_meal_row");
        self.update_day("remove_meal_row", |mut day| {
            let rows = collection::remove(day.meals.slot(meal), id);
            day.meals = day.meals.with_slot(meal, rows);
            day
        });
    }

    pub fn move_meal_row(&mut self, meal: MealSlot, id: &str, direction: Direction) {
        self.note_missing(self.day().meals.slot(meal), id, "move_meal_row");
        self.update_day("move_meal_row", |mut day| {
            let rows = collection::move_adjacent(day.meals.slot(meal), id, direction);
            day.meals = day.meals.with_slot(meal, rows);
            day
        });
    }

    pub fn sort_meal_by_priority(&mut self, meal: MealSlot) {
        self.update_day("sort_meal_by_priority", |mut day| {
            let rows = collection::sort_by_priority(day.meals.slot(meal));
            day.meals = day.meals.with_slot(meal, rows);
            day
        });
    }

    // ---- Habits ----

    pub fn add_habit(&mut self, title: &str) -> String {
        let habit = HabitEntry::new(title);
        let id = habit.id.clone();
        self.update_day("add_habit", |mut day| {
            day.habits = collection::insert(&day.habits, habit);
            day
        });
        id
    }

    pub fn update_habit(&mut self, id: &str, patch: HabitPatch) {
        self.note_missing(&self.day().habits, id, "update_habit");
        self.update_day("update_habit", |mut day| {
            day.habits = collection::patch(&day.habits, id, &patch);
            day
        });
    }

    pub fn remove_habit(&mut self, id: &str) {
        self.note_missing(&self.day().habits, id, "remove_habit");
        self.update_day("remove_habit", |mut day| {
            day.habits = collection::remove(&day.habits, id);
            day
        });
    }

    pub fn move_habit(&mut self, id: &str, direction: Direction) {
        self.note_missing(&self.day().habits, id, "move_habit");
        self.update_day("move_habit", |mut day| {
            day.habits = collection::move_adjacent(&day.habits, id, direction);
            day
        });
    }

    pub fn sort_habits_by_priority(&mut self) {
        self.update_day("sort_habits_by_priority", |mut day| {
            day.habits = collection::sort_by_priority(&day.habits);
            day
        });
    }

    // ---- Todos ----

    pub fn add_todo(&mut self, text: &str) -> String {
        let todo = TodoEntry::new(text);
        let id = todo.id.clone();
        self.update_day("add_todo", |mut day| {
            day.todos = collection::insert(&day.todos, todo);
            day
        });
        id
    }

    pub fn update_todo(&mut self, id: &str, patch: TodoPatch) {
        self.note_missing(&self.day().todos, id, "update_todo");
        self.update_day("update_todo", |mut day| {
            day.todos = collection::patch(&day.todos, id, &patch);
            day
        });
    }

    pub fn remove_todo(&mut self, id: &str) {
        self.note_missing(&self.day().todos, id, "remove_todo");
        self.update_day("remove_todo", |mut day| {
            day.todos = collection::remove(&day.todos, id);
            day
        });
    }

    pub fn move_todo(&mut self, id: &str, direction: Direction) {
        self.note_missing(&self.day().todos, id, "move_todo");
        self.update_day("move_todo", |mut day| {
            day.todos = collection::move_adjacent(&day.todos, id, direction);
            day
        });
    }

    pub fn sort_todos_by_priority(&mut self) {
        self.update_day("sort_todos_by_priority", |mut day| {
            day.todos = collection::sort_by_priority(&day.todos);
            day
        });
    }

    // ---- Cleaning checklist ----

    pub fn add_cleaning_item(&mut self, text: &str) -> String {
        let item = CleaningItem::new(text);
        let id = item.id.clone();
        self.update_day("add_cleaning_item", |mut day| {
            day.cleaning_items = collection::insert(&day.cleaning_items, item);
            day
        });
        id
    }

    pub fn update_cleaning_item(&mut self, id: &str, patch: CleaningPatch) {
        self.note_missing(&self.day().cleaning_items, id, "update_cleaning_item");
        self.update_day("update_cleaning_item", |mut day| {
            day.cleaning_items = collection::patch(&day.cleaning_items, id, &patch);
            day
        });
    }

    pub fn remove_cleaning_item(&mut self, id: &str) {
        self.note_missing(&self.day().cleaning_items, id, "remove_cleaning_item");
        self.update_day("remove_cleaning_item", |mut day| {
            day.cleaning_items = collection::remove(&day.cleaning_items, id);
            day
        });
    }

    pub fn move_cleaning_item(&mut self, id: &str, direction: Direction) {
        self.note_missing(&self.day().cleaning_items, id, "move_cleaning_item");
        self.update_day("move_cleaning_item", |mut day| {
            day.cleaning_items = collection::move_adjacent(&day.cleaning_items, id, direction);
            day
        });
    }

    pub fn sort_cleaning_by_priority(&mut self) {
        self.update_day("sort_cleaning_by_priority", |mut day| {
            day.cleaning_items = collection::sort_by_priority(&day.cleaning_items);
            day
        });
    }

    // ---- Notes ----

    pub fn set_field(&mut self, field: NoteField, value: impl Into<String>) {
        let value = value.into();
        self.update_day(field.key(), |day| day.with_note_field(field, value));
    }
}

fn clean_clock(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entry::DEFAULT_PRIORITY;
    use crate::repository::MemoryKeyValueStore;

    const DAY: &str = "2025-01-01";

    fn open(store: &MemoryKeyValueStore) -> PlannerStore<MemoryKeyValueStore> {
        PlannerStore::open(PlannerRepository::new(store.clone()), DAY)
    }

    #[test]
    fn test_unseen_day_is_materialized_but_not_stored() {
        let store = MemoryKeyValueStore::new();
        let planner = open(&store);

        assert_eq!(planner.status(), StoreStatus::Loaded);
        assert_eq!(*planner.day(), DailyRecord::empty(DAY));
        assert!(planner.database().days.is_empty());
        assert_eq!(planner.last_saved_at(), None);
    }

    #[test]
    fn test_add_todo_save_and_reload() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);

        planner.add_todo("buy milk");
        assert!(planner.is_dirty());

        planner.save_now().unwrap();
        assert!(!planner.is_dirty());
        assert_eq!(planner.status(), StoreStatus::Saved);
        assert!(planner.last_saved_at().is_some());

        let reloaded = open(&store);
        let todos = &reloaded.day().todos;
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "buy milk");
        assert!(!todos[0].done);
        assert_eq!(todos[0].priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn test_unsaved_changes_are_lost() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.add_habit("stretch");

        let reloaded = open(&store);
        assert!(reloaded.day().habits.is_empty());
    }

    #[test]
    fn test_mutations_replace_records_instead_of_editing() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.add_todo("a");
        planner.set_date("2025-01-02");
        planner.add_todo("b");
        planner.set_date(DAY);

        let before = planner.database();
        let other_before = planner.get_day("2025-01-02");
        let day_before = planner.day();

        planner.set_field(NoteField::Note, "hello");

        let after = planner.database();
        assert!(Arc::ptr_eq(&before.days["2025-01-02"], &after.days["2025-01-02"]));
        assert!(Arc::ptr_eq(&other_before, &planner.get_day("2025-01-02")));
        assert_eq!(day_before.note, "");
        assert_eq!(before.days[DAY].note, "");
        assert_eq!(planner.day().note, "hello");
    }

    #[test]
    fn test_mutating_one_day_leaves_another_untouched() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.set_date("2025-01-05");
        planner.add_cost_row();
        let untouched = (*planner.get_day("2025-01-05")).clone();

        planner.set_date("2025-01-06");
        planner.set_mood(Some(Mood::Ok));
        planner.set_water(3, true);

        assert_eq!(*planner.get_day("2025-01-05"), untouched);
        assert_eq!(planner.get_day("2025-01-06").mood, Some(Mood::Ok));
    }

    #[test]
    fn test_get_day_does_not_switch_current_day() {
        let store = MemoryKeyValueStore::new();
        let planner = open(&store);
        let other = planner.get_day("2024-12-31");
        assert_eq!(other.date_key, "2024-12-31");
        assert_eq!(planner.date_key(), DAY);
        assert!(planner.database().days.is_empty());
    }

    #[test]
    fn test_failed_save_keeps_dirty_and_store_usable() {
        let store = MemoryKeyValueStore::new();
        let limited = store.limited_to(Some(16));
        let mut planner = PlannerStore::open(PlannerRepository::new(limited), DAY);

        planner.add_todo("this will not fit");
        let err = planner.save_now().unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { .. }));
        assert!(planner.is_dirty());
        assert_eq!(planner.last_saved_at(), None);

        planner.add_todo("still works");
        assert_eq!(planner.day().todos.len(), 2);
        assert_eq!(store.get("planner_db_v7").unwrap(), None);
    }

    #[test]
    fn test_new_entries_are_prepended_everywhere() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);

        let t1 = planner.add_todo("first");
        let t2 = planner.add_todo("second");
        let h1 = planner.add_habit("one");
        let h2 = planner.add_habit("two");
        let c1 = planner.add_cleaning_item("dishes");
        let c2 = planner.add_cleaning_item("floor");
        let r1 = planner.add_meal_row(MealSlot::Lunch);
        let r2 = planner.add_meal_row(MealSlot::Lunch);
        let k1 = planner.add_cost_row();
        let k2 = planner.add_cost_row();

        let day = planner.day();
        assert_eq!(day.todos[0].id, t2);
        assert_eq!(day.todos[1].id, t1);
        assert_eq!(day.habits[0].id, h2);
        assert_eq!(day.habits[1].id, h1);
        assert_eq!(day.cleaning_items[0].id, c2);
        assert_eq!(day.cleaning_items[1].id, c1);
        assert_eq!(day.meals.lunch[0].id, r2);
        assert_eq!(day.meals.lunch[1].id, r1);
        assert_eq!(day.costs[0].id, k2);
        assert_eq!(day.costs[1].id, k1);
        assert!(day.meals.breakfast.is_empty());
    }

    #[test]
    fn test_todo_lifecycle() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        let a = planner.add_todo("a");
        let b = planner.add_todo("b");
        let c = planner.add_todo("c");
        // order: c, b, a

        let finished = TodoPatch { done: Some(true), priority: Some(1), ..Default::default() };
        planner.update_todo(&a, finished);
        planner.update_todo(&c, TodoPatch { priority: Some(5), ..Default::default() });
        planner.move_todo(&c, Direction::Down);
        let order: Vec<String> = planner.day().todos.iter().map(|t| t.id.clone()).collect();
        assert_eq!(order, vec![b.clone(), c.clone(), a.clone()]);

        planner.sort_todos_by_priority();
        let order: Vec<String> = planner.day().todos.iter().map(|t| t.id.clone()).collect();
        assert_eq!(order, vec![a.clone(), c.clone(), b.clone()]);
        assert_eq!(planner.day().todos[0].text, "a");
        assert!(planner.day().todos[0].done);

        planner.remove_todo(&c);
        assert_eq!(planner.day().todos.len(), 2);
    }

    #[test]
    fn test_missing_id_is_a_noop_but_marks_dirty() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.add_habit("walk");
        planner.save_now().unwrap();
        let before = (*planner.day()).clone();

        planner.remove_habit("nope");
        planner.update_habit("nope", HabitPatch { checked: Some(true), ..Default::default() });
        planner.move_habit("nope", Direction::Up);

        assert_eq!(*planner.day(), before);
        assert!(planner.is_dirty());
    }

    #[test]
    fn test_caller_built_rows_never_duplicate_ids() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        let first = planner.add_cost_row();
        let second = planner.add_cost(RowEntry { id: first.clone(), ..RowEntry::new("bus", "3") });
        assert_ne!(first, second);
        assert_eq!(planner.day().costs.iter().filter(|r| r.id == first).count(), 1);
        assert_eq!(planner.day().costs.len(), 2);

        let soup = planner.add_meal_row(MealSlot::Dinner);
        let copy = RowEntry { id: soup.clone(), ..RowEntry::new("soup", "250") };
        let again = planner.add_meal(MealSlot::Dinner, copy.clone());
        assert_ne!(soup, again);
        assert_eq!(planner.day().meals.dinner.len(), 2);

        // The same id is free in another slot.
        let lunch = planner.add_meal(MealSlot::Lunch, copy);
        assert_eq!(lunch, soup);
    }

    #[test]
    fn test_meal_rows_and_calories() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        let eggs = planner.add_meal_row(MealSlot::Breakfast);
        planner.update_meal_row(
            MealSlot::Breakfast,
            &eggs,
            RowPatch {
                title: Some("eggs".into()),
                value: Some("180".into()),
                ..Default::default()
            },
        );
        let soup = planner.add_meal(MealSlot::Dinner, RowEntry::new("soup", "1,200 kcal"));
        assert_eq!(planner.total_calories(), 1380.0);

        let zero = RowPatch { value: Some("0".into()), ..Default::default() };
        planner.update_meal_row(MealSlot::Lunch, &soup, zero);
        assert_eq!(planner.total_calories(), 1380.0);

        planner.remove_meal_row(MealSlot::Dinner, &soup);
        assert_eq!(planner.total_calories(), 180.0);
        assert_eq!(planner.day().meals.breakfast[0].title, "eggs");
    }

    #[test]
    fn test_costs_move_and_sort() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        let bus = planner.add_cost(RowEntry { priority: 2, ..RowEntry::new("bus", "2.5") });
        let lunch = planner.add_cost(RowEntry { priority: 1, ..RowEntry::new("lunch", "$12") });
        planner.move_cost_row(&lunch, Direction::Up);
        assert_eq!(planner.day().costs[0].id, lunch);

        planner.move_cost_row(&lunch, Direction::Down);
        assert_eq!(planner.day().costs[0].id, bus);

        planner.sort_costs_by_priority();
        assert_eq!(planner.day().costs[0].id, lunch);
        assert_eq!(planner.total_costs(), 14.5);

        planner.remove_cost_row(&bus);
        assert_eq!(planner.total_costs(), 12.0);
    }

    #[test]
    fn test_sleep_and_pauses() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        assert_eq!(planner.sleep_total_label(), "—");

        planner.set_sleep_start(Some("23:00"));
        planner.set_sleep_end(Some("07:00"));
        assert_eq!(planner.sleep_minutes(), 480);

        let pause = planner.add_sleep_pause("02:00", "");
        assert_eq!(planner.sleep_minutes(), 480);
        let end = PausePatch { end: Some("02:30".into()), ..Default::default() };
        planner.update_sleep_pause(&pause, end);
        assert_eq!(planner.sleep_total_label(), "7h 30m");

        let later = planner.add_sleep_pause("05:00", "05:10");
        assert_eq!(planner.day().sleep.pauses[1].id, later);
        assert_eq!(planner.sleep_minutes(), 440);

        planner.remove_sleep_pause(&pause);
        planner.set_sleep_start(Some("  "));
        assert_eq!(planner.day().sleep.start, None);
        assert_eq!(planner.sleep_minutes(), 0);
    }

    #[test]
    fn test_water_and_mood() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.set_water(0, true);
        planner.toggle_water(1);
        planner.toggle_water(0);
        planner.set_water(42, true);
        assert_eq!(
            planner.day().water_cups.as_slice(),
            &[false, true, false, false, false, false, false, false]
        );

        planner.set_mood(Some(Mood::VeryGood));
        assert_eq!(planner.day().mood, Some(Mood::VeryGood));
        planner.set_mood(None);
        assert_eq!(planner.day().mood, None);
    }

    #[test]
    fn test_habits_and_cleaning() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        let walk = planner.add_habit("walk");
        let checked = HabitPatch {
            checked: Some(true),
            icon: Some(Some("🚶".into())),
            ..Default::default()
        };
        planner.update_habit(&walk, checked);
        let read = planner.add_habit("read");
        planner.update_habit(&read, HabitPatch { priority: Some(20), ..Default::default() });
        planner.sort_habits_by_priority();
        assert_eq!(planner.day().habits[0].id, walk);
        planner.remove_habit(&read);

        let dishes = planner.add_cleaning_item("dishes");
        let floor = planner.add_cleaning_item("floor");
        let done = CleaningPatch { done: Some(true), ..Default::default() };
        planner.update_cleaning_item(&dishes, done);
        planner.move_cleaning_item(&dishes, Direction::Up);
        assert_eq!(planner.day().cleaning_items[0].id, dishes);
        let first = CleaningPatch { priority: Some(0), ..Default::default() };
        planner.update_cleaning_item(&floor, first);
        planner.sort_cleaning_by_priority();
        assert_eq!(planner.day().cleaning_items[0].id, floor);
        planner.remove_cleaning_item(&floor);

        let summary = planner.day_summary();
        assert_eq!((summary.habits_done, summary.habits_total), (1, 1));
        assert_eq!((summary.cleaning_done, summary.cleaning_total), (1, 1));
    }

    #[test]
    fn test_note_fields_keep_legacy_cleaning_text() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.set_field(NoteField::DailyCleaning, "bathroom");
        planner.set_field(NoteField::Gratitude, "sunshine");
        planner.add_cleaning_item("mirror");

        let day = planner.day();
        assert_eq!(day.note_field(NoteField::DailyCleaning), "bathroom");
        assert_eq!(day.gratitude, "sunshine");
        assert_eq!(day.cleaning_items.len(), 1);
    }

    #[test]
    fn test_saved_then_dirty_again() {
        let store = MemoryKeyValueStore::new();
        let mut planner = open(&store);
        planner.add_todo("x");
        planner.save_now().unwrap();
        let first = planner.last_saved_at();

        planner.add_todo("y");
        assert_eq!(planner.status(), StoreStatus::Dirty);
        planner.save_now().unwrap();
        assert!(planner.last_saved_at() >= first);
        assert_eq!(open(&store).day().todos.len(), 2);
    }
}
