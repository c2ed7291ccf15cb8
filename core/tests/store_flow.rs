use std::sync::Arc;

use planner_core::model::{TodoPatch, DEFAULT_PRIORITY};
use planner_core::repository::LoadSource;
use planner_core::{
    FileKeyValueStore, KeyValueStore, MealSlot, Mood, NoteField, PlannerConfig, PlannerRepository,
    PlannerStore, StoreStatus,
};

fn open(config: &PlannerConfig, date_key: &str) -> PlannerStore<FileKeyValueStore> {
    let kv = FileKeyValueStore::from_config(config).unwrap();
    PlannerStore::open(PlannerRepository::from_config(kv, config), date_key)
}

#[test]
fn test_todo_survives_reload_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();

    let mut planner = open(&config, "2025-02-10");
    assert_eq!(planner.status(), StoreStatus::Loaded);
    planner.add_todo("buy milk");
    assert!(planner.is_dirty());

    planner.save_now().unwrap();
    assert!(!planner.is_dirty());
    assert!(planner.last_saved_at().is_some());
    assert!(config.blob_path().exists());

    let reloaded = open(&config, "2025-02-10");
    assert_eq!(reloaded.load_source(), &LoadSource::Current);
    let day = reloaded.day();
    assert_eq!(day.todos.len(), 1);
    assert_eq!(day.todos[0].text, "buy milk");
    assert!(!day.todos[0].done);
    assert_eq!(day.todos[0].priority, DEFAULT_PRIORITY);
}

#[test]
fn test_full_day_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();

    let mut planner = open(&config, "2025-02-11");
    let todo = planner.add_todo("write report");
    planner.update_todo(&todo, TodoPatch { done: Some(true), ..Default::default() });
    planner.add_meal_row(MealSlot::Snack);
    planner.add_habit("meditate");
    planner.add_cleaning_item("desk");
    planner.set_water(7, true);
    planner.set_mood(Some(Mood::Meh));
    planner.set_sleep_start(Some("00:30"));
    planner.set_sleep_end(Some("08:00"));
    planner.add_sleep_pause("04:00", "04:15");
    planner.set_field(NoteField::SentenceOfDay, "Slow and steady.");
    planner.save_now().unwrap();

    let reloaded = open(&config, "2025-02-11");
    assert_eq!(*reloaded.day(), *planner.day());
    assert_eq!(reloaded.sleep_minutes(), 435);
}

#[test]
fn test_other_days_untouched_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();

    let mut planner = open(&config, "2025-03-01");
    planner.add_todo("march first");
    planner.save_now().unwrap();

    let mut second = open(&config, "2025-03-02");
    let before = second.get_day("2025-03-01");
    second.add_todo("march second");
    assert!(Arc::ptr_eq(&before, &second.get_day("2025-03-01")));
    second.save_now().unwrap();

    let third = open(&config, "2025-03-01");
    assert_eq!(third.day().todos[0].text, "march first");
    assert_eq!(third.get_day("2025-03-02").todos[0].text, "march second");
}

#[test]
fn test_corrupt_file_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();
    std::fs::write(config.blob_path(), "{ definitely not json").unwrap();

    let mut planner = open(&config, "2025-04-01");
    assert_eq!(planner.load_source(), &LoadSource::Empty);
    assert!(planner.database().days.is_empty());

    planner.add_habit("hydrate");
    planner.save_now().unwrap();
    assert_eq!(open(&config, "2025-04-01").day().habits.len(), 1);
}

#[test]
fn test_legacy_file_is_migrated() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();
    let kv = FileKeyValueStore::from_config(&config).unwrap();
    let v3 = r#"{"version":3,"days":{"2024-06-01":{
        "dateKey": "2024-06-01",
        "waterCups": [true, true],
        "todos": [{"id": "legacy-1", "text": "old", "done": false, "priority": "4"}]
    }}}"#;
    kv.set("planner_db_v3", v3).unwrap();

    let planner = open(&config, "2024-06-01");
    assert!(matches!(planner.load_source(), LoadSource::Migrated { from_version: 3, .. }));
    let day = planner.day();
    assert_eq!(day.todos[0].id, "legacy-1");
    assert_eq!(day.todos[0].priority, 4);
    assert_eq!(day.water_cups.done_count(), 2);
    assert!(config.blob_path().exists());
}

#[test]
fn test_unreadable_current_file_is_left_alone() {
    let dir = tempfile::tempdir().unwrap();
    let config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();
    let kv = FileKeyValueStore::from_config(&config).unwrap();
    kv.set("planner_db_v6", r#"{"version":6,"days":{"2020-01-01":{"note":"stale"}}}"#)
        .unwrap();
    std::fs::write(config.blob_path(), [0xff, 0xfe]).unwrap();

    let planner = open(&config, "2020-01-01");
    assert_eq!(planner.load_source(), &LoadSource::Empty);
    assert_eq!(planner.day().note, "");
    assert_eq!(std::fs::read(config.blob_path()).unwrap(), vec![0xff, 0xfe]);
}

#[test]
fn test_configured_storage_key_is_used() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PlannerConfig::new(Some(dir.path().to_path_buf())).unwrap();
    config.storage_key = "work_planner".to_string();
    let kv = FileKeyValueStore::from_config(&config).unwrap();

    let repo = PlannerRepository::from_config(kv, &config);
    let mut planner = PlannerStore::open(repo, "2025-05-01");
    planner.add_todo("ship it");
    planner.save_now().unwrap();

    assert_eq!(planner.repository().storage_key(), "work_planner");
    assert_eq!(config.blob_path(), dir.path().join("work_planner.json"));
    assert!(config.blob_path().exists());
    assert!(!dir.path().join("planner_db_v7.json").exists());
}
