pub mod database;
pub mod entry;
pub mod record;

mod lenient;

pub use database::{PlannerDatabase, CURRENT_VERSION};
pub use entry::{
    new_id, CleaningItem, CleaningPatch, Entry, HabitEntry, HabitPatch, Patch, PausePatch,
    Prioritized, RowEntry, RowPatch, SleepPause, TodoEntry, TodoPatch, DEFAULT_PRIORITY,
};
pub use record::{
    DailyRecord, MealSlot, Meals, Mood, NoteField, SleepInterval, WaterCups, WATER_CUPS,
};
