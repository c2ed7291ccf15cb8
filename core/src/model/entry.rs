use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;

pub const DEFAULT_PRIORITY: i64 = 10;

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Anything that lives in an id-keyed, ordered collection.
pub trait Entry: Clone {
    fn id(&self) -> &str;
}

/// Entries that can be sorted by priority (lower sorts first).
pub trait Prioritized: Entry {
    fn priority(&self) -> i64;
}

/// A partial update. Fields left as `None` keep their current value.
pub trait Patch<T> {
    fn apply_to(&self, entry: &mut T);
}

macro_rules! entry_impls {
    ($ty:ident, prioritized) => {
        entry_impls!($ty);

        impl Prioritized for $ty {
            fn priority(&self) -> i64 {
                self.priority
            }
        }
    };
    ($ty:ident) => {
        impl Entry for $ty {
            fn id(&self) -> &str {
                &self.id
            }
        }
    };
}

/// A labeled quantity: a meal line (calories) or a cost line (amount).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RowEntry {
    #[serde(default = "new_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    /// Free text; only parsed when aggregated.
    #[serde(default, deserialize_with = "lenient::text")]
    pub value: String,
    #[serde(default = "default_priority", deserialize_with = "lenient::priority")]
    pub priority: i64,
}

impl RowEntry {
    pub fn new(title: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            value: value.into(),
            priority: DEFAULT_PRIORITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowPatch {
    pub title: Option<String>,
    pub value: Option<String>,
    pub priority: Option<i64>,
}

impl Patch<RowEntry> for RowPatch {
    fn apply_to(&self, entry: &mut RowEntry) {
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(value) = &self.value {
            entry.value = value.clone();
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HabitEntry {
    #[serde(default = "new_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub checked: bool,
    #[serde(default = "default_priority", deserialize_with = "lenient::priority")]
    pub priority: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::optional_text"
    )]
    pub icon: Option<String>,
}

impl HabitEntry {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            title: title.into(),
            checked: false,
            priority: DEFAULT_PRIORITY,
            icon: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitPatch {
    pub title: Option<String>,
    pub checked: Option<bool>,
    pub priority: Option<i64>,
    /// `Some(None)` clears the icon.
    pub icon: Option<Option<String>>,
}

impl Patch<HabitEntry> for HabitPatch {
    fn apply_to(&self, entry: &mut HabitEntry) {
        if let Some(title) = &self.title {
            entry.title = title.clone();
        }
        if let Some(checked) = self.checked {
            entry.checked = checked;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
        if let Some(icon) = &self.icon {
            entry.icon = icon.clone();
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TodoEntry {
    #[serde(default = "new_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub done: bool,
    #[serde(default = "default_priority", deserialize_with = "lenient::priority")]
    pub priority: i64,
}

impl TodoEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            done: false,
            priority: DEFAULT_PRIORITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub done: Option<bool>,
    pub priority: Option<i64>,
}

impl Patch<TodoEntry> for TodoPatch {
    fn apply_to(&self, entry: &mut TodoEntry) {
        if let Some(text) = &self.text {
            entry.text = text.clone();
        }
        if let Some(done) = self.done {
            entry.done = done;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
    }
}

/// One line of the daily cleaning checklist.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CleaningItem {
    #[serde(default = "new_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub done: bool,
    #[serde(default = "default_priority", deserialize_with = "lenient::priority")]
    pub priority: i64,
}

impl CleaningItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            text: text.into(),
            done: false,
            priority: DEFAULT_PRIORITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningPatch {
    pub text: Option<String>,
    pub done: Option<bool>,
    pub priority: Option<i64>,
}

impl Patch<CleaningItem> for CleaningPatch {
    fn apply_to(&self, entry: &mut CleaningItem) {
        if let Some(text) = &self.text {
            entry.text = text.clone();
        }
        if let Some(done) = self.done {
            entry.done = done;
        }
        if let Some(priority) = self.priority {
            entry.priority = priority;
        }
    }
}

/// A wake-up gap inside a night's sleep, as `HH:MM` wall-clock times.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SleepPause {
    #[serde(default = "new_id", deserialize_with = "lenient::id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub start: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub end: String,
}

impl SleepPause {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PausePatch {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Patch<SleepPause> for PausePatch {
    fn apply_to(&self, entry: &mut SleepPause) {
        if let Some(start) = &self.start {
            entry.start = start.clone();
        }
        if let Some(end) = &self.end {
            entry.end = end.clone();
        }
    }
}

entry_impls!(RowEntry, prioritized);
entry_impls!(HabitEntry, prioritized);
entry_impls!(TodoEntry, prioritized);
entry_impls!(CleaningItem, prioritized);
entry_impls!(SleepPause);

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}
