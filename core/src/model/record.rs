use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::entry::{CleaningItem, HabitEntry, RowEntry, SleepPause, TodoEntry};
use super::lenient;

pub const WATER_CUPS: usize = 8;

/// Which of the day's cups of water were drunk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaterCups([bool; WATER_CUPS]);

impl WaterCups {
    pub fn new(cups: [bool; WATER_CUPS]) -> Self {
        Self(cups)
    }

    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Out-of-range indices leave the cups unchanged.
    pub fn with(self, index: usize, value: bool) -> Self {
        let mut cups = self.0;
        if let Some(cup) = cups.get_mut(index) {
            *cup = value;
        }
        Self(cups)
    }

    pub fn done_count(&self) -> usize {
        self.0.iter().filter(|c| **c).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl Serialize for WaterCups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WaterCups {
    // Pads or truncates to exactly eight cups.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        let mut cups = [false; WATER_CUPS];
        for (cup, value) in cups.iter_mut().zip(values.iter()) {
            *cup = lenient::truthy(value);
        }
        Ok(Self(cups))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum MealSlot {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
}

impl MealSlot {
    pub const ALL: [MealSlot; 4] = [
        MealSlot::Breakfast,
        MealSlot::Lunch,
        MealSlot::Snack,
        MealSlot::Dinner,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            MealSlot::Breakfast => "breakfast",
            MealSlot::Lunch => "lunch",
            MealSlot::Snack => "snack",
            MealSlot::Dinner => "dinner",
        }
    }
}

impl fmt::Display for MealSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MealSlot {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        MealSlot::ALL
            .into_iter()
            .find(|slot| slot.key() == s.to_lowercase())
            .ok_or_else(|| anyhow!("Unknown meal slot: {}", s))
    }
}

/// Rows per meal slot. Field order is the display order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Meals {
    #[serde(deserialize_with = "lenient::nullable")]
    pub breakfast: Vec<RowEntry>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub lunch: Vec<RowEntry>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub snack: Vec<RowEntry>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub dinner: Vec<RowEntry>,
}

impl Meals {
    pub fn slot(&self, slot: MealSlot) -> &[RowEntry] {
        match slot {
            MealSlot::Breakfast => &self.breakfast,
            MealSlot::Lunch => &self.lunch,
            MealSlot::Snack => &self.snack,
            MealSlot::Dinner => &self.dinner,
        }
    }

    /// Copy with one slot replaced.
    pub fn with_slot(&self, slot: MealSlot, rows: Vec<RowEntry>) -> Self {
        let mut next = self.clone();
        match slot {
            MealSlot::Breakfast => next.breakfast = rows,
            MealSlot::Lunch => next.lunch = rows,
            MealSlot::Snack => next.snack = rows,
            MealSlot::Dinner => next.dinner = rows,
        }
        next
    }

    pub fn all_rows(&self) -> impl Iterator<Item = &RowEntry> {
        MealSlot::ALL.into_iter().flat_map(move |slot| self.slot(slot).iter())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Mood {
    Awful,
    VeryBad,
    Bad,
    Meh,
    Ok,
    Good,
    VeryGood,
    Amazing,
}

impl Mood {
    pub const ALL: [Mood; 8] = [
        Mood::Awful,
        Mood::VeryBad,
        Mood::Bad,
        Mood::Meh,
        Mood::Ok,
        Mood::Good,
        Mood::VeryGood,
        Mood::Amazing,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Mood::Awful => "awful",
            Mood::VeryBad => "veryBad",
            Mood::Bad => "bad",
            Mood::Meh => "meh",
            Mood::Ok => "ok",
            Mood::Good => "good",
            Mood::VeryGood => "veryGood",
            Mood::Amazing => "amazing",
        }
    }

    /// Accepts current keys plus `great` from the five-mood revision.
    pub fn from_key(key: &str) -> Option<Mood> {
        if key == "great" {
            return Some(Mood::Amazing);
        }
        Mood::ALL.into_iter().find(|m| m.key().eq_ignore_ascii_case(key))
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Awful => "Awful",
            Mood::VeryBad => "Very bad",
            Mood::Bad => "Bad",
            Mood::Meh => "Meh",
            Mood::Ok => "OK",
            Mood::Good => "Good",
            Mood::VeryGood => "Very good",
            Mood::Amazing => "Amazing",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Awful => "🤮",
            Mood::VeryBad => "😞",
            Mood::Bad => "🙁",
            Mood::Meh => "😑",
            Mood::Ok => "😐",
            Mood::Good => "🙂",
            Mood::VeryGood => "😃",
            Mood::Amazing => "🤩",
        }
    }
}

impl FromStr for Mood {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Mood::from_key(s).ok_or_else(|| anyhow!("Unknown mood: {}", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SleepInterval {
    #[serde(deserialize_with = "lenient::optional_text")]
    pub start: Option<String>,
    #[serde(deserialize_with = "lenient::optional_text")]
    pub end: Option<String>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub pauses: Vec<SleepPause>,
}

/// The day's free-text fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteField {
    SentenceOfDay,
    Gratitude,
    /// Superseded by the cleaning checklist; still shown for old days.
    DailyCleaning,
    Note,
}

impl NoteField {
    pub const ALL: [NoteField; 4] = [
        NoteField::SentenceOfDay,
        NoteField::Gratitude,
        NoteField::DailyCleaning,
        NoteField::Note,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            NoteField::SentenceOfDay => "sentenceOfDay",
            NoteField::Gratitude => "gratitude",
            NoteField::DailyCleaning => "dailyCleaning",
            NoteField::Note => "note",
        }
    }
}

impl FromStr for NoteField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        NoteField::ALL
            .into_iter()
            .find(|f| f.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow!("Unknown note field: {}", s))
    }
}

/// Everything recorded for one calendar day.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(deserialize_with = "lenient::text")]
    pub date_key: String,

    pub water_cups: WaterCups,

    #[serde(deserialize_with = "lenient::nullable")]
    pub meals: Meals,
    #[serde(deserialize_with = "lenient::nullable")]
    pub costs: Vec<RowEntry>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub habits: Vec<HabitEntry>,
    #[serde(deserialize_with = "lenient::nullable")]
    pub todos: Vec<TodoEntry>,

    #[serde(deserialize_with = "lenient::nullable")]
    pub sleep: SleepInterval,
    #[serde(deserialize_with = "lenient::mood")]
    pub mood: Option<Mood>,

    #[serde(deserialize_with = "lenient::nullable")]
    pub cleaning_items: Vec<CleaningItem>,

    #[serde(deserialize_with = "lenient::text")]
    pub sentence_of_day: String,
    #[serde(deserialize_with = "lenient::text")]
    pub gratitude: String,
    #[serde(deserialize_with = "lenient::text")]
    pub daily_cleaning: String,
    #[serde(deserialize_with = "lenient::text")]
    pub note: String,

    /// Hours-only sleep figure from schema v3, kept for display.
    #[serde(
        rename = "sleepHours",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::legacy_hours"
    )]
    pub legacy_sleep_hours: Option<f64>,
}

impl DailyRecord {
    /// The canonical empty record for `date_key`.
    pub fn empty(date_key: impl Into<String>) -> Self {
        Self {
            date_key: date_key.into(),
            ..Default::default()
        }
    }

    pub fn note_field(&self, field: NoteField) -> &str {
        match field {
            NoteField::SentenceOfDay => &self.sentence_of_day,
            NoteField::Gratitude => &self.gratitude,
            NoteField::DailyCleaning => &self.daily_cleaning,
            NoteField::Note => &self.note,
        }
    }

    pub fn with_note_field(mut self, field: NoteField, value: String) -> Self {
        match field {
            NoteField::SentenceOfDay => self.sentence_of_day = value,
            NoteField::Gratitude => self.gratitude = value,
            NoteField::DailyCleaning => self.daily_cleaning = value,
            NoteField::Note => self.note = value,
        }
        self
    }
}
