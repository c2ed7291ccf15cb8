use std::collections::HashMap;

use anyhow::{anyhow, Result};
use planner_core::input::{expand_key, parse_args, parse_priority_input};
use planner_core::model::{
    CleaningPatch, Entry, HabitPatch, PausePatch, RowEntry, RowPatch, TodoPatch, WATER_CUPS,
};
use planner_core::time::parse_clock;
use planner_core::{Direction, KeyValueStore, MealSlot, Mood, NoteField, PlannerStore};

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the day (default)
    Day,
    /// Show the week containing the day
    Week,
    /// Manage todos (usage: todo add "Call mom" pri:2)
    Todo {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Manage habits (usage: habit add Vitamins icon:💊)
    Habit {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Manage the cleaning checklist
    Clean {
        #[command(subcommand)]
        action: ItemAction,
    },
    /// Manage meal rows (usage: meal lunch add Soup val:320)
    Meal {
        slot: MealSlot,
        #[command(subcommand)]
        action: RowAction,
    },
    /// Manage cost rows (usage: cost add Bus val:2.50)
    Cost {
        #[command(subcommand)]
        action: RowAction,
    },
    /// Toggle a cup of water (1-8), or set it with on/off
    Water {
        cup: usize,
        state: Option<String>,
    },
    /// Set the mood, or "none" to clear it
    Mood { mood: String },
    /// Set the sleep window as HH:MM, "-" clears a side
    Sleep { start: String, end: String },
    /// Manage pauses in the night's sleep
    Pause {
        #[command(subcommand)]
        action: PauseAction,
    },
    /// Set a text field: sentence, gratitude, cleaning, note
    Note {
        field: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
pub enum ItemAction {
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    Done { id: String },
    Undo { id: String },
    Rm { id: String },
    Up { id: String },
    Down { id: String },
    Sort,
}

#[derive(clap::Subcommand)]
pub enum RowAction {
    Add {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    Rm { id: String },
    Up { id: String },
    Down { id: String },
    Sort,
}

#[derive(clap::Subcommand)]
pub enum PauseAction {
    Add { start: String, end: String },
    Edit { id: String, start: String, end: String },
    Rm { id: String },
}

const ITEM_KEYS: [&str; 2] = ["priority", "icon"];
const ROW_KEYS: [&str; 2] = ["value", "priority"];
const NOTE_KEYS: [&str; 4] = ["sentence", "gratitude", "cleaning", "note"];

#[derive(Clone, Copy)]
enum ItemKind {
    Todo,
    Habit,
    Cleaning,
}

/// Parsed `add`/`edit` arguments: free text plus normalized metadata.
struct Fields {
    text: String,
    metadata: HashMap<String, String>,
}

fn parse_fields(args: &[String], known_keys: &[&str]) -> Fields {
    let parsed = parse_args(args);
    let mut metadata = HashMap::new();
    for (key, value) in parsed.metadata {
        match expand_key(&key, known_keys) {
            Ok(full_key) => {
                metadata.insert(full_key, value);
            }
            Err(e) => {
                println!("Warning: {}", e);
            }
        }
    }
    Fields {
        text: parsed.text,
        metadata,
    }
}

impl Fields {
    fn priority(&self) -> Option<i64> {
        self.metadata.get("priority").map(|p| parse_priority_input(p))
    }

    fn text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.clone())
    }
}

/// Accepts a full id or any unambiguous prefix of one.
fn resolve_id<T: Entry>(items: &[T], prefix: &str) -> Result<String> {
    let ids: Vec<&str> = items.iter().map(|i| i.id()).collect();
    expand_key(prefix, &ids).map_err(|e| anyhow!("No such entry: {}", e))
}

/// Applies one mutating command and returns a confirmation line.
pub fn run<S: KeyValueStore>(store: &mut PlannerStore<S>, command: Commands) -> Result<String> {
    let message = match command {
        Commands::Day | Commands::Week => return Err(anyhow!("Views do not change the planner")),
        Commands::Todo { action } => run_item(store, ItemKind::Todo, action)?,
        Commands::Habit { action } => run_item(store, ItemKind::Habit, action)?,
        Commands::Clean { action } => run_item(store, ItemKind::Cleaning, action)?,
        Commands::Meal { slot, action } => run_row(store, Some(slot), action)?,
        Commands::Cost { action } => run_row(store, None, action)?,
        Commands::Water { cup, state } => {
            if !(1..=WATER_CUPS).contains(&cup) {
                return Err(anyhow!("Cup must be between 1 and {}", WATER_CUPS));
            }
            let index = cup - 1;
            match state.as_deref().map(str::to_lowercase).as_deref() {
                None => store.toggle_water(index),
                Some("on") | Some("yes") => store.set_water(index, true),
                Some("off") | Some("no") => store.set_water(index, false),
                Some(other) => return Err(anyhow!("Expected on/off, got '{}'", other)),
            }
            let done = store.day().water_cups.done_count();
            format!("Water: {}/{}", done, WATER_CUPS)
        }
        Commands::Mood { mood } => {
            let mood = match mood.as_str() {
                "none" | "-" => None,
                other => Some(other.parse::<Mood>()?),
            };
            store.set_mood(mood);
            format!("Mood: {}", mood.map(|m| m.label()).unwrap_or("—"))
        }
        Commands::Sleep { start, end } => {
            store.set_sleep_start(clock_arg(&start)?);
            store.set_sleep_end(clock_arg(&end)?);
            format!("Sleep: {}", store.sleep_total_label())
        }
        Commands::Pause { action } => run_pause(store, action)?,
        Commands::Note { field, text } => {
            let field = match expand_key(&field, &NOTE_KEYS)?.as_str() {
                "sentence" => NoteField::SentenceOfDay,
                "gratitude" => NoteField::Gratitude,
                "cleaning" => NoteField::DailyCleaning,
                _ => NoteField::Note,
            };
            store.set_field(field, text.join(" "));
            format!("Updated {}", field.key())
        }
    };
    Ok(message)
}

fn clock_arg(value: &str) -> Result<Option<&str>> {
    if value == "-" {
        return Ok(None);
    }
    parse_clock(value)
        .map(|_| Some(value))
        .ok_or_else(|| anyhow!("Expected HH:MM, got '{}'", value))
}

fn run_item<S: KeyValueStore>(
    store: &mut PlannerStore<S>,
    kind: ItemKind,
    action: ItemAction,
) -> Result<String> {
    let day = store.day();
    let resolve = |prefix: &str| match kind {
        ItemKind::Todo => resolve_id(&day.todos, prefix),
        ItemKind::Habit => resolve_id(&day.habits, prefix),
        ItemKind::Cleaning => resolve_id(&day.cleaning_items, prefix),
    };

    let message = match action {
        ItemAction::Add { args } => {
            let fields = parse_fields(&args, &ITEM_KEYS);
            let text = fields.text().ok_or_else(|| anyhow!("Text is required."))?;
            let id = match kind {
                ItemKind::Todo => store.add_todo(&text),
                ItemKind::Habit => store.add_habit(&text),
                ItemKind::Cleaning => store.add_cleaning_item(&text),
            };
            if !fields.metadata.is_empty() {
                edit_item(store, kind, &id, &fields);
            }
            format!("Added: {} (ID: {})", text, &id[..8.min(id.len())])
        }
        ItemAction::Edit { id, args } => {
            let id = resolve(&id)?;
            edit_item(store, kind, &id, &parse_fields(&args, &ITEM_KEYS));
            "Updated".to_string()
        }
        ItemAction::Done { id } => {
            set_item_done(store, kind, &resolve(&id)?, true);
            "Marked done".to_string()
        }
        ItemAction::Undo { id } => {
            set_item_done(store, kind, &resolve(&id)?, false);
            "Marked not done".to_string()
        }
        ItemAction::Rm { id } => {
            let id = resolve(&id)?;
            match kind {
                ItemKind::Todo => store.remove_todo(&id),
                ItemKind::Habit => store.remove_habit(&id),
                ItemKind::Cleaning => store.remove_cleaning_item(&id),
            }
            "Removed".to_string()
        }
        ItemAction::Up { id } => move_item(store, kind, &resolve(&id)?, Direction::Up),
        ItemAction::Down { id } => move_item(store, kind, &resolve(&id)?, Direction::Down),
        ItemAction::Sort => {
            match kind {
                ItemKind::Todo => store.sort_todos_by_priority(),
                ItemKind::Habit => store.sort_habits_by_priority(),
                ItemKind::Cleaning => store.sort_cleaning_by_priority(),
            }
            "Sorted by priority".to_string()
        }
    };
    Ok(message)
}

fn edit_item<S: KeyValueStore>(
    store: &mut PlannerStore<S>,
    kind: ItemKind,
    id: &str,
    fields: &Fields,
) {
    let text = fields.text();
    let priority = fields.priority();
    match kind {
        ItemKind::Todo => store.update_todo(id, TodoPatch { text, priority, ..Default::default() }),
        ItemKind::Habit => {
            let icon = fields
                .metadata
                .get("icon")
                .map(|i| Some(i.clone()).filter(|i| !i.is_empty()));
            store.update_habit(id, HabitPatch { title: text, priority, icon, ..Default::default() })
        }
        ItemKind::Cleaning => {
            store.update_cleaning_item(id, CleaningPatch { text, priority, ..Default::default() })
        }
    }
}

fn set_item_done<S: KeyValueStore>(
    store: &mut PlannerStore<S>,
    kind: ItemKind,
    id: &str,
    done: bool,
) {
    match kind {
        ItemKind::Todo => {
            store.update_todo(id, TodoPatch { done: Some(done), ..Default::default() })
        }
        ItemKind::Habit => {
            store.update_habit(id, HabitPatch { checked: Some(done), ..Default::default() })
        }
        ItemKind::Cleaning => {
            store.update_cleaning_item(id, CleaningPatch { done: Some(done), ..Default::default() })
        }
    }
}

fn move_item<S: KeyValueStore>(
    store: &mut PlannerStore<S>,
    kind: ItemKind,
    id: &str,
    direction: Direction,
) -> String {
    match kind {
        ItemKind::Todo => store.move_todo(id, direction),
        ItemKind::Habit => store.move_habit(id, direction),
        ItemKind::Cleaning => store.move_cleaning_item(id, direction),
    }
    format!("Moved {}", direction)
}

fn run_row<S: KeyValueStore>(
    store: &mut PlannerStore<S>,
    slot: Option<MealSlot>,
    action: RowAction,
) -> Result<String> {
    let day = store.day();
    let rows = match slot {
        Some(slot) => day.meals.slot(slot),
        None => &day.costs,
    };

    let message = match action {
        RowAction::Add { args } => {
            let fields = parse_fields(&args, &ROW_KEYS);
            let value = fields.metadata.get("value").cloned().unwrap_or_default();
            let mut row = RowEntry::new(fields.text.clone(), value);
            if let Some(priority) = fields.priority() {
                row.priority = priority;
            }
            let id = match slot {
                Some(slot) => store.add_meal(slot, row),
                None => store.add_cost(row),
            };
            format!("Added row (ID: {})", &id[..8.min(id.len())])
        }
        RowAction::Edit { id, args } => {
            let id = resolve_id(rows, &id)?;
            let fields = parse_fields(&args, &ROW_KEYS);
            let patch = RowPatch {
                title: fields.text(),
                value: fields.metadata.get("value").cloned(),
                priority: fields.priority(),
            };
            match slot {
                Some(slot) => store.update_meal_row(slot, &id, patch),
                None => store.update_cost_row(&id, patch),
            }
            "Updated".to_string()
        }
        RowAction::Rm { id } => {
            let id = resolve_id(rows, &id)?;
            match slot {
                Some(slot) => store.remove_meal_row(slot, &id),
                None => store.remove_cost_row(&id),
            }
            "Removed".to_string()
        }
        RowAction::Up { id } => move_row(store, slot, &resolve_id(rows, &id)?, Direction::Up),
        RowAction::Down { id } => move_row(store, slot, &resolve_id(rows, &id)?, Direction::Down),
        RowAction::Sort => {
            match slot {
                Some(slot) => store.sort_meal_by_priority(slot),
                None => store.sort_costs_by_priority(),
            }
            "Sorted by priority".to_string()
        }
    };
    Ok(message)
}

fn move_row<S: KeyValueStore>(
    store: &mut PlannerStore<S>,
    slot: Option<MealSlot>,
    id: &str,
    direction: Direction,
) -> String {
    match slot {
        Some(slot) => store.move_meal_row(slot, id, direction),
        None => store.move_cost_row(id, direction),
    }
    format!("Moved {}", direction)
}

fn run_pause<S: KeyValueStore>(store: &mut PlannerStore<S>, action: PauseAction) -> Result<String> {
    let message = match action {
        PauseAction::Add { start, end } => {
            let start = clock_arg(&start)?.unwrap_or_default();
            let end = clock_arg(&end)?.unwrap_or_default();
            store.add_sleep_pause(start, end);
            format!("Sleep: {}", store.sleep_total_label())
        }
        PauseAction::Edit { id, start, end } => {
            let patch = PausePatch {
                start: Some(clock_arg(&start)?.unwrap_or_default().to_string()),
                end: Some(clock_arg(&end)?.unwrap_or_default().to_string()),
            };
            let id = resolve_id(&store.day().sleep.pauses, &id)?;
            store.update_sleep_pause(&id, patch);
            format!("Sleep: {}", store.sleep_total_label())
        }
        PauseAction::Rm { id } => {
            let id = resolve_id(&store.day().sleep.pauses, &id)?;
            store.remove_sleep_pause(&id);
            format!("Sleep: {}", store.sleep_total_label())
        }
    };
    Ok(message)
}
