use chrono::NaiveDate;
use planner_core::model::{Entry, MealSlot, NoteField};
use planner_core::service::aggregate::{format_duration, numeric_total};
use planner_core::usecase::weekly_overview::{next_week, previous_week};
use planner_core::{DailyRecord, KeyValueStore, PlannerStore, StoreStatus, WeeklyOverviewUseCase};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    done: &'static str,
    #[tabled(rename = "Pri")]
    priority: i64,
    #[tabled(rename = "Text")]
    text: String,
}

#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "Slot")]
    slot: String,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Pri")]
    priority: i64,
}

#[derive(Tabled)]
struct WeekRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Water")]
    water: String,
    #[tabled(rename = "Todos")]
    todos: String,
    #[tabled(rename = "Habits")]
    habits: String,
    #[tabled(rename = "Sleep")]
    sleep: String,
    #[tabled(rename = "Mood")]
    mood: String,
    #[tabled(rename = "Kcal")]
    calories: String,
    #[tabled(rename = "Costs")]
    costs: String,
}

fn short_id<T: Entry>(entry: &T) -> String {
    entry.id().chars().take(8).collect()
}

fn check(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

fn print_table<T: Tabled>(rows: Vec<T>) {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

fn section(title: &str, subtitle: String) {
    println!("\n\x1b[1;36m{}\x1b[0m {}", title, subtitle);
}

pub fn print_day<S: KeyValueStore>(store: &PlannerStore<S>) {
    let day = store.day();
    let weekday = planner_core::date::from_key(&day.date_key)
        .map(|d| d.format("%A").to_string())
        .unwrap_or_default();
    let status = match store.status() {
        StoreStatus::Dirty => "Unsaved changes",
        StoreStatus::Loaded | StoreStatus::Saved => "Saved",
    };
    println!("\x1b[1m{} {}\x1b[0m ({})", weekday, day.date_key, status);

    let cups: String = day
        .water_cups
        .as_slice()
        .iter()
        .map(|c| if *c { '●' } else { '○' })
        .collect();
    section("WATER", format!("{} {}/8", cups, day.water_cups.done_count()));

    let sleep = &day.sleep;
    section(
        "SLEEP / MOOD",
        format!(
            "{} → {} (total {}) · mood {}",
            sleep.start.as_deref().unwrap_or("--:--"),
            sleep.end.as_deref().unwrap_or("--:--"),
            store.sleep_total_label(),
            day.mood
                .map(|m| format!("{} {}", m.emoji(), m.label()))
                .unwrap_or_else(|| "—".into()),
        ),
    );
    for pause in &sleep.pauses {
        println!("  pause {} {} → {}", short_id(pause), pause.start, pause.end);
    }
    if let Some(hours) = day.legacy_sleep_hours {
        println!("  recorded earlier as {}h", hours);
    }

    print_items(&day);
    print_amounts(&day, store.total_calories(), store.total_costs());

    section("NOTES", String::new());
    for field in NoteField::ALL {
        let text = day.note_field(field);
        if !text.is_empty() {
            println!("  {}: {}", field.key(), text);
        }
    }
}

fn print_items(day: &DailyRecord) {
    let done = day.todos.iter().filter(|t| t.done).count();
    section("TODOS", format!("{}/{} done", done, day.todos.len()));
    if !day.todos.is_empty() {
        print_table(
            day.todos
                .iter()
                .map(|t| ItemRow {
                    id: short_id(t),
                    done: check(t.done),
                    priority: t.priority,
                    text: t.text.clone(),
                })
                .collect(),
        );
    }

    let done = day.habits.iter().filter(|h| h.checked).count();
    section("HABITS", format!("{}/{} done", done, day.habits.len()));
    if !day.habits.is_empty() {
        print_table(
            day.habits
                .iter()
                .map(|h| {
                    let text = match &h.icon {
                        Some(icon) => format!("{} {}", icon, h.title),
                        None => h.title.clone(),
                    };
                    ItemRow { id: short_id(h), done: check(h.checked), priority: h.priority, text }
                })
                .collect(),
        );
    }

    let done = day.cleaning_items.iter().filter(|c| c.done).count();
    section("CLEANING", format!("{}/{} done", done, day.cleaning_items.len()));
    if !day.cleaning_items.is_empty() {
        print_table(
            day.cleaning_items
                .iter()
                .map(|c| ItemRow {
                    id: short_id(c),
                    done: check(c.done),
                    priority: c.priority,
                    text: c.text.clone(),
                })
                .collect(),
        );
    }
}

fn print_amounts(day: &DailyRecord, calories: f64, costs: f64) {
    section("MEALS", format!("{} kcal", calories));
    let mut rows = Vec::new();
    for slot in MealSlot::ALL {
        let slot_rows = day.meals.slot(slot);
        if slot_rows.is_empty() {
            continue;
        }
        for row in slot_rows {
            rows.push(AmountRow {
                slot: format!("{} ({})", slot, numeric_total(slot_rows)),
                id: short_id(row),
                title: row.title.clone(),
                value: row.value.clone(),
                priority: row.priority,
            });
        }
    }
    if !rows.is_empty() {
        print_table(rows);
    }

    section("COSTS", format!("total {}", costs));
    if !day.costs.is_empty() {
        print_table(
            day.costs
                .iter()
                .map(|r| AmountRow {
                    slot: "cost".to_string(),
                    id: short_id(r),
                    title: r.title.clone(),
                    value: r.value.clone(),
                    priority: r.priority,
                })
                .collect(),
        );
    }
}

pub fn print_week<S: KeyValueStore>(store: &PlannerStore<S>, anchor: NaiveDate) {
    let overview = WeeklyOverviewUseCase::new(store).overview(anchor);

    println!(
        "\n\x1b[1;36mWeek of {}\x1b[0m (prev: {}, next: {})",
        overview.days.first().map(|d| d.date_key.as_str()).unwrap_or(overview.anchor.as_str()),
        previous_week(anchor),
        next_week(anchor),
    );

    let rows = overview
        .days
        .iter()
        .map(|d| WeekRow {
            date: format!("{} ({})", d.date_key, d.weekday),
            water: format!("{}/8", d.water_done),
            todos: format!("{}/{}", d.todos_done, d.todos_total),
            habits: format!("{}/{}", d.habits_done, d.habits_total),
            sleep: format_duration(d.sleep_minutes),
            mood: d.mood.map(|m| m.emoji().to_string()).unwrap_or_else(|| "—".into()),
            calories: format!("{}", d.calories),
            costs: format!("{}", d.costs),
        })
        .collect();
    print_table::<WeekRow>(rows);

    let s = &overview.summary;
    println!(
        "Totals: sleep {} · {} kcal · costs {} · todos {}/{} · habits {}/{} · water {}/{}",
        format_duration(s.sleep_minutes),
        s.calories,
        s.costs,
        s.todos_done,
        s.todos_total,
        s.habits_done,
        s.habits_total,
        s.water_done,
        s.water_total,
    );
}
