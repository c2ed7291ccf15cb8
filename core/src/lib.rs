pub mod config;
pub mod date;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;
pub mod usecase;

pub use config::PlannerConfig;
pub use error::StorageError;
pub use model::{DailyRecord, MealSlot, Mood, NoteField, PlannerDatabase};
pub use repository::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PlannerRepository};
pub use service::collection::Direction;
pub use service::dto::{DaySummary, WeekOverview, WeeklySummary};
pub use service::planner_store::{PlannerStore, StoreStatus};
pub use usecase::weekly_overview::WeeklyOverviewUseCase;
