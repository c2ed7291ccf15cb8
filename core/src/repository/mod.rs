pub mod file;
pub mod memory;
pub mod planner_db;
pub mod traits;

// Re-export
pub use file::FileKeyValueStore;
pub use memory::MemoryKeyValueStore;
pub use planner_db::{LoadSource, PlannerRepository};
pub use traits::KeyValueStore;
