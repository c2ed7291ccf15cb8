pub mod aggregate;
pub mod collection;
pub mod dto;
pub mod planner_store;
