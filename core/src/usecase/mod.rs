pub mod weekly_overview;
