pub mod app;
pub mod timesheets;
