pub mod add;
pub mod chart;
mod common;
pub mod list;
pub mod remove;
pub mod report;
pub mod summary;
