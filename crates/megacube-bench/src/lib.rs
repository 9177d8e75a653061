pub mod report;
pub mod runner;
