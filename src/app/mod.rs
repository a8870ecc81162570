pub mod report;
pub mod suites;
