//! Application layer - Use cases and business workflows

pub mod report;

pub use report::ReportService;
