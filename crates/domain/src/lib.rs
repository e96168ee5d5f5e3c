//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - The Report entity and the submission it is built from
//! - Board events pushed to observers
//! - Repository and publisher interfaces (traits)

pub mod error;
pub mod event;
pub mod report;

// Re-export commonly used types
pub use error::{DomainError, Result};
pub use event::{EventPublisher, ReportEvent};
pub use report::{Report, ReportRepository, ReportSubmission};
