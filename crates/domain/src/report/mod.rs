mod entity;
mod repository;
mod submission;
mod timestamp;

pub use entity::{DEFAULT_STATUS, Report};
pub use repository::ReportRepository;
pub use submission::ReportSubmission;
pub use timestamp::{MANILA_UTC_OFFSET_HOURS, format_manila, manila_now, manila_offset};
