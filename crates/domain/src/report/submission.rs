use serde::{Deserialize, Serialize};

use crate::error::{DomainError, Result};

/// An incoming status report, as submitted by a client.
///
/// Only the location key is mandatory. How the optional fields merge into an
/// existing record is decided by [`ReportRepository::upsert`](super::ReportRepository::upsert).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSubmission {
    #[serde(rename = "loop")]
    pub loop_id: String,
    pub section: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assigned: Option<String>,
    #[serde(default)]
    pub remark: Option<String>,
}

impl ReportSubmission {
    /// Reject submissions whose location key is blank.
    pub fn validate(&self) -> Result<()> {
        if self.loop_id.trim().is_empty() {
            return Err(DomainError::InvalidReport(
                "loop cannot be empty".to_string(),
            ));
        }
        if self.section.trim().is_empty() {
            return Err(DomainError::InvalidReport(
                "section cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
