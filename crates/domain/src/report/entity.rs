use serde::{Deserialize, Serialize};

use super::ReportSubmission;

/// Status every report falls back to when none is supplied, and the value
/// a resolve writes back.
pub const DEFAULT_STATUS: &str = "green";

/// Status record for one (loop, section) location.
///
/// The pair `loop_id`/`section` is the natural key: the store holds at most
/// one record per pair. `id` is assigned on creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub id: String,
    #[serde(rename = "loop")]
    pub loop_id: String,
    pub section: String,
    pub status: String,
    pub assigned: Option<String>,
    #[serde(default)]
    pub remark: String,
    pub timestamp: String,
}

impl Report {
    /// Build the record a submission would create if its key were new.
    ///
    /// Missing fields take their defaults: `status` becomes `"green"`,
    /// `assigned` stays `None` and `remark` becomes empty.
    pub fn from_submission(
        id: impl Into<String>,
        submission: ReportSubmission,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            loop_id: submission.loop_id,
            section: submission.section,
            status: submission
                .status
                .unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            assigned: submission.assigned,
            remark: submission.remark.unwrap_or_default(),
            timestamp: timestamp.into(),
        }
    }

    pub fn is_nominal(&self) -> bool {
        self.status == DEFAULT_STATUS
    }
}
