use serde::{Deserialize, Serialize};

mod publisher;
pub use publisher::EventPublisher;

use crate::report::Report;

/// Board state changes pushed to every connected observer
///
/// Serialized as `{"type": "newReport", "payload": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum ReportEvent {
    /// A report was created or updated
    NewReport(Report),

    /// A report was reset to nominal
    ResolveReport(ResolvedReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedReport {
    pub id: String,
}

impl ReportEvent {
    pub fn resolved(id: impl Into<String>) -> Self {
        Self::ResolveReport(ResolvedReport { id: id.into() })
    }

    /// Wire name of the event
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewReport(_) => "newReport",
            Self::ResolveReport(_) => "resolveReport",
        }
    }
}
