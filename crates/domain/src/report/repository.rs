use super::Report;
use crate::DomainError;
use async_trait::async_trait;

/// Repository interface for Report persistence
///
/// Implementations must keep at most one record per (loop, section) pair.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Every stored report, in storage order
    async fn find_all(&self) -> Result<Vec<Report>, DomainError>;

    /// Exact match on both key fields
    async fn find_by_key(&self, loop_id: &str, section: &str)
    -> Result<Option<Report>, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Report>, DomainError>;

    /// Insert `candidate`, or merge it into the record already holding its key.
    ///
    /// On merge the existing `id` survives, `status`, `assigned` and
    /// `timestamp` are overwritten, and `remark` is overwritten only when the
    /// candidate's remark is non-empty. Returns the record as persisted.
    async fn upsert(&self, candidate: Report) -> Result<Report, DomainError>;

    /// Reset the record to `"green"` with an empty remark.
    ///
    /// Returns `None` when no record has this id.
    async fn resolve(&self, id: &str, timestamp: &str) -> Result<Option<Report>, DomainError>;
}
