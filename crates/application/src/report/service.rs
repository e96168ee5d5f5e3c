use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use domain::event::{EventPublisher, ReportEvent};
use domain::report::{Report, ReportRepository, ReportSubmission, manila_now};
use domain::{DomainError, Result};

/// Board use cases: every mutation is persisted first and broadcast only
/// after the store confirmed it.
pub struct ReportService {
    repository: Arc<dyn ReportRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ReportService {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn list_reports(&self) -> Result<Vec<Report>> {
        self.repository.find_all().await
    }

    pub async fn find_report(&self, loop_id: &str, section: &str) -> Result<Option<Report>> {
        self.repository.find_by_key(loop_id, section).await
    }

    pub async fn get_report(&self, id: &str) -> Result<Report> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(id.to_string()))
    }

    /// Create the report for the submission's (loop, section), or merge the
    /// submission into the one already there, then emit `newReport`.
    pub async fn submit_report(&self, submission: ReportSubmission) -> Result<Report> {
        submission.validate()?;

        let candidate =
            Report::from_submission(Uuid::new_v4().to_string(), submission, manila_now());
        let report = self.repository.upsert(candidate).await?;

        info!(
            id = %report.id,
            loop_id = %report.loop_id,
            section = %report.section,
            status = %report.status,
            nominal = report.is_nominal(),
            "📝 Report saved"
        );

        self.broadcast(ReportEvent::NewReport(report.clone())).await;
        Ok(report)
    }

    /// Reset a report to nominal, then emit `resolveReport`.
    ///
    /// An unknown id yields `NotFound` and nothing is broadcast.
    pub async fn resolve_report(&self, id: &str) -> Result<Report> {
        let report = self
            .repository
            .resolve(id, &manila_now())
            .await?
            .ok_or_else(|| DomainError::NotFound(id.to_string()))?;

        info!(
            id = %report.id,
            loop_id = %report.loop_id,
            section = %report.section,
            "✅ Report resolved"
        );

        self.broadcast(ReportEvent::resolved(report.id.clone())).await;
        Ok(report)
    }

    // The write already happened, so a failed broadcast is only logged
    async fn broadcast(&self, event: ReportEvent) {
        let name = event.name();
        match self.event_publisher.publish(event).await {
            Ok(()) => debug!(event = name, "Event published"),
            Err(e) => warn!(event = name, error = %e, "Failed to publish event"),
        }
    }
}
