use super::ReportEvent;
use async_trait::async_trait;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        event: ReportEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
