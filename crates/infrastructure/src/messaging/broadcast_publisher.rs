//! In-process fan-out of board events to every connected observer.

use async_trait::async_trait;
use domain::event::{EventPublisher, ReportEvent};
use tokio::sync::broadcast;
use tracing::debug;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Best-effort publisher backed by a `tokio::sync::broadcast` channel.
///
/// Observers that subscribe later never see earlier events, and a slow
/// observer that falls more than `capacity` events behind skips the gap.
#[derive(Clone)]
pub struct BroadcastEventPublisher {
    sender: broadcast::Sender<ReportEvent>,
}

impl BroadcastEventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReportEvent> {
        self.sender.subscribe()
    }

    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for BroadcastEventPublisher {
    async fn publish(
        &self,
        event: ReportEvent,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let name = event.name();
        // No observers is not an error
        let delivered = self.sender.send(event).unwrap_or(0);
        debug!(event = name, observers = delivered, "📡 Event broadcast");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_without_observers_succeeds() {
        let publisher = BroadcastEventPublisher::new();
        assert_eq!(publisher.observer_count(), 0);

        let result = publisher.publish(ReportEvent::resolved("abc")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_every_observer_receives_event() {
        let publisher = BroadcastEventPublisher::with_capacity(8);
        let mut first = publisher.subscribe();
        let mut second = publisher.subscribe();
        assert_eq!(publisher.observer_count(), 2);

        publisher
            .publish(ReportEvent::resolved("abc"))
            .await
            .unwrap();

        assert_eq!(first.recv().await.unwrap(), ReportEvent::resolved("abc"));
        assert_eq!(second.recv().await.unwrap(), ReportEvent::resolved("abc"));
    }

    #[tokio::test]
    async fn test_late_observer_sees_no_backlog() {
        let publisher = BroadcastEventPublisher::with_capacity(8);
        let _early = publisher.subscribe();
        publisher
            .publish(ReportEvent::resolved("old"))
            .await
            .unwrap();

        let mut late = publisher.subscribe();
        publisher
            .publish(ReportEvent::resolved("new"))
            .await
            .unwrap();

        assert_eq!(late.recv().await.unwrap(), ReportEvent::resolved("new"));
        assert!(late.try_recv().is_err());
    }
}
