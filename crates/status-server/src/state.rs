use application::report::ReportService;
use infrastructure::{BroadcastEventPublisher, SeaOrmReportRepository};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared handles built once at startup and handed to every request.
pub struct AppState {
    pub reports: ReportService,
    pub broadcaster: BroadcastEventPublisher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, broadcaster: BroadcastEventPublisher) -> Self {
        let repository = Arc::new(SeaOrmReportRepository::new(db));
        let reports = ReportService::new(repository, Arc::new(broadcaster.clone()));

        Self {
            reports,
            broadcaster,
        }
    }
}
