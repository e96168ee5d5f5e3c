pub mod entities;
mod report_repository;

pub use report_repository::SeaOrmReportRepository;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use tracing::info;

/// Open the report store.
///
/// In-memory SQLite lives inside a single connection, so the pool is pinned
/// to exactly one connection for those URLs.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);

    if database_url.starts_with("sqlite::memory:") {
        options.max_connections(1).min_connections(1);
    }

    let db = Database::connect(options).await?;
    info!(backend = ?db.get_database_backend(), "Connected to report store");
    Ok(db)
}
