//! Infrastructure layer - External integrations

pub mod config;
pub mod database;
pub mod messaging;

pub use config::ServerConfig;
pub use database::SeaOrmReportRepository;
pub use messaging::broadcast_publisher::BroadcastEventPublisher;
