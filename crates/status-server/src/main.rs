use anyhow::Result;
use clap::Parser;
use infrastructure::{BroadcastEventPublisher, ServerConfig};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use status_server::{api, state::AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding an optional `default.toml`
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// API Port (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("info,status_server=debug,application=debug,infrastructure=debug")
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    info!("📋 Status Board Server Starting...");

    dotenv::dotenv().ok();
    let mut config = ServerConfig::load(&args.config_dir)?;
    if let Some(port) = args.port {
        config.port = port;
    }

    // 1. Connect to the report store
    info!("Connecting to database...");
    let db = infrastructure::database::connect(&config.database_url).await?;

    info!("Running database migrations...");
    Migrator::up(&db, None).await?;
    info!("✅ Migrations applied successfully");

    // 2. Initialize State
    let broadcaster = BroadcastEventPublisher::with_capacity(config.broadcast_capacity);
    let state = Arc::new(AppState::new(db, broadcaster));

    // 3. Start API Server
    let app = api::create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("🚀 Server running on port {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
