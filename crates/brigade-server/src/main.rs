//! Server binary for the Brigade ordering backend.
//!
//! Wires together configuration, the `PostgreSQL` pool, migrations, and
//! the Axum API server.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `brigade-config.yaml` (optional; env vars
//!    override)
//! 3. Connect the `PostgreSQL` pool
//! 4. Run pending migrations
//! 5. Serve the API until the process is terminated

mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use brigade_api::{start_server, AppState, ServerConfig};
use brigade_db::{PostgresConfig, PostgresPool};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::ServiceConfig;

/// Path of the optional YAML configuration file, relative to the working
/// directory.
const CONFIG_PATH: &str = "brigade-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, database connection, migrations,
/// or the server itself fail.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("brigade-server starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    // 3. Connect to PostgreSQL.
    let pg_config = PostgresConfig::new(&config.database.url)
        .with_max_connections(config.database.max_connections);
    let pool = PostgresPool::connect(&pg_config)
        .await
        .context("connecting to PostgreSQL")?;

    // 4. Run migrations.
    pool.run_migrations().await.context("running migrations")?;

    // 5. Serve.
    let state = Arc::new(AppState::new(pool));
    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    start_server(&server_config, state)
        .await
        .context("running API server")?;

    info!("brigade-server stopped");
    Ok(())
}

/// Load the YAML configuration, falling back to defaults (plus env
/// overrides) when the file is absent.
fn load_config() -> anyhow::Result<ServiceConfig> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        ServiceConfig::from_file(path)
            .with_context(|| format!("loading configuration from {CONFIG_PATH}"))
    } else {
        warn!("{CONFIG_PATH} not found, using defaults and environment variables");
        Ok(ServiceConfig::parse("{}")?)
    }
}
