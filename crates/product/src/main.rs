use anyhow::{Context, Result};
use product::{
    bootstrap::connect_db, handler::AppRouter, middleware::cors::CorsPolicy, state::AppState,
};
use shared::{
    config::{Config, ConnectionManager},
    utils::{Telemetry, init_logger},
};
use tracing::{error, info, warn};

const SERVICE_NAME: &str = "product-service";

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = Config::init().context("Failed to load configuration")?;

    let telemetry = match config.otel_endpoint.as_deref() {
        Some(endpoint) => Some(
            Telemetry::init(SERVICE_NAME, endpoint).context("Failed to initialize telemetry")?,
        ),
        None => None,
    };

    let _log_guard = init_logger(
        telemetry.as_ref().map(Telemetry::logger_provider),
        SERVICE_NAME,
        config.is_dev,
        config.enable_file_log,
    );

    info!("🚀 Starting Product Service initialization...");

    let db_pool =
        ConnectionManager::new_pool(&config.database_url, config.db_min_conn, config.db_max_conn)
            .context("Failed to initialize database pool")?;

    if !connect_db(&db_pool, config.run_migrations).await {
        warn!("⚠️ Serving without a confirmed database connection");
    }

    if config.frontend_url.is_none() {
        warn!("⚠️ FRONTEND_URL is not set, cross-origin requests will be rejected");
    }

    let state = AppState::new(db_pool, CorsPolicy::new(config.frontend_url.clone()));

    let result = AppRouter::serve(config.port, state).await;

    if let Some(telemetry) = telemetry {
        if let Err(e) = telemetry.shutdown() {
            error!("Failed to shutdown telemetry: {e}");
        }
    }

    info!("✅ Product Service shutdown complete.");
    result
}
