use anyhow::Result;
use shared::config::{ConnectionManager, ConnectionPool};
use tracing::{error, info};

pub const DB_CONNECTION_ERROR: &str = "Error al conectar la base de datos";

/// One-shot connectivity check run at startup.
///
/// On failure the fixed [`DB_CONNECTION_ERROR`] message is logged and
/// `false` returned; the caller keeps serving and requests fail on their
/// own store calls. On success the embedded migrations are applied when
/// `run_migrations` is set.
pub async fn connect_db(pool: &ConnectionPool, run_migrations: bool) -> bool {
    if let Err(err) = ConnectionManager::authenticate(pool).await {
        error!(error = %err, "{DB_CONNECTION_ERROR}");
        return false;
    }

    info!("✅ Database connection established");

    if run_migrations {
        match migrate(pool).await {
            Ok(()) => info!("✅ Database migrations applied"),
            Err(err) => error!("❌ Failed to run database migrations: {err:?}"),
        }
    }

    true
}

pub async fn migrate(pool: &ConnectionPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
