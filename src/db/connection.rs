use std::time::Duration;

use anyhow::Context;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseConfig;

pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut options = ConnectOptions::new(cfg.url.clone());
    options
        .max_connections(cfg.max_connections)
        .min_connections(cfg.min_idle)
        .connect_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .context("failed to open database connection")?;
    db.ping().await.context("database did not answer ping")?;
    info!(
        backend = ?db.get_database_backend(),
        max_connections = cfg.max_connections,
        "connected to database"
    );
    Ok(db)
}
