use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tracing::info;

use crate::config::{DatabaseBackend, DatabaseConfig};

/// Open the connection pool and bring the schema up to date with the entities.
pub async fn init_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.url.clone());

    opt.max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(config.log_statements);

    match config.backend {
        DatabaseBackend::Sqlite => {
            opt.min_connections(1);
        }
        DatabaseBackend::Postgres => {
            opt.min_connections(2)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(1800));
        }
    }

    let db = Database::connect(opt).await?;
    db.get_schema_registry("shelter_server::entity::*")
        .sync(&db)
        .await?;

    info!(
        backend = ?db.get_database_backend(),
        max_connections = config.max_connections,
        "Database schema synced"
    );

    Ok(db)
}
