use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbKind, DbOwner, DbProfile};
use crate::error::AppError;

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(
    kind: DbKind,
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(kind, profile, owner)?;

    let mut options = ConnectOptions::new(database_url);
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    if kind == DbKind::SqliteMemory {
        // Every new connection would open a different empty database.
        options.max_connections(1).min_connections(1);
    }

    let conn = Database::connect(options).await?;
    Ok(conn)
}

/// Run one migration command as the owner role. Used by the migration CLI.
pub async fn run_migration(
    kind: DbKind,
    profile: DbProfile,
    command: MigrationCommand,
) -> Result<(), AppError> {
    if kind == DbKind::SqliteMemory {
        return Err(AppError::config(
            "in-memory SQLite is discarded when the process exits; migrate a file or Postgres instead",
        ));
    }
    let conn = connect_db(kind, profile, DbOwner::Owner).await?;
    info!(?kind, ?profile, ?command, "running migration");
    migrate(&conn, command).await?;
    conn.close().await?;
    Ok(())
}

/// Connect and bring the schema up to date.
///
/// Postgres migrates through the owner role and then serves through the app
/// role; SQLite uses one connection for both.
pub async fn bootstrap_db(
    kind: DbKind,
    profile: DbProfile,
) -> Result<DatabaseConnection, AppError> {
    match kind {
        DbKind::Postgres => {
            let owner = connect_db(kind, profile, DbOwner::Owner).await?;
            migrate(&owner, MigrationCommand::Up).await?;
            owner.close().await?;
            let conn = connect_db(kind, profile, DbOwner::App).await?;
            info!(?kind, ?profile, "database ready");
            Ok(conn)
        }
        DbKind::SqliteFile | DbKind::SqliteMemory => {
            let conn = connect_db(kind, profile, DbOwner::App).await?;
            migrate(&conn, MigrationCommand::Up).await?;
            info!(?kind, ?profile, "database ready");
            Ok(conn)
        }
    }
}
