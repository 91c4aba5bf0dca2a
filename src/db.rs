use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Statement};

use crate::error::AppResult;

const SQLITE_PRAGMAS: [&str; 2] = ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(options: impl Into<ConnectOptions>) -> AppResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    if db.get_database_backend() == DbBackend::Sqlite {
        for pragma in SQLITE_PRAGMAS {
            db.execute(Statement::from_string(DbBackend::Sqlite, pragma.to_string())).await?;
        }
    }

    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Fresh migrated in-memory database. A single pooled connection keeps every
/// query on the same in-memory instance.
#[cfg(test)]
pub async fn connect_in_memory() -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    connect_and_migrate(options).await
}
