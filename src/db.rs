use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};

use crate::{config::sqlite_file_path, error::AppResult};

const PRAGMAS: [&str; 2] = ["PRAGMA journal_mode=WAL", "PRAGMA synchronous=NORMAL"];

pub async fn connect_and_migrate(database_url: &str) -> AppResult<DatabaseConnection> {
    let existed = sqlite_file_path(database_url).is_some_and(|path| path.exists());
    if existed {
        tracing::info!(url = %database_url, "opening existing movie store");
    } else {
        tracing::info!(url = %database_url, "initializing empty movie store");
    }

    connect_with(ConnectOptions::new(database_url)).await
}

pub async fn connect_with(options: ConnectOptions) -> AppResult<DatabaseConnection> {
    let db = Database::connect(options).await?;

    for pragma in PRAGMAS {
        db.execute(Statement::from_string(db.get_database_backend(), pragma.to_string())).await?;
    }

    // creates the movie table when missing, no-op otherwise
    Migrator::up(&db, None).await?;
    Ok(db)
}
