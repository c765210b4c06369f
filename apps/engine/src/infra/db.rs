use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Connect to the store at the given URL. Does NOT run migrations.
///
/// `sqlite::memory:` URLs are pinned to a single pooled connection so every
/// transaction sees the same in-memory database; used by the test suite.
pub async fn connect_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut opts = ConnectOptions::new(database_url.to_owned());
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5));
    if database_url.starts_with("sqlite") {
        opts.max_connections(1);
    }
    Database::connect(opts).await
}
