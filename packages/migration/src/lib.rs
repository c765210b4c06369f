pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection, DbErr};

mod m20260101_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260101_000001_init::Migration)]
    }
}

/// Apply all pending migrations. Shared by deployment tooling and tests.
pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    tracing::info!("▶ applying migrations (backend={backend:?})");
    match Migrator::up(db, None).await {
        Ok(()) => {
            tracing::info!("✅ migrations up to date");
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ migration failed: {e}");
            Err(e)
        }
    }
}
