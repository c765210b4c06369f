use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, commits on Ok and rolls back on
/// Err. Rollback is best-effort and the original error is preserved.
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, DomainError>
where
    F: for<'c> FnOnce(
        &'c DatabaseTransaction,
    ) -> Pin<Box<dyn Future<Output = Result<R, DomainError>> + Send + 'c>>,
{
    let txn = db.begin().await.map_err(db_errors::map_db_err)?;
    let out = f(&txn).await;

    match out {
        Ok(val) => {
            txn.commit().await.map_err(db_errors::map_db_err)?;
            Ok(val)
        }
        Err(err) => {
            // Best-effort rollback; preserve original error
            let _ = txn.rollback().await;
            Err(err)
        }
    }
}
