//! SeaORM -> DomainError translation helpers.
//!
//! Repos convert `sea_orm::DbErr` into `crate::errors::domain::DomainError`
//! here so the unique constraints that arbitrate claim/reward races surface
//! as typed conflicts instead of opaque database errors.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// error messages. Composite indexes list several columns; the first
/// table.column pair is enough to identify the constraint.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        let table_column = rest
            .split_whitespace()
            .next()
            .map(|t| t.trim_end_matches(','));
        return table_column;
    }
    None
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "claims.user_id" | "claims.claim_date" => Some((
            ConflictKind::DuplicateClaim,
            "Today's number is already claimed",
        )),
        "rewards.user_id" | "rewards.month" => Some((
            ConflictKind::DuplicateReward,
            "Reward already issued for this month",
        )),
        "job_locks.name" => Some((
            ConflictKind::ArchivalLockHeld,
            "Job lock is held by another run",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_claims_user_claim_date") {
        return Some((
            ConflictKind::DuplicateClaim,
            "Today's number is already claimed",
        ));
    }
    if error_msg.contains("ux_rewards_user_month") {
        return Some((
            ConflictKind::DuplicateReward,
            "Reward already issued for this month",
        ));
    }
    if error_msg.contains("ux_job_locks_name") {
        return Some((
            ConflictKind::ArchivalLockHeld,
            "Job lock is held by another run",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                crate::errors::domain::NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "Unique constraint violation");

        // Try to extract table.column from SQLite format errors first
        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        // Check for PostgreSQL constraint name patterns
        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(raw_error = %error_msg, "Foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_claim_unique_violation_maps_to_duplicate_claim() {
        let err = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: claims.user_id, claims.claim_date".to_string(),
        );
        let mapped = map_db_err(err);
        assert!(mapped.is_duplicate_claim(), "got {mapped:?}");
    }

    #[test]
    fn postgres_reward_unique_violation_maps_to_duplicate_reward() {
        let err = sea_orm::DbErr::Custom(
            "error returned from database: duplicate key value violates unique constraint \"ux_rewards_user_month\"".to_string(),
        );
        let mapped = map_db_err(err);
        assert!(mapped.is_duplicate_reward(), "got {mapped:?}");
    }

    #[test]
    fn job_lock_violation_maps_to_lock_held() {
        let err =
            sea_orm::DbErr::Custom("UNIQUE constraint failed: job_locks.name".to_string());
        assert_eq!(
            map_db_err(err),
            DomainError::conflict(
                ConflictKind::ArchivalLockHeld,
                "Job lock is held by another run"
            )
        );
    }

    #[test]
    fn unknown_unique_violation_falls_back_to_generic_conflict() {
        let err = sea_orm::DbErr::Custom("UNIQUE constraint failed: widgets.code".to_string());
        assert!(matches!(
            map_db_err(err),
            DomainError::Conflict(ConflictKind::Other(_), _)
        ));
    }
}
