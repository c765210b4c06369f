//! Durable advisory leases for singleton jobs.
//!
//! Acquisition is an insert race on the unique `name` column, so it works
//! across instances: expired leases are swept first, then exactly one
//! contender's insert succeeds.

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use std::time::Duration;
use time::OffsetDateTime;

use crate::entities::job_locks;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::infra::db_errors;

/// Try to take the named lease until `now + lease`. Returns false when a
/// live lease is held by another run.
pub async fn try_acquire<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    lease: Duration,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    // Sweep an expired lease so a crashed run cannot wedge the job forever.
    job_locks::Entity::delete_many()
        .filter(job_locks::Column::Name.eq(name))
        .filter(job_locks::Column::LockedUntil.lte(now))
        .exec(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    let attempt = job_locks::ActiveModel {
        name: Set(name.to_owned()),
        locked_until: Set(now + lease),
        locked_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await;

    match attempt {
        Ok(_) => Ok(true),
        // Only the `name` unique violation means the lease is held; any
        // other error is a real failure and propagates.
        Err(e) => match db_errors::map_db_err(e) {
            DomainError::Conflict(ConflictKind::ArchivalLockHeld, _) => Ok(false),
            other => Err(other),
        },
    }
}

/// Release the named lease. Safe to call for a lease that no longer exists.
pub async fn release<C: ConnectionTrait>(conn: &C, name: &str) -> Result<(), DomainError> {
    job_locks::Entity::delete_many()
        .filter(job_locks::Column::Name.eq(name))
        .exec(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(())
}
