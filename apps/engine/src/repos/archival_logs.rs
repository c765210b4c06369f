//! Append-only audit log for archival runs.

use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use time::{Date, OffsetDateTime};

use crate::entities::archival_logs::{self, ArchivalStatus};
use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Archival log domain model
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivalLog {
    pub id: i64,
    pub reset_date: Date,
    pub status: ArchivalStatus,
    pub metadata: serde_json::Value,
    pub executed_at: OffsetDateTime,
}

impl From<archival_logs::Model> for ArchivalLog {
    fn from(model: archival_logs::Model) -> Self {
        Self {
            id: model.id,
            reset_date: model.reset_date,
            status: model.status,
            metadata: model.metadata,
            executed_at: model.executed_at,
        }
    }
}

pub async fn append<C: ConnectionTrait>(
    conn: &C,
    reset_date: Date,
    status: ArchivalStatus,
    metadata: serde_json::Value,
    now: OffsetDateTime,
) -> Result<ArchivalLog, DomainError> {
    let model = archival_logs::ActiveModel {
        reset_date: Set(reset_date),
        status: Set(status),
        metadata: Set(metadata),
        executed_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_errors::map_db_err)?;
    Ok(ArchivalLog::from(model))
}

/// Most recent log entry, if any. Operational follow-up after FAILED or
/// PARTIAL runs starts here.
pub async fn latest<C: ConnectionTrait>(conn: &C) -> Result<Option<ArchivalLog>, DomainError> {
    let row = archival_logs::Entity::find()
        .order_by_desc(archival_logs::Column::Id)
        .one(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(row.map(ArchivalLog::from))
}
