//! Monthly partition provisioning bookkeeping. Provisioning is
//! "create if not exists": safe to run repeatedly or ahead of schedule.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use time::{Date, OffsetDateTime};

use crate::entities::monthly_partitions;
use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Record the month (first-of-month) as provisioned. Returns true when this
/// call created the record, false when it already existed.
pub async fn provision<C: ConnectionTrait>(
    conn: &C,
    month: Date,
    now: OffsetDateTime,
) -> Result<bool, DomainError> {
    let insert = monthly_partitions::ActiveModel {
        month: Set(month),
        provisioned_at: Set(now),
        ..Default::default()
    };
    let inserted = monthly_partitions::Entity::insert(insert)
        .on_conflict(
            OnConflict::column(monthly_partitions::Column::Month)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(inserted > 0)
}

pub async fn is_provisioned<C: ConnectionTrait>(
    conn: &C,
    month: Date,
) -> Result<bool, DomainError> {
    let count = monthly_partitions::Entity::find()
        .filter(monthly_partitions::Column::Month.eq(month))
        .count(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(count > 0)
}
