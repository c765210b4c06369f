//! Daily number repository. One globally published number per calendar
//! date; read-only to the engine (seeding is for the external generator
//! and test fixtures).

use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::{Date, OffsetDateTime};

use crate::entities::daily_numbers;
use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Daily number domain model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyNumber {
    pub id: i64,
    pub date: Date,
    pub number: i32,
}

impl From<daily_numbers::Model> for DailyNumber {
    fn from(model: daily_numbers::Model) -> Self {
        Self {
            id: model.id,
            date: model.date,
            number: model.number,
        }
    }
}

pub async fn find_by_date<C: ConnectionTrait>(
    conn: &C,
    date: Date,
) -> Result<Option<DailyNumber>, DomainError> {
    let row = daily_numbers::Entity::find()
        .filter(daily_numbers::Column::Date.eq(date))
        .one(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(row.map(DailyNumber::from))
}

/// Publish a number for a date. The date unique constraint rejects a second
/// publication for the same day.
pub async fn publish<C: ConnectionTrait>(
    conn: &C,
    date: Date,
    number: i32,
    now: OffsetDateTime,
) -> Result<DailyNumber, DomainError> {
    let model = daily_numbers::ActiveModel {
        date: Set(date),
        number: Set(number),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_errors::map_db_err)?;
    Ok(DailyNumber::from(model))
}
