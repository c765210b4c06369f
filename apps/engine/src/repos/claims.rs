//! Claim repository. The unique (user_id, claim_date) constraint is the
//! serialization point for daily claims: inserts are blind and the
//! constraint violation comes back as a tagged result, not an error.

use std::collections::HashSet;

use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::{Date, OffsetDateTime};

use crate::entities::{claim_history, claims};
use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Claim domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub id: i64,
    pub user_id: i64,
    pub card_id: i64,
    pub daily_number_id: i64,
    pub claim_date: Date,
    pub number: i32,
    pub claimed_at: OffsetDateTime,
}

impl From<claims::Model> for Claim {
    fn from(model: claims::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            card_id: model.card_id,
            daily_number_id: model.daily_number_id,
            claim_date: model.claim_date,
            number: model.number,
            claimed_at: model.claimed_at,
        }
    }
}

/// Data for creating a claim (reduces parameter count)
#[derive(Debug, Clone)]
pub struct ClaimData {
    pub user_id: i64,
    pub card_id: i64,
    pub daily_number_id: i64,
    pub claim_date: Date,
    pub number: i32,
}

/// Outcome of a blind claim insert. The duplicate case is expected traffic
/// (retries, double taps), so it is data rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimInsert {
    Inserted(Claim),
    AlreadyClaimed,
}

/// Insert a claim, letting the (user_id, claim_date) constraint arbitrate.
/// No existence check beforehand: under N concurrent attempts exactly one
/// insert succeeds and the rest observe `AlreadyClaimed`.
pub async fn insert_claim<C: ConnectionTrait>(
    conn: &C,
    data: ClaimData,
    now: OffsetDateTime,
) -> Result<ClaimInsert, DomainError> {
    let attempt = claims::ActiveModel {
        user_id: Set(data.user_id),
        card_id: Set(data.card_id),
        daily_number_id: Set(data.daily_number_id),
        claim_date: Set(data.claim_date),
        number: Set(data.number),
        claimed_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await;

    match attempt {
        Ok(model) => Ok(ClaimInsert::Inserted(Claim::from(model))),
        Err(e) => {
            let mapped = db_errors::map_db_err(e);
            if mapped.is_duplicate_claim() {
                Ok(ClaimInsert::AlreadyClaimed)
            } else {
                Err(mapped)
            }
        }
    }
}

pub async fn find_by_user_and_date<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    claim_date: Date,
) -> Result<Option<Claim>, DomainError> {
    let row = claims::Entity::find()
        .filter(claims::Column::UserId.eq(user_id))
        .filter(claims::Column::ClaimDate.eq(claim_date))
        .one(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(row.map(Claim::from))
}

/// All claimed numbers for (user, card), read fresh from durable state.
/// Line counts are always recomputed from this set, never from a cache.
pub async fn claimed_numbers_for_card<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    card_id: i64,
) -> Result<HashSet<i32>, DomainError> {
    let rows = claims::Entity::find()
        .filter(claims::Column::UserId.eq(user_id))
        .filter(claims::Column::CardId.eq(card_id))
        .all(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(rows.into_iter().map(|m| m.number).collect())
}

pub async fn count_for_user_and_date<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    claim_date: Date,
) -> Result<u64, DomainError> {
    use sea_orm::PaginatorTrait;
    claims::Entity::find()
        .filter(claims::Column::UserId.eq(user_id))
        .filter(claims::Column::ClaimDate.eq(claim_date))
        .count(conn)
        .await
        .map_err(db_errors::map_db_err)
}

/// Copy claims dated in `[start, end)` into history, then delete them from
/// the active table. Returns the archived row count; re-copies dedupe on
/// the history (user_id, claim_date) constraint.
pub async fn archive_month<C: ConnectionTrait>(
    conn: &C,
    start: Date,
    end: Date,
    now: OffsetDateTime,
) -> Result<u64, DomainError> {
    let rows = claims::Entity::find()
        .filter(claims::Column::ClaimDate.gte(start))
        .filter(claims::Column::ClaimDate.lt(end))
        .all(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    let mut copied = 0u64;
    for row in &rows {
        let insert = claim_history::ActiveModel {
            claim_id: Set(row.id),
            user_id: Set(row.user_id),
            card_id: Set(row.card_id),
            daily_number_id: Set(row.daily_number_id),
            claim_date: Set(row.claim_date),
            number: Set(row.number),
            claimed_at: Set(row.claimed_at),
            archived_at: Set(now),
            ..Default::default()
        };
        copied += claim_history::Entity::insert(insert)
            .on_conflict(
                OnConflict::columns([
                    claim_history::Column::UserId,
                    claim_history::Column::ClaimDate,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(db_errors::map_db_err)?;
    }

    claims::Entity::delete_many()
        .filter(claims::Column::ClaimDate.gte(start))
        .filter(claims::Column::ClaimDate.lt(end))
        .exec(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    Ok(copied)
}

/// Count historical claims dated in `[start, end)`.
pub async fn count_history_in_range<C: ConnectionTrait>(
    conn: &C,
    start: Date,
    end: Date,
) -> Result<u64, DomainError> {
    use sea_orm::PaginatorTrait;
    claim_history::Entity::find()
        .filter(claim_history::Column::ClaimDate.gte(start))
        .filter(claim_history::Column::ClaimDate.lt(end))
        .count(conn)
        .await
        .map_err(db_errors::map_db_err)
}
