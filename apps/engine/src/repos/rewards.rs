//! Reward repository. The unique (user_id, month) constraint guarantees
//! at most one reward row per user per month.

use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};
use time::{Date, OffsetDateTime};

use crate::entities::{reward_history, rewards};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::infra::db_errors;

/// Reward domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Reward {
    pub id: i64,
    pub user_id: i64,
    pub card_id: i64,
    pub month: Date,
    pub line_types: Vec<String>,
    pub issued_at: OffsetDateTime,
}

impl From<rewards::Model> for Reward {
    fn from(model: rewards::Model) -> Self {
        let line_types = model
            .line_types
            .as_array()
            .map(|a| {
                a.iter()
                    .filter_map(|v| v.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();
        Self {
            id: model.id,
            user_id: model.user_id,
            card_id: model.card_id,
            month: model.month,
            line_types,
            issued_at: model.issued_at,
        }
    }
}

pub async fn find_by_user_and_month<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    month: Date,
) -> Result<Option<Reward>, DomainError> {
    let row = rewards::Entity::find()
        .filter(rewards::Column::UserId.eq(user_id))
        .filter(rewards::Column::Month.eq(month))
        .one(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(row.map(Reward::from))
}

/// Outcome of a reward insert under the (user_id, month) constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum RewardInsert {
    Inserted(Reward),
    AlreadyIssued,
}

/// Insert with ON CONFLICT DO NOTHING on (user_id, month). A losing race
/// comes back as `AlreadyIssued`, never as a statement error: on Postgres a
/// raised unique violation would abort the enclosing claim transaction and
/// take the fallback read down with it.
pub async fn insert_reward<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    card_id: i64,
    month: Date,
    line_types: &[String],
    now: OffsetDateTime,
) -> Result<RewardInsert, DomainError> {
    let model = rewards::ActiveModel {
        user_id: Set(user_id),
        card_id: Set(card_id),
        month: Set(month),
        line_types: Set(serde_json::json!(line_types)),
        issued_at: Set(now),
        ..Default::default()
    };
    let inserted = rewards::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([rewards::Column::UserId, rewards::Column::Month])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    if inserted == 0 {
        return Ok(RewardInsert::AlreadyIssued);
    }
    let reward = require_by_user_and_month(conn, user_id, month).await?;
    Ok(RewardInsert::Inserted(reward))
}

/// Copy rewards for months in `[start, end)` into history, then delete them
/// from the active table. Returns the archived row count.
pub async fn archive_month<C: ConnectionTrait>(
    conn: &C,
    start: Date,
    end: Date,
    now: OffsetDateTime,
) -> Result<u64, DomainError> {
    let rows = rewards::Entity::find()
        .filter(rewards::Column::Month.gte(start))
        .filter(rewards::Column::Month.lt(end))
        .all(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    let mut copied = 0u64;
    for row in &rows {
        let insert = reward_history::ActiveModel {
            reward_id: Set(row.id),
            user_id: Set(row.user_id),
            card_id: Set(row.card_id),
            month: Set(row.month),
            line_types: Set(row.line_types.clone()),
            issued_at: Set(row.issued_at),
            archived_at: Set(now),
            ..Default::default()
        };
        copied += reward_history::Entity::insert(insert)
            .on_conflict(
                OnConflict::columns([
                    reward_history::Column::UserId,
                    reward_history::Column::Month,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(db_errors::map_db_err)?;
    }

    rewards::Entity::delete_many()
        .filter(rewards::Column::Month.gte(start))
        .filter(rewards::Column::Month.lt(end))
        .exec(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    Ok(copied)
}

/// Count historical rewards for months in `[start, end)`.
pub async fn count_history_in_range<C: ConnectionTrait>(
    conn: &C,
    start: Date,
    end: Date,
) -> Result<u64, DomainError> {
    use sea_orm::PaginatorTrait;
    reward_history::Entity::find()
        .filter(reward_history::Column::Month.gte(start))
        .filter(reward_history::Column::Month.lt(end))
        .count(conn)
        .await
        .map_err(db_errors::map_db_err)
}

/// Fetch a reward that must exist (post-race fallback read).
pub async fn require_by_user_and_month<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    month: Date,
) -> Result<Reward, DomainError> {
    find_by_user_and_month(conn, user_id, month)
        .await?
        .ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("reward for user {user_id} month {month} vanished after conflict"),
            )
        })
}
