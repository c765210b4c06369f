//! Bingo card repository. Cards are created by an external generator and
//! are read-only here apart from archival's defensive deactivation.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set,
};
use time::{Date, OffsetDateTime};

use crate::entities::{bingo_card_history, bingo_cards};
use crate::errors::domain::DomainError;
use crate::infra::db_errors;

/// Card domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: i64,
    pub user_id: i64,
    pub month: Date,
    pub cells: serde_json::Value,
    pub is_active: bool,
    pub created_at: OffsetDateTime,
}

impl From<bingo_cards::Model> for Card {
    fn from(model: bingo_cards::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            month: model.month,
            cells: model.cells,
            is_active: model.is_active,
            created_at: model.created_at,
        }
    }
}

/// Find the user's active card for a month (month given as first-of-month).
pub async fn find_active_by_user_and_month<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    month: Date,
) -> Result<Option<Card>, DomainError> {
    let card = bingo_cards::Entity::find()
        .filter(bingo_cards::Column::UserId.eq(user_id))
        .filter(bingo_cards::Column::Month.eq(month))
        .filter(bingo_cards::Column::IsActive.eq(true))
        .one(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(card.map(Card::from))
}

/// Insert a card. Test fixtures and the external generator share this path;
/// the (user_id, month) constraint rejects a second card for the pair.
pub async fn create_card<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    month: Date,
    cells: serde_json::Value,
    now: OffsetDateTime,
) -> Result<Card, DomainError> {
    let model = bingo_cards::ActiveModel {
        user_id: Set(user_id),
        month: Set(month),
        cells: Set(cells),
        is_active: Set(true),
        created_at: Set(now),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(db_errors::map_db_err)?;
    Ok(Card::from(model))
}

/// Copy cards whose month falls in `[start, end)` into history, then delete
/// them from the active table. Returns the archived row count. Re-copying an
/// already-archived card is deduplicated by the history unique constraint.
pub async fn archive_month<C: ConnectionTrait>(
    conn: &C,
    start: Date,
    end: Date,
    now: OffsetDateTime,
) -> Result<u64, DomainError> {
    let rows = bingo_cards::Entity::find()
        .filter(bingo_cards::Column::Month.gte(start))
        .filter(bingo_cards::Column::Month.lt(end))
        .all(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    let mut copied = 0u64;
    for row in &rows {
        let insert = bingo_card_history::ActiveModel {
            card_id: Set(row.id),
            user_id: Set(row.user_id),
            month: Set(row.month),
            cells: Set(row.cells.clone()),
            created_at: Set(row.created_at),
            archived_at: Set(now),
            ..Default::default()
        };
        copied += bingo_card_history::Entity::insert(insert)
            .on_conflict(
                OnConflict::columns([
                    bingo_card_history::Column::UserId,
                    bingo_card_history::Column::Month,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(conn)
            .await
            .map_err(db_errors::map_db_err)?;
    }

    bingo_cards::Entity::delete_many()
        .filter(bingo_cards::Column::Month.gte(start))
        .filter(bingo_cards::Column::Month.lt(end))
        .exec(conn)
        .await
        .map_err(db_errors::map_db_err)?;

    Ok(copied)
}

/// Defensive sweep: deactivate any card from a month before `current_month`
/// that is still flagged active. Returns the number of rows touched.
pub async fn deactivate_stale<C: ConnectionTrait>(
    conn: &C,
    current_month: Date,
) -> Result<u64, DomainError> {
    let res = bingo_cards::Entity::update_many()
        .col_expr(bingo_cards::Column::IsActive, Expr::val(false).into())
        .filter(bingo_cards::Column::Month.lt(current_month))
        .filter(bingo_cards::Column::IsActive.eq(true))
        .exec(conn)
        .await
        .map_err(db_errors::map_db_err)?;
    Ok(res.rows_affected)
}

/// Count historical cards whose month falls in `[start, end)`.
pub async fn count_history_in_range<C: ConnectionTrait>(
    conn: &C,
    start: Date,
    end: Date,
) -> Result<u64, DomainError> {
    use sea_orm::PaginatorTrait;
    bingo_card_history::Entity::find()
        .filter(bingo_card_history::Column::Month.gte(start))
        .filter(bingo_card_history::Column::Month.lt(end))
        .count(conn)
        .await
        .map_err(db_errors::map_db_err)
}
