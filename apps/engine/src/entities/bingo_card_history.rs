use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bingo_card_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id the card had in the active table.
    #[sea_orm(column_name = "card_id")]
    pub card_id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    pub month: Date,
    pub cells: Json,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "archived_at")]
    pub archived_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
