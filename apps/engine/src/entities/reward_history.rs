use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reward_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id the reward had in the active table.
    #[sea_orm(column_name = "reward_id")]
    pub reward_id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "card_id")]
    pub card_id: i64,
    pub month: Date,
    #[sea_orm(column_name = "line_types")]
    pub line_types: Json,
    #[sea_orm(column_name = "issued_at")]
    pub issued_at: OffsetDateTime,
    #[sea_orm(column_name = "archived_at")]
    pub archived_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
