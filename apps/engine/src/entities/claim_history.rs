use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "claim_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Id the claim had in the active table.
    #[sea_orm(column_name = "claim_id")]
    pub claim_id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "card_id")]
    pub card_id: i64,
    #[sea_orm(column_name = "daily_number_id")]
    pub daily_number_id: i64,
    #[sea_orm(column_name = "claim_date")]
    pub claim_date: Date,
    pub number: i32,
    #[sea_orm(column_name = "claimed_at")]
    pub claimed_at: OffsetDateTime,
    #[sea_orm(column_name = "archived_at")]
    pub archived_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
