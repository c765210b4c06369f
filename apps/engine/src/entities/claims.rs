use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "claims")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "card_id")]
    pub card_id: i64,
    #[sea_orm(column_name = "daily_number_id")]
    pub daily_number_id: i64,
    /// Unique together with user_id: one claim per (user, day), ever.
    #[sea_orm(column_name = "claim_date")]
    pub claim_date: Date,
    pub number: i32,
    #[sea_orm(column_name = "claimed_at")]
    pub claimed_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bingo_cards::Entity",
        from = "Column::CardId",
        to = "super::bingo_cards::Column::Id"
    )]
    BingoCard,
}

impl Related<super::bingo_cards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BingoCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
