use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rewards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "user_id")]
    pub user_id: i64,
    #[sea_orm(column_name = "card_id")]
    pub card_id: i64,
    /// Unique together with user_id: at most one reward per (user, month).
    pub month: Date,
    /// Names of the completed lines at issuance time.
    #[sea_orm(column_name = "line_types")]
    pub line_types: Json,
    #[sea_orm(column_name = "issued_at")]
    pub issued_at: OffsetDateTime,
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
