use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_partitions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// First day of the provisioned month; unique.
    pub month: Date,
    #[sea_orm(column_name = "provisioned_at")]
    pub provisioned_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
