use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_locks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique job name; the insert race on it is the lock acquisition.
    pub name: String,
    #[sea_orm(column_name = "locked_until")]
    pub locked_until: OffsetDateTime,
    #[sea_orm(column_name = "locked_at")]
    pub locked_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
