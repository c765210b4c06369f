use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbErr;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum BingoCards {
    Table,
    Id,
    UserId,
    Month,
    Cells,
    IsActive,
    CreatedAt,
}

#[derive(Iden)]
enum DailyNumbers {
    Table,
    Id,
    Date,
    Number,
    CreatedAt,
}

#[derive(Iden)]
enum Claims {
    Table,
    Id,
    UserId,
    CardId,
    DailyNumberId,
    ClaimDate,
    Number,
    ClaimedAt,
}

#[derive(Iden)]
enum Rewards {
    Table,
    Id,
    UserId,
    CardId,
    Month,
    LineTypes,
    IssuedAt,
}

#[derive(Iden)]
enum ArchivalLogs {
    Table,
    Id,
    ResetDate,
    Status,
    Metadata,
    ExecutedAt,
}

#[derive(Iden)]
enum BingoCardHistory {
    Table,
    Id,
    CardId,
    UserId,
    Month,
    Cells,
    CreatedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum ClaimHistory {
    Table,
    Id,
    ClaimId,
    UserId,
    CardId,
    DailyNumberId,
    ClaimDate,
    Number,
    ClaimedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum RewardHistory {
    Table,
    Id,
    RewardId,
    UserId,
    CardId,
    Month,
    LineTypes,
    IssuedAt,
    ArchivedAt,
}

#[derive(Iden)]
enum JobLocks {
    Table,
    Id,
    Name,
    LockedUntil,
    LockedAt,
}

#[derive(Iden)]
enum MonthlyPartitions {
    Table,
    Id,
    Month,
    ProvisionedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // bingo_cards
        manager
            .create_table(
                Table::create()
                    .table(BingoCards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BingoCards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(BingoCards::UserId).big_integer().not_null())
                    .col(ColumnDef::new(BingoCards::Month).date().not_null())
                    .col(ColumnDef::new(BingoCards::Cells).json().not_null())
                    .col(
                        ColumnDef::new(BingoCards::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BingoCards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // One card per (user, month)
        manager
            .create_index(
                Index::create()
                    .name("ux_bingo_cards_user_month")
                    .table(BingoCards::Table)
                    .col(BingoCards::UserId)
                    .col(BingoCards::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // daily_numbers
        manager
            .create_table(
                Table::create()
                    .table(DailyNumbers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DailyNumbers::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(DailyNumbers::Date).date().not_null())
                    .col(ColumnDef::new(DailyNumbers::Number).integer().not_null())
                    .col(
                        ColumnDef::new(DailyNumbers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_daily_numbers_date")
                    .table(DailyNumbers::Table)
                    .col(DailyNumbers::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // claims
        manager
            .create_table(
                Table::create()
                    .table(Claims::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Claims::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Claims::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Claims::CardId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Claims::DailyNumberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Claims::ClaimDate).date().not_null())
                    .col(ColumnDef::new(Claims::Number).integer().not_null())
                    .col(
                        ColumnDef::new(Claims::ClaimedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The serialization point for daily claims: at most one row per (user, day).
        manager
            .create_index(
                Index::create()
                    .name("ux_claims_user_claim_date")
                    .table(Claims::Table)
                    .col(Claims::UserId)
                    .col(Claims::ClaimDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_claims_user_card")
                    .table(Claims::Table)
                    .col(Claims::UserId)
                    .col(Claims::CardId)
                    .to_owned(),
            )
            .await?;

        // rewards
        manager
            .create_table(
                Table::create()
                    .table(Rewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rewards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Rewards::UserId).big_integer().not_null())
                    .col(ColumnDef::new(Rewards::CardId).big_integer().not_null())
                    .col(ColumnDef::new(Rewards::Month).date().not_null())
                    .col(ColumnDef::new(Rewards::LineTypes).json().not_null())
                    .col(
                        ColumnDef::new(Rewards::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one reward per (user, month).
        manager
            .create_index(
                Index::create()
                    .name("ux_rewards_user_month")
                    .table(Rewards::Table)
                    .col(Rewards::UserId)
                    .col(Rewards::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // archival_logs
        manager
            .create_table(
                Table::create()
                    .table(ArchivalLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ArchivalLogs::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(ArchivalLogs::ResetDate).date().not_null())
                    .col(
                        ColumnDef::new(ArchivalLogs::Status)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ArchivalLogs::Metadata).json().not_null())
                    .col(
                        ColumnDef::new(ArchivalLogs::ExecutedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // bingo_card_history
        manager
            .create_table(
                Table::create()
                    .table(BingoCardHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BingoCardHistory::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(BingoCardHistory::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BingoCardHistory::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BingoCardHistory::Month).date().not_null())
                    .col(ColumnDef::new(BingoCardHistory::Cells).json().not_null())
                    .col(
                        ColumnDef::new(BingoCardHistory::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BingoCardHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Mirrors the active constraint so re-archival dedupes instead of duplicating.
        manager
            .create_index(
                Index::create()
                    .name("ux_bingo_card_history_user_month")
                    .table(BingoCardHistory::Table)
                    .col(BingoCardHistory::UserId)
                    .col(BingoCardHistory::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // claim_history
        manager
            .create_table(
                Table::create()
                    .table(ClaimHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClaimHistory::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(ClaimHistory::ClaimId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClaimHistory::UserId).big_integer().not_null())
                    .col(ColumnDef::new(ClaimHistory::CardId).big_integer().not_null())
                    .col(
                        ColumnDef::new(ClaimHistory::DailyNumberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClaimHistory::ClaimDate).date().not_null())
                    .col(ColumnDef::new(ClaimHistory::Number).integer().not_null())
                    .col(
                        ColumnDef::new(ClaimHistory::ClaimedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClaimHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_claim_history_user_claim_date")
                    .table(ClaimHistory::Table)
                    .col(ClaimHistory::UserId)
                    .col(ClaimHistory::ClaimDate)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // reward_history
        manager
            .create_table(
                Table::create()
                    .table(RewardHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RewardHistory::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::RewardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::CardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RewardHistory::Month).date().not_null())
                    .col(ColumnDef::new(RewardHistory::LineTypes).json().not_null())
                    .col(
                        ColumnDef::new(RewardHistory::IssuedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RewardHistory::ArchivedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_reward_history_user_month")
                    .table(RewardHistory::Table)
                    .col(RewardHistory::UserId)
                    .col(RewardHistory::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // job_locks: durable advisory leases for singleton jobs
        manager
            .create_table(
                Table::create()
                    .table(JobLocks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(JobLocks::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(JobLocks::Name).string_len(64).not_null())
                    .col(
                        ColumnDef::new(JobLocks::LockedUntil)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(JobLocks::LockedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_job_locks_name")
                    .table(JobLocks::Table)
                    .col(JobLocks::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // monthly_partitions: idempotent provisioning bookkeeping
        manager
            .create_table(
                Table::create()
                    .table(MonthlyPartitions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyPartitions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(MonthlyPartitions::Month).date().not_null())
                    .col(
                        ColumnDef::new(MonthlyPartitions::ProvisionedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_monthly_partitions_month")
                    .table(MonthlyPartitions::Table)
                    .col(MonthlyPartitions::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MonthlyPartitions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(JobLocks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RewardHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClaimHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BingoCardHistory::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ArchivalLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rewards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Claims::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(DailyNumbers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BingoCards::Table).to_owned())
            .await?;
        Ok(())
    }
}
