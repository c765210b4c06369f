//! Repository functions for the domain layer.
//!
//! Free async functions generic over `sea_orm::ConnectionTrait`, returning
//! plain domain structs. All `DbErr`s are translated through
//! `infra::db_errors::map_db_err`; unique-constraint races surface as typed
//! conflicts (or tagged results, for claims).

pub mod archival_logs;
pub mod cards;
pub mod claims;
pub mod daily_numbers;
pub mod job_locks;
pub mod monthly_partitions;
pub mod rewards;
