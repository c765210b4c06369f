//! SeaORM entities for the active tables, history tables, and job
//! bookkeeping. The schema (including the uniqueness constraints the
//! engine's concurrency model relies on) lives in the `migration` crate.

pub mod archival_logs;
pub mod bingo_card_history;
pub mod bingo_cards;
pub mod claim_history;
pub mod claims;
pub mod daily_numbers;
pub mod job_locks;
pub mod monthly_partitions;
pub mod reward_history;
pub mod rewards;
