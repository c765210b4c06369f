#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

//! Daily check-in bingo game engine.
//!
//! Monthly 5x5 cards, one published number per day, per-user daily claims,
//! O(1) bitmask line detection, an at-most-once-per-month reward, and a
//! monthly archival job. Exactly-once guarantees come from the store's
//! uniqueness constraints, never from in-process coordination.

pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;

// Re-exports for public API
pub use config::EngineConfig;
pub use entities::archival_logs::ArchivalStatus;
pub use errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};
pub use infra::connect_db;
pub use repos::rewards::Reward;
pub use services::{
    ArchivalService, ArchivalSummary, ClaimOutcome, ClaimResult, ClaimService, RewardService,
    UserStatus,
};
