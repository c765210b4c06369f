//! Domain services orchestrating repos inside transactions.

pub mod archival;
pub mod claims;
pub mod rewards;

pub use archival::{ArchivalService, ArchivalSummary};
pub use claims::{ClaimOutcome, ClaimResult, ClaimService, UserStatus};
pub use rewards::RewardService;
