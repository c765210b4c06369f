//! Idempotent issuance of the three-line monthly reward.

use sea_orm::ConnectionTrait;
use time::{Date, OffsetDateTime};

use crate::errors::domain::DomainError;
use crate::repos::rewards::{self, Reward};

/// Reward domain service.
pub struct RewardService;

impl RewardService {
    pub fn new() -> Self {
        Self
    }

    /// Grant the monthly reward exactly once per (user, month).
    ///
    /// Repeated and concurrent calls all return the same reward row: an
    /// existing row is returned unchanged; otherwise the insert runs with
    /// ON CONFLICT DO NOTHING on (user_id, month) and a losing racer reads
    /// the winner's row — the conflict never raises, so the enclosing claim
    /// transaction stays usable. No side effects beyond the row itself;
    /// delivery and notification are external.
    pub async fn issue<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        card_id: i64,
        month: Date,
        line_types: &[String],
        now: OffsetDateTime,
    ) -> Result<Reward, DomainError> {
        if let Some(existing) = rewards::find_by_user_and_month(conn, user_id, month).await? {
            tracing::debug!(user_id, %month, reward_id = existing.id, "reward already issued");
            return Ok(existing);
        }

        match rewards::insert_reward(conn, user_id, card_id, month, line_types, now).await? {
            rewards::RewardInsert::Inserted(reward) => {
                tracing::info!(user_id, %month, reward_id = reward.id, "reward issued");
                Ok(reward)
            }
            rewards::RewardInsert::AlreadyIssued => {
                // A concurrent issuance won the insert race; its row is ours too.
                tracing::debug!(user_id, %month, "reward insert lost race, reading winner");
                rewards::require_by_user_and_month(conn, user_id, month).await
            }
        }
    }
}

impl Default for RewardService {
    fn default() -> Self {
        Self::new()
    }
}
