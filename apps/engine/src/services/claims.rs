//! Daily claim orchestration.
//!
//! Each (user, day) transitions unclaimed -> claimed at most once. The
//! unique (user_id, claim_date) constraint arbitrates concurrent and
//! retried requests; there is no check-then-act read and no in-process
//! lock. Line counts are always recomputed from durable claim rows.

use sea_orm::DatabaseConnection;
use time::Date;

use crate::config::EngineConfig;
use crate::db::with_txn;
use crate::domain::{build_mask, card_cells, count_lines, month_floor};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::rewards::Reward;
use crate::repos::{cards, claims, daily_numbers, rewards};
use crate::services::rewards::RewardService;

/// Result of a successful daily claim.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimResult {
    /// The number published for the claimed day.
    pub number: i32,
    /// Whether that number appears on the user's card.
    pub is_on_card: bool,
    pub line_count: u8,
    pub line_types: Vec<String>,
    pub has_reward: bool,
    pub reward: Option<Reward>,
}

/// Outcome of a claim attempt. A duplicate claim is expected traffic
/// (retry, double tap, concurrent request), so it is a tagged variant
/// rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    Claimed(ClaimResult),
    AlreadyClaimed,
}

/// Read-only snapshot of a user's month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserStatus {
    pub has_card: bool,
    pub claimed_numbers: Vec<i32>,
    pub line_count: u8,
    pub has_reward: bool,
    pub today_claimed: bool,
    pub today_number: Option<i32>,
}

/// Daily claim domain service.
pub struct ClaimService;

impl ClaimService {
    pub fn new() -> Self {
        Self
    }

    /// Claim today's number for the user.
    ///
    /// `claim_date` defaults to today in the configured timezone; any other
    /// date fails with `Validation(ClaimWindow)` — no backdating, no
    /// preclaiming. Precondition failures (`NotFound(DailyNumber)`,
    /// `NotFound(Card)`) are terminal for the request. Transient storage
    /// failures are safely retryable: a retry either claims once or
    /// observes `AlreadyClaimed`.
    pub async fn claim_daily_number(
        &self,
        db: &DatabaseConnection,
        config: &EngineConfig,
        user_id: i64,
        claim_date: Option<Date>,
    ) -> Result<ClaimOutcome, DomainError> {
        let today = config.today();
        let claim_date = claim_date.unwrap_or(today);
        if claim_date != today {
            return Err(DomainError::validation(
                ValidationKind::ClaimWindow,
                format!("claims apply to the current day only (today is {today}, got {claim_date})"),
            ));
        }

        let now = config.now();
        let threshold = config.reward_line_threshold;

        with_txn(db, move |txn| {
            Box::pin(async move {
                let daily = daily_numbers::find_by_date(txn, claim_date)
                    .await?
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::DailyNumber,
                            format!("no daily number published for {claim_date}"),
                        )
                    })?;

                let month = month_floor(claim_date);
                let card = cards::find_active_by_user_and_month(txn, user_id, month)
                    .await?
                    .ok_or_else(|| {
                        DomainError::not_found(
                            NotFoundKind::Card,
                            format!("user {user_id} has no active card for {month}"),
                        )
                    })?;
                let cells = card_cells(&card.cells)?;

                // Blind insert; the unique constraint closes the
                // check-then-act race.
                let inserted = claims::insert_claim(
                    txn,
                    claims::ClaimData {
                        user_id,
                        card_id: card.id,
                        daily_number_id: daily.id,
                        claim_date,
                        number: daily.number,
                    },
                    now,
                )
                .await?;

                let claim = match inserted {
                    claims::ClaimInsert::Inserted(claim) => claim,
                    claims::ClaimInsert::AlreadyClaimed => {
                        tracing::info!(user_id, %claim_date, "daily number already claimed");
                        return Ok(ClaimOutcome::AlreadyClaimed);
                    }
                };

                // Recompute the full claim history from durable state;
                // never trust a cached count.
                let claimed = claims::claimed_numbers_for_card(txn, user_id, card.id).await?;
                let mask = build_mask(&cells, &claimed);
                let summary = count_lines(mask);
                let line_types = summary.line_names();

                let reward = if summary.count >= threshold {
                    Some(
                        RewardService::new()
                            .issue(txn, user_id, card.id, month, &line_types, now)
                            .await?,
                    )
                } else {
                    rewards::find_by_user_and_month(txn, user_id, month).await?
                };

                tracing::info!(
                    user_id,
                    %claim_date,
                    number = claim.number,
                    line_count = summary.count,
                    has_reward = reward.is_some(),
                    "daily number claimed"
                );

                Ok(ClaimOutcome::Claimed(ClaimResult {
                    number: claim.number,
                    is_on_card: cells.contains(&claim.number),
                    line_count: summary.count,
                    line_types,
                    has_reward: reward.is_some(),
                    reward,
                }))
            })
        })
        .await
    }

    /// Read-only status for a user's month (defaults to the current month).
    pub async fn get_user_status(
        &self,
        db: &DatabaseConnection,
        config: &EngineConfig,
        user_id: i64,
        month: Option<Date>,
    ) -> Result<UserStatus, DomainError> {
        let today = config.today();
        let month = month_floor(month.unwrap_or(today));

        let card = cards::find_active_by_user_and_month(db, user_id, month).await?;
        let (claimed_numbers, line_count) = match &card {
            Some(card) => {
                let cells = card_cells(&card.cells)?;
                let claimed = claims::claimed_numbers_for_card(db, user_id, card.id).await?;
                let mask = build_mask(&cells, &claimed);
                let mut numbers: Vec<i32> = claimed.into_iter().collect();
                numbers.sort_unstable();
                (numbers, count_lines(mask).count)
            }
            None => (Vec::new(), 0),
        };

        let has_reward = rewards::find_by_user_and_month(db, user_id, month)
            .await?
            .is_some();
        let today_claimed = claims::find_by_user_and_date(db, user_id, today)
            .await?
            .is_some();
        let today_number = daily_numbers::find_by_date(db, today).await?.map(|d| d.number);

        Ok(UserStatus {
            has_card: card.is_some(),
            claimed_numbers,
            line_count,
            has_reward,
            today_claimed,
            today_number,
        })
    }
}

impl Default for ClaimService {
    fn default() -> Self {
        Self::new()
    }
}
