//! Monthly archival: migrate the prior month's cards, claims, and rewards
//! to history, reset leftover active state, provision the next month, and
//! leave an audit trail even on partial failure.
//!
//! Each entity type is copied-and-deleted in its own transaction: a failure
//! archiving claims must not undo an already-committed card archival. The
//! whole run is guarded by a durable lease in `job_locks`, so overlapping
//! runs are prevented across instances, not just within one process.

use sea_orm::DatabaseConnection;
use serde_json::json;
use time::{Date, OffsetDateTime};

use crate::config::EngineConfig;
use crate::db::with_txn;
use crate::domain::{next_month, prior_month_range};
use crate::entities::archival_logs::ArchivalStatus;
use crate::errors::domain::{ConflictKind, DomainError};
use crate::repos::{archival_logs, cards, claims, job_locks, monthly_partitions, rewards};

/// Lease name for the archival job.
pub const ARCHIVAL_LOCK_NAME: &str = "monthly_archival";

/// Outcome summary of one archival run.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivalSummary {
    pub cards_archived: u64,
    pub claims_archived: u64,
    pub rewards_archived: u64,
    pub status: ArchivalStatus,
    pub errors: Vec<String>,
}

/// Monthly archival domain service.
pub struct ArchivalService;

impl ArchivalService {
    pub fn new() -> Self {
        Self
    }

    /// Run the archival job for `reset_date` (defaults to today).
    ///
    /// Per-entity failures are captured in the summary, not thrown; the
    /// audit log row is the source of truth for FAILED/PARTIAL follow-up.
    /// Re-running an already-archived month is a no-op: the history
    /// uniqueness constraints deduplicate re-copies.
    pub async fn run(
        &self,
        db: &DatabaseConnection,
        config: &EngineConfig,
        reset_date: Option<Date>,
    ) -> Result<ArchivalSummary, DomainError> {
        let reset_date = reset_date.unwrap_or_else(|| config.today());
        let now = config.now();

        if !job_locks::try_acquire(db, ARCHIVAL_LOCK_NAME, config.archival_lease, now).await? {
            tracing::warn!(%reset_date, "archival lease held by another run, skipping");
            return Err(DomainError::conflict(
                ConflictKind::ArchivalLockHeld,
                "monthly archival is already running",
            ));
        }

        let result = self.run_locked(db, reset_date, now).await;

        if let Err(e) = &result {
            // Best-effort FAILED entry before propagating; the lease release
            // below still runs.
            let metadata = json!({ "error": e.to_string() });
            if let Err(log_err) =
                archival_logs::append(db, reset_date, ArchivalStatus::Failed, metadata, now).await
            {
                tracing::error!(%reset_date, error = %log_err, "failed to write FAILED archival log");
            }
        }

        if let Err(e) = job_locks::release(db, ARCHIVAL_LOCK_NAME).await {
            tracing::error!(error = %e, "failed to release archival lease; it will expire");
        }

        result
    }

    async fn run_locked(
        &self,
        db: &DatabaseConnection,
        reset_date: Date,
        now: OffsetDateTime,
    ) -> Result<ArchivalSummary, DomainError> {
        let (start, end) = prior_month_range(reset_date);
        tracing::info!(%reset_date, %start, %end, "monthly archival started");

        let mut errors: Vec<String> = Vec::new();

        // Each entity type commits as its own unit.
        let cards_archived = match with_txn(db, move |txn| {
            Box::pin(async move { cards::archive_month(txn, start, end, now).await })
        })
        .await
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(error = %e, "card archival failed");
                errors.push(format!("cards: {e}"));
                0
            }
        };

        let claims_archived = match with_txn(db, move |txn| {
            Box::pin(async move { claims::archive_month(txn, start, end, now).await })
        })
        .await
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(error = %e, "claim archival failed");
                errors.push(format!("claims: {e}"));
                0
            }
        };

        let rewards_archived = match with_txn(db, move |txn| {
            Box::pin(async move { rewards::archive_month(txn, start, end, now).await })
        })
        .await
        {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(error = %e, "reward archival failed");
                errors.push(format!("rewards: {e}"));
                0
            }
        };

        // Defensive sweep: anything from an earlier month still flagged
        // active loses the flag here.
        match cards::deactivate_stale(db, end).await {
            Ok(0) => {}
            Ok(n) => tracing::warn!(count = n, "deactivated stale active cards"),
            Err(e) => {
                tracing::error!(error = %e, "stale card deactivation failed");
                errors.push(format!("deactivate: {e}"));
            }
        }

        // Provision the upcoming month; create-if-not-exists, safe to rerun.
        let upcoming = next_month(reset_date);
        if let Err(e) = monthly_partitions::provision(db, upcoming, now).await {
            tracing::error!(error = %e, %upcoming, "partition provisioning failed");
            errors.push(format!("provision: {e}"));
        }

        let status = if errors.is_empty() {
            ArchivalStatus::Success
        } else {
            ArchivalStatus::Partial
        };
        let metadata = json!({
            "range": { "start": start.to_string(), "end": end.to_string() },
            "cards_archived": cards_archived,
            "claims_archived": claims_archived,
            "rewards_archived": rewards_archived,
            "errors": errors,
        });
        archival_logs::append(db, reset_date, status.clone(), metadata, now).await?;

        tracing::info!(
            %reset_date,
            cards_archived,
            claims_archived,
            rewards_archived,
            ?status,
            "monthly archival finished"
        );

        Ok(ArchivalSummary {
            cards_archived,
            claims_archived,
            rewards_archived,
            status,
            errors,
        })
    }
}

impl Default for ArchivalService {
    fn default() -> Self {
        Self::new()
    }
}
