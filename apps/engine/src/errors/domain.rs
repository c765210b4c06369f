//! Domain-level error type used across services and repos.
//!
//! This error type is HTTP- and DB-agnostic. Repos convert `sea_orm::DbErr`
//! into `DomainError` via `crate::infra::db_errors::map_db_err`; callers
//! embedding this engine can map `DomainError` onto their own surface.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    /// No active bingo card for the (user, month)
    Card,
    /// No daily number published for the date
    DailyNumber,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    /// Unique (user_id, claim_date) violation: the day is already claimed
    DuplicateClaim,
    /// Unique (user_id, month) violation on rewards
    DuplicateReward,
    /// The archival lease is held by another run
    ArchivalLockHeld,
    Other(String),
}

/// Input/business-rule violation kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Claim date is not the current calendar day
    ClaimWindow,
    /// Card cells are not 25 distinct integers
    InvalidCardShape,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    Validation(ValidationKind, String),
    /// Semantic conflict
    Conflict(ConflictKind, String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "validation {kind:?}: {d}"),
            DomainError::Conflict(kind, d) => write!(f, "conflict {kind:?}: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// True when the error is the unique-claim conflict. Repos use this to
    /// convert the constraint violation into a tagged result instead of an
    /// error path.
    pub fn is_duplicate_claim(&self) -> bool {
        matches!(self, DomainError::Conflict(ConflictKind::DuplicateClaim, _))
    }

    pub fn is_duplicate_reward(&self) -> bool {
        matches!(self, DomainError::Conflict(ConflictKind::DuplicateReward, _))
    }
}
