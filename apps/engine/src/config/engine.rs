use std::env;
use std::time::Duration;

use time::{Date, OffsetDateTime, UtcOffset};

use crate::errors::domain::{DomainError, ValidationKind};

/// Default lease duration for the archival job lock.
const DEFAULT_ARCHIVAL_LEASE_SECS: u64 = 600;

/// Completed lines required for the monthly reward.
pub const DEFAULT_REWARD_LINE_THRESHOLD: u8 = 3;

/// Engine configuration.
///
/// The reference timezone decides what "today" means for the claim window
/// and which month the archival job considers current. It is an explicit
/// input; there is no per-user timezone handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub timezone: UtcOffset,
    pub reward_line_threshold: u8,
    pub archival_lease: Duration,
}

impl EngineConfig {
    /// Build configuration from environment variables.
    ///
    /// - `BINGO_TZ_OFFSET`: fixed UTC offset like `+09:00` or `-05:30`
    ///   (defaults to UTC)
    /// - `BINGO_ARCHIVAL_LEASE_SECS`: archival lock lease in seconds
    pub fn from_env() -> Result<Self, DomainError> {
        let timezone = match env::var("BINGO_TZ_OFFSET") {
            Ok(raw) => parse_utc_offset(&raw)?,
            Err(_) => UtcOffset::UTC,
        };

        let archival_lease = match env::var("BINGO_ARCHIVAL_LEASE_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| {
                    DomainError::validation(
                        ValidationKind::Other("Config".into()),
                        format!("BINGO_ARCHIVAL_LEASE_SECS must be an integer, got '{raw}'"),
                    )
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => Duration::from_secs(DEFAULT_ARCHIVAL_LEASE_SECS),
        };

        Ok(Self {
            timezone,
            reward_line_threshold: DEFAULT_REWARD_LINE_THRESHOLD,
            archival_lease,
        })
    }

    /// Current instant in the reference timezone.
    pub fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc().to_offset(self.timezone)
    }

    /// Current calendar day in the reference timezone.
    pub fn today(&self) -> Date {
        self.now().date()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: UtcOffset::UTC,
            reward_line_threshold: DEFAULT_REWARD_LINE_THRESHOLD,
            archival_lease: Duration::from_secs(DEFAULT_ARCHIVAL_LEASE_SECS),
        }
    }
}

/// Parse a fixed UTC offset of the form `+HH:MM`, `-HH:MM`, `+HH`, or `UTC`.
fn parse_utc_offset(raw: &str) -> Result<UtcOffset, DomainError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("utc") || trimmed == "Z" {
        return Ok(UtcOffset::UTC);
    }

    let invalid = || {
        DomainError::validation(
            ValidationKind::Other("Config".into()),
            format!("BINGO_TZ_OFFSET must look like '+09:00' or '-05:30', got '{raw}'"),
        )
    };

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1i8, &trimmed[1..]),
        Some(b'-') => (-1i8, &trimmed[1..]),
        _ => return Err(invalid()),
    };

    let mut parts = rest.splitn(2, ':');
    let hours: i8 = parts
        .next()
        .and_then(|h| h.parse().ok())
        .ok_or_else(invalid)?;
    let minutes: i8 = match parts.next() {
        Some(m) => m.parse().map_err(|_| invalid())?,
        None => 0,
    };
    if !(0..=18).contains(&hours) || !(0..=59).contains(&minutes) {
        return Err(invalid());
    }

    UtcOffset::from_hms(sign * hours, sign * minutes, 0).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_offset() {
        assert_eq!(
            parse_utc_offset("+09:00").unwrap(),
            UtcOffset::from_hms(9, 0, 0).unwrap()
        );
    }

    #[test]
    fn parses_negative_half_hour_offset() {
        assert_eq!(
            parse_utc_offset("-05:30").unwrap(),
            UtcOffset::from_hms(-5, -30, 0).unwrap()
        );
    }

    #[test]
    fn parses_utc_aliases() {
        assert_eq!(parse_utc_offset("UTC").unwrap(), UtcOffset::UTC);
        assert_eq!(parse_utc_offset("Z").unwrap(), UtcOffset::UTC);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_utc_offset("tomorrow").is_err());
        assert!(parse_utc_offset("+25:00").is_err());
        assert!(parse_utc_offset("09:00").is_err());
    }
}
