//! Freshness: exponential recency decay over days since last update.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;

/// Default decay rate. Halves the score roughly every 6.9 days.
pub const DEFAULT_DECAY_RATE: f64 = 0.1;

/// Score substituted when the update timestamp is absent or unparseable.
///
/// The policy is an explicit configuration choice: strict and lenient
/// deployments must never mix defaults silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingTimestampPolicy {
    /// Missing or unparseable timestamp scores 0.0.
    #[default]
    Strict,
    /// Missing or unparseable timestamp scores 0.5.
    Lenient,
}

impl MissingTimestampPolicy {
    /// The substituted score for this policy.
    #[must_use]
    pub const fn default_score(self) -> f64 {
        match self {
            Self::Strict => 0.0,
            Self::Lenient => 0.5,
        }
    }
}

/// Freshness scorer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreshnessConfig {
    /// Exponential decay rate per day.
    pub decay_rate: f64,

    /// Policy for absent or unparseable update timestamps.
    pub missing_policy: MissingTimestampPolicy,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self {
            decay_rate: DEFAULT_DECAY_RATE,
            missing_policy: MissingTimestampPolicy::Strict,
        }
    }
}

/// Computes the freshness score against the current instant.
///
/// See [`freshness_at`] for the exact semantics.
#[must_use]
pub fn freshness(metadata: &Metadata, config: &FreshnessConfig) -> f64 {
    freshness_at(metadata, config, Utc::now())
}

/// Computes the freshness score against an explicit reference instant.
///
/// `freshness = exp(-decay_rate * days_since_update)`, where the day
/// count is floored to whole days and clamped at zero (a future
/// timestamp scores 1.0, never more). An absent or unparseable
/// `last_update_time` entry scores the configured policy default; parse
/// failures never propagate to the caller.
///
/// For finite timestamps the result lies in (0, 1]: the decay never
/// reaches exactly zero.
#[must_use]
pub fn freshness_at(metadata: &Metadata, config: &FreshnessConfig, now: DateTime<Utc>) -> f64 {
    let Some(raw) = metadata.last_update_time() else {
        return config.missing_policy.default_score();
    };
    let Some(updated) = parse_update_timestamp(raw) else {
        return config.missing_policy.default_score();
    };

    let days_since_update = (now - updated).num_days().max(0);
    (-config.decay_rate * days_since_update as f64).exp()
}

/// Parses an ISO-8601 date or datetime string.
///
/// Accepted forms, tried in order: RFC 3339 (offset-aware), naive
/// datetime (`YYYY-MM-DDTHH:MM:SS`, space separator also accepted), bare
/// date (`YYYY-MM-DD`, taken as midnight). Naive forms are assumed UTC.
fn parse_update_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}
