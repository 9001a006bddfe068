//! Asset lifecycle status set and warranty clock.
//!
//! Status changes are validated against membership of the fixed ten-state
//! set only. Any-to-any transitions are permitted deliberately: field
//! operations routinely need corrections (e.g. a `lost` asset turning up
//! `in_use`), so no transition graph is enforced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Sentinel returned by [`warranty_days_remaining`] for an expired warranty.
/// Callers must special-case this; it is not a literal day count.
pub const WARRANTY_EXPIRED: i64 = -1;

/// The fixed asset lifecycle status set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    Requested,
    Ordered,
    Received,
    InStock,
    Assigned,
    InUse,
    InRepair,
    Lost,
    Retired,
    Disposed,
}

impl AssetStatus {
    /// Return the status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Ordered => "ordered",
            Self::Received => "received",
            Self::InStock => "in_stock",
            Self::Assigned => "assigned",
            Self::InUse => "in_use",
            Self::InRepair => "in_repair",
            Self::Lost => "lost",
            Self::Retired => "retired",
            Self::Disposed => "disposed",
        }
    }

    /// Parse a status string. Returns `None` for unknown values.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "requested" => Some(Self::Requested),
            "ordered" => Some(Self::Ordered),
            "received" => Some(Self::Received),
            "in_stock" => Some(Self::InStock),
            "assigned" => Some(Self::Assigned),
            "in_use" => Some(Self::InUse),
            "in_repair" => Some(Self::InRepair),
            "lost" => Some(Self::Lost),
            "retired" => Some(Self::Retired),
            "disposed" => Some(Self::Disposed),
            _ => None,
        }
    }

    /// All valid status values.
    pub const ALL: &'static [&'static str] = &[
        "requested",
        "ordered",
        "received",
        "in_stock",
        "assigned",
        "in_use",
        "in_repair",
        "lost",
        "retired",
        "disposed",
    ];
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Default status for assets created without one (e.g. by import).
pub const DEFAULT_STATUS: AssetStatus = AssetStatus::InStock;

/// Validate that `status` is a member of the fixed set.
pub fn validate_status(status: &str) -> Result<AssetStatus, CoreError> {
    AssetStatus::from_str(status).ok_or_else(|| {
        CoreError::InvalidStatus(format!(
            "'{status}' is not a valid asset status (expected one of: {})",
            AssetStatus::ALL.join(", ")
        ))
    })
}

/// Days remaining on a warranty, relative to `today`.
///
/// - `None` when no warranty date is stored (distinct from zero).
/// - [`WARRANTY_EXPIRED`] (`-1`) when `warranty_end` is strictly before
///   `today`, rather than a negative day count.
/// - Otherwise the whole-day difference between the two midnights; a
///   warranty ending today reports `0`.
pub fn warranty_days_remaining(warranty_end: Option<NaiveDate>, today: NaiveDate) -> Option<i64> {
    let end = warranty_end?;
    if end < today {
        return Some(WARRANTY_EXPIRED);
    }
    Some((end - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_status_round_trip() {
        for name in AssetStatus::ALL {
            let status = AssetStatus::from_str(name).unwrap();
            assert_eq!(status.as_str(), *name);
        }
    }

    #[test]
    fn test_status_set_has_ten_states() {
        assert_eq!(AssetStatus::ALL.len(), 10);
    }

    #[test]
    fn test_validate_rejects_unknown_status() {
        assert_matches!(
            validate_status("not_a_status"),
            Err(CoreError::InvalidStatus(_))
        );
    }

    #[test]
    fn test_validate_accepts_every_member() {
        for name in AssetStatus::ALL {
            assert!(validate_status(name).is_ok(), "status: {name}");
        }
    }

    #[test]
    fn test_default_status_is_in_stock() {
        assert_eq!(DEFAULT_STATUS.as_str(), "in_stock");
    }

    #[test]
    fn test_warranty_thirty_days_out() {
        let today = date(2026, 8, 30);
        let end = today + Duration::days(30);
        assert_eq!(warranty_days_remaining(Some(end), today), Some(30));
    }

    #[test]
    fn test_warranty_expired_yesterday_is_sentinel() {
        let today = date(2026, 8, 30);
        let end = today - Duration::days(1);
        assert_eq!(
            warranty_days_remaining(Some(end), today),
            Some(WARRANTY_EXPIRED)
        );
    }

    #[test]
    fn test_warranty_long_expired_is_still_minus_one() {
        let today = date(2026, 8, 30);
        let end = date(2020, 1, 1);
        assert_eq!(warranty_days_remaining(Some(end), today), Some(-1));
    }

    #[test]
    fn test_warranty_ending_today_is_zero() {
        let today = date(2026, 8, 30);
        assert_eq!(warranty_days_remaining(Some(today), today), Some(0));
    }

    #[test]
    fn test_no_warranty_is_none() {
        let today = date(2026, 8, 30);
        assert_eq!(warranty_days_remaining(None, today), None);
    }
}
