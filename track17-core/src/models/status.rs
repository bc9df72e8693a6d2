//! Package status vocabulary and code translation.
//!
//! The service reports package state as a small integer code. This module
//! contains:
//! - [`PackageStatus`] - The seven named statuses
//! - [`PackageStatus::from_code`] - The fixed code table
//! - [`aggregate_counts`] - Folds per-code counts into per-status counts

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// ============================================================================
// Package Status
// ============================================================================

/// Named package status, translated from the service's integer codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackageStatus {
    /// Registered but not yet moving.
    Pending,
    /// Moving through the carrier network.
    InTransit,
    /// Delivered to the recipient.
    Delivered,
    /// Tracking window expired without delivery.
    Expired,
    /// Delivery was attempted and failed.
    Undelivered,
    /// Carrier reported a problem.
    Exception,
    /// Code not recognized (several raw codes alias here).
    #[default]
    Unknown,
}

impl PackageStatus {
    /// Translates a raw service status code into a named status.
    ///
    /// Codes 6 through 9 are all reported by the service without a
    /// documented meaning and alias to [`PackageStatus::Unknown`], as does
    /// any code outside the table.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::InTransit,
            2 => Self::Expired,
            4 => Self::Delivered,
            5 => Self::Undelivered,
            10 => Self::Exception,
            _ => Self::Unknown,
        }
    }

    /// Returns the service's display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InTransit => "In Transit",
            Self::Delivered => "Delivered",
            Self::Expired => "Expired",
            Self::Undelivered => "Undelivered",
            Self::Exception => "Exception",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns all named statuses.
    pub fn all() -> &'static [PackageStatus] {
        &[
            Self::Pending,
            Self::InTransit,
            Self::Delivered,
            Self::Expired,
            Self::Undelivered,
            Self::Exception,
            Self::Unknown,
        ]
    }
}

impl std::fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Aggregation
// ============================================================================

/// Folds raw `(status code, count)` pairs into per-status totals.
///
/// Codes that alias to the same named status have their counts summed;
/// unrecognized codes land on [`PackageStatus::Unknown`].
pub fn aggregate_counts<I>(counts: I) -> HashMap<PackageStatus, u64>
where
    I: IntoIterator<Item = (i64, u64)>,
{
    let mut totals = HashMap::new();
    for (code, count) in counts {
        *totals.entry(PackageStatus::from_code(code)).or_insert(0) += count;
    }
    totals
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_table() {
        assert_eq!(PackageStatus::from_code(0), PackageStatus::Pending);
        assert_eq!(PackageStatus::from_code(1), PackageStatus::InTransit);
        assert_eq!(PackageStatus::from_code(2), PackageStatus::Expired);
        assert_eq!(PackageStatus::from_code(4), PackageStatus::Delivered);
        assert_eq!(PackageStatus::from_code(5), PackageStatus::Undelivered);
        assert_eq!(PackageStatus::from_code(10), PackageStatus::Exception);
    }

    #[test]
    fn test_unknown_aliases() {
        for code in [3, 6, 7, 8, 9, 11, 99, -1] {
            assert_eq!(PackageStatus::from_code(code), PackageStatus::Unknown);
        }
    }

    #[test]
    fn test_translation_is_stable() {
        for code in -1..=12 {
            assert_eq!(
                PackageStatus::from_code(code),
                PackageStatus::from_code(code)
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(PackageStatus::InTransit.label(), "In Transit");
        assert_eq!(PackageStatus::Pending.to_string(), "Pending");
    }

    #[test]
    fn test_aggregate_sums_aliased_codes() {
        let totals = aggregate_counts([(0, 5), (1, 3), (7, 2), (8, 1)]);
        assert_eq!(totals[&PackageStatus::Pending], 5);
        assert_eq!(totals[&PackageStatus::InTransit], 3);
        assert_eq!(totals[&PackageStatus::Unknown], 3);
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn test_aggregate_empty() {
        let totals = aggregate_counts(std::iter::empty());
        assert!(totals.is_empty());
    }
}
