//! Per-batch outcome ledger.
//!
//! Accumulates created/updated/failed counts and a capped error list while
//! an import batch runs, then computes the terminal job status.

use serde::{Deserialize, Serialize};

use crate::error::RowError;

/// Maximum number of error strings surfaced to the caller. The true failure
/// count is always reported in the stats regardless of this cap.
pub const MAX_SURFACED_ERRORS: usize = 10;

/// Terminal status of an import job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportJobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ImportJobStatus {
    /// Return the status name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ImportJobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row counts for a completed batch. Invariant:
/// `created + updated + failed == total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportStats {
    pub total: u32,
    pub created: u32,
    pub updated: u32,
    pub failed: u32,
}

/// Accumulates per-row outcomes for one import batch.
#[derive(Debug, Default)]
pub struct BatchLedger {
    created: u32,
    updated: u32,
    failed: u32,
    errors: Vec<String>,
    unresolved_references: u32,
}

/// Final outcome of a batch, derived by [`BatchLedger::finalize`].
#[derive(Debug)]
pub struct BatchOutcome {
    pub status: ImportJobStatus,
    pub stats: ImportStats,
    /// At most [`MAX_SURFACED_ERRORS`] entries.
    pub errors: Vec<String>,
    /// Reference-entity names that did not resolve (dropped to null).
    pub unresolved_references: u32,
}

impl BatchLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self) {
        self.created += 1;
    }

    pub fn record_updated(&mut self) {
        self.updated += 1;
    }

    /// Record a row failure. Only the first [`MAX_SURFACED_ERRORS`] error
    /// strings are kept; the failure count is always incremented.
    pub fn record_failure(&mut self, err: &RowError) {
        self.failed += 1;
        if self.errors.len() < MAX_SURFACED_ERRORS {
            self.errors.push(err.to_string());
        }
    }

    /// Count a model/vendor/location name that did not resolve.
    pub fn record_unresolved_reference(&mut self) {
        self.unresolved_references += 1;
    }

    /// Compute the terminal outcome for a batch of `total` rows.
    ///
    /// The status is `failed` only when every row failed; partial success
    /// is still `completed`.
    pub fn finalize(self, total: u32) -> BatchOutcome {
        let status = if total > 0 && self.failed == total {
            ImportJobStatus::Failed
        } else {
            ImportJobStatus::Completed
        };

        BatchOutcome {
            status,
            stats: ImportStats {
                total,
                created: self.created,
                updated: self.updated,
                failed: self.failed,
            },
            errors: self.errors,
            unresolved_references: self.unresolved_references,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(row: usize) -> RowError {
        RowError::new(row, "boom")
    }

    #[test]
    fn test_sum_invariant_holds() {
        let mut ledger = BatchLedger::new();
        ledger.record_created();
        ledger.record_created();
        ledger.record_updated();
        ledger.record_failure(&failure(4));

        let outcome = ledger.finalize(4);
        let s = outcome.stats;
        assert_eq!(s.created + s.updated + s.failed, s.total);
        assert_eq!(s.created, 2);
        assert_eq!(s.updated, 1);
        assert_eq!(s.failed, 1);
    }

    #[test]
    fn test_partial_failure_is_completed() {
        let mut ledger = BatchLedger::new();
        for _ in 0..3 {
            ledger.record_created();
        }
        ledger.record_failure(&failure(4));
        ledger.record_failure(&failure(5));

        let outcome = ledger.finalize(5);
        assert_eq!(outcome.status, ImportJobStatus::Completed);
        assert_eq!(outcome.stats.failed, 2);
    }

    #[test]
    fn test_all_rows_failed_is_failed() {
        let mut ledger = BatchLedger::new();
        for row in 1..=3 {
            ledger.record_failure(&failure(row));
        }

        let outcome = ledger.finalize(3);
        assert_eq!(outcome.status, ImportJobStatus::Failed);
    }

    #[test]
    fn test_empty_batch_is_completed() {
        let outcome = BatchLedger::new().finalize(0);
        assert_eq!(outcome.status, ImportJobStatus::Completed);
        assert_eq!(outcome.stats.total, 0);
    }

    #[test]
    fn test_error_list_capped_but_count_accurate() {
        let mut ledger = BatchLedger::new();
        for row in 1..=25 {
            ledger.record_failure(&failure(row));
        }

        let outcome = ledger.finalize(25);
        assert_eq!(outcome.errors.len(), MAX_SURFACED_ERRORS);
        assert_eq!(outcome.stats.failed, 25);
        assert_eq!(outcome.errors[0], "Row 1: boom");
        assert_eq!(outcome.errors[9], "Row 10: boom");
    }

    #[test]
    fn test_unresolved_reference_count() {
        let mut ledger = BatchLedger::new();
        ledger.record_created();
        ledger.record_unresolved_reference();
        ledger.record_unresolved_reference();

        let outcome = ledger.finalize(1);
        assert_eq!(outcome.unresolved_references, 2);
    }
}
