use crate::types::DbId;

/// Domain-level error type shared across the workspace.
///
/// Batch-aborting errors only. Per-row reconciliation failures use
/// [`RowError`] instead, which is caught at the row boundary and recorded in
/// the batch ledger rather than propagated.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Invalid asset status: {0}")]
    InvalidStatus(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// A failure confined to a single import row.
///
/// Rendered as `"Row N: <message>"` with 1-based row numbers, matching what
/// operators see in the batch error list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Row {row}: {message}")]
pub struct RowError {
    pub row: usize,
    pub message: String,
}

impl RowError {
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_error_display() {
        let err = RowError::new(3, "invalid cost value 'abc'");
        assert_eq!(err.to_string(), "Row 3: invalid cost value 'abc'");
    }

    #[test]
    fn test_not_found_display() {
        let err = CoreError::NotFound {
            entity: "Asset",
            id: 42,
        };
        assert_eq!(err.to_string(), "Entity not found: Asset with id 42");
    }
}
