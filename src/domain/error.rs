//! Domain error types.

/// Top-level error type for sharebook.
///
/// Validation and precondition errors are raised before any mutation, so a
/// failed call leaves both the in-memory state and the persisted documents
/// untouched. Persistence errors propagate unmodified; the core never
/// silently retries I/O.
#[derive(Debug, thiserror::Error)]
pub enum SharebookError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("cannot sell {requested} shares of {ticker}: only {held} held")]
    InsufficientShares {
        ticker: String,
        requested: f64,
        held: f64,
    },

    #[error("no holding for {ticker}")]
    NotFound { ticker: String },

    #[error("unknown ticker {ticker}")]
    UnknownTicker { ticker: String },

    #[error("provider error for {ticker}: {reason}")]
    Provider { ticker: String, reason: String },

    #[error("persistence error for {path}: {reason}")]
    Persistence { path: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },
}

impl SharebookError {
    /// True for market-port failures, which batch operations recover from
    /// per ticker instead of aborting.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            SharebookError::UnknownTicker { .. } | SharebookError::Provider { .. }
        )
    }
}
