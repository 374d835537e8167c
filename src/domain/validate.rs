//! Input validation shared by the ledger and alert components.

use super::error::SharebookError;

/// Normalize a ticker symbol: trimmed and uppercased. Empty input is rejected.
pub fn normalize_ticker(ticker: &str) -> Result<String, SharebookError> {
    let normalized = ticker.trim().to_uppercase();
    if normalized.is_empty() {
        return Err(SharebookError::Validation {
            field: "ticker".to_string(),
            reason: "must not be empty".to_string(),
        });
    }
    Ok(normalized)
}

/// Reject non-finite or non-positive quantities before any state is touched.
pub fn require_positive(field: &str, value: f64) -> Result<(), SharebookError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(SharebookError::Validation {
            field: field.to_string(),
            reason: format!("must be a positive finite number, got {value}"),
        });
    }
    Ok(())
}
