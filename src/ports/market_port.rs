//! Market data and indicator access port trait.

use crate::domain::error::SharebookError;

/// External price and indicator lookups, one ticker at a time.
///
/// Implementations fail with [`SharebookError::UnknownTicker`] or
/// [`SharebookError::Provider`]; batch callers (portfolio valuation, alert
/// evaluation) isolate those failures per ticker. Bounding a slow lookup
/// with a timeout is the implementation's concern, not the core's.
pub trait MarketPort {
    /// Latest market price for a ticker.
    fn latest_price(&self, ticker: &str) -> Result<f64, SharebookError>;

    /// Current RSI value for a ticker over the given lookback period.
    fn rsi(&self, ticker: &str, period: u32) -> Result<f64, SharebookError>;
}
