//! Alert lifecycle: creation, listing, clearing, deletion.
//!
//! Same read-modify-persist discipline as the ledger: changes go to a
//! scratch copy of the document, are saved through the store port, and are
//! committed in memory only after the save succeeds.

use chrono::Utc;

use super::alert::{AlertBook, AlertDirection, AlertStatus, PriceAlert, RsiAlert, DEFAULT_RSI_PERIOD};
use super::error::SharebookError;
use super::validate::{normalize_ticker, require_positive};
use crate::ports::store_port::StorePort;

/// Owns the alert document and its store. Alerts are mutated only here and
/// by the evaluator; they never expire on their own.
pub struct AlertStore {
    store: Box<dyn StorePort>,
    book: AlertBook,
}

impl AlertStore {
    /// Load the alert document through the store. A location that has never
    /// been written yields empty collections.
    pub fn open(store: Box<dyn StorePort>) -> Result<Self, SharebookError> {
        let book = store.load_alerts()?;
        Ok(Self { store, book })
    }

    /// Every alert of both kinds, regardless of status.
    pub fn list_alerts(&self) -> &AlertBook {
        &self.book
    }

    /// Create an ACTIVE price alert with a fresh id and persist it.
    pub fn set_price_alert(
        &mut self,
        ticker: &str,
        target_price: f64,
        direction: AlertDirection,
        name: Option<String>,
    ) -> Result<PriceAlert, SharebookError> {
        let ticker = normalize_ticker(ticker)?;
        require_positive("target_price", target_price)?;

        let mut book = self.book.clone();
        let alert = PriceAlert {
            id: book.next_alert_id(),
            ticker,
            target_price,
            direction,
            name,
            status: AlertStatus::Active,
            created_at: Utc::now(),
            triggered_at: None,
        };
        book.price_alerts.push(alert.clone());

        self.store.save_alerts(&book)?;
        self.book = book;
        Ok(alert)
    }

    /// Create an ACTIVE RSI alert with a fresh id and persist it. The period
    /// defaults to 14. The conventional 0-100 threshold range is the
    /// caller's concern; only positivity is enforced here.
    pub fn set_rsi_alert(
        &mut self,
        ticker: &str,
        rsi_threshold: f64,
        direction: AlertDirection,
        period: Option<u32>,
        name: Option<String>,
    ) -> Result<RsiAlert, SharebookError> {
        let ticker = normalize_ticker(ticker)?;
        require_positive("rsi_threshold", rsi_threshold)?;
        let period = period.unwrap_or(DEFAULT_RSI_PERIOD);
        if period == 0 {
            return Err(SharebookError::Validation {
                field: "period".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let mut book = self.book.clone();
        let alert = RsiAlert {
            id: book.next_alert_id(),
            ticker,
            rsi_threshold,
            period,
            direction,
            name,
            status: AlertStatus::Active,
            created_at: Utc::now(),
            triggered_at: None,
        };
        book.rsi_alerts.push(alert.clone());

        self.store.save_alerts(&book)?;
        self.book = book;
        Ok(alert)
    }

    /// Drop every TRIGGERED alert of both kinds; ACTIVE alerts are untouched.
    /// Returns the number removed.
    pub fn clear_triggered_alerts(&mut self) -> Result<usize, SharebookError> {
        let mut book = self.book.clone();
        let before = book.len();
        book.price_alerts.retain(|alert| alert.is_active());
        book.rsi_alerts.retain(|alert| alert.is_active());
        let removed = before - book.len();

        self.store.save_alerts(&book)?;
        self.book = book;
        Ok(removed)
    }

    /// Drop every alert of both kinds unconditionally. Returns the number
    /// removed.
    pub fn delete_all_alerts(&mut self) -> Result<usize, SharebookError> {
        let removed = self.book.len();
        let book = AlertBook::default();

        self.store.save_alerts(&book)?;
        self.book = book;
        Ok(removed)
    }

    /// Commit an evaluator-produced document: persist first, then replace
    /// the in-memory copy.
    pub(crate) fn apply(&mut self, book: AlertBook) -> Result<(), SharebookError> {
        self.store.save_alerts(&book)?;
        self.book = book;
        Ok(())
    }
}
