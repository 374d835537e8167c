#![allow(dead_code)]

use chrono::NaiveDate;
use sharebook::domain::alert::AlertBook;
use sharebook::domain::error::SharebookError;
use sharebook::domain::ledger::LedgerBook;
use sharebook::ports::market_port::MarketPort;
use sharebook::ports::store_port::StorePort;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

/// In-memory store double. Clones share the same backing documents, so a
/// test can hold a handle and inspect what a component persisted.
#[derive(Clone, Default)]
pub struct MemoryStore {
    pub ledger: Rc<RefCell<LedgerBook>>,
    pub alerts: Rc<RefCell<AlertBook>>,
    pub fail_saves: Rc<Cell<bool>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorePort for MemoryStore {
    fn load_ledger(&self) -> Result<LedgerBook, SharebookError> {
        Ok(self.ledger.borrow().clone())
    }

    fn save_ledger(&self, book: &LedgerBook) -> Result<(), SharebookError> {
        if self.fail_saves.get() {
            return Err(SharebookError::Persistence {
                path: "memory".to_string(),
                reason: "simulated write failure".to_string(),
            });
        }
        *self.ledger.borrow_mut() = book.clone();
        Ok(())
    }

    fn load_alerts(&self) -> Result<AlertBook, SharebookError> {
        Ok(self.alerts.borrow().clone())
    }

    fn save_alerts(&self, book: &AlertBook) -> Result<(), SharebookError> {
        if self.fail_saves.get() {
            return Err(SharebookError::Persistence {
                path: "memory".to_string(),
                reason: "simulated write failure".to_string(),
            });
        }
        *self.alerts.borrow_mut() = book.clone();
        Ok(())
    }
}

/// Market port double with per-ticker prices, RSI values, and failures.
#[derive(Default)]
pub struct MockMarket {
    pub prices: RefCell<HashMap<String, f64>>,
    pub rsi_values: RefCell<HashMap<String, f64>>,
    pub errors: RefCell<HashMap<String, String>>,
}

impl MockMarket {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_price(self, ticker: &str, price: f64) -> Self {
        self.prices.borrow_mut().insert(ticker.to_string(), price);
        self
    }

    pub fn with_rsi(self, ticker: &str, value: f64) -> Self {
        self.rsi_values
            .borrow_mut()
            .insert(ticker.to_string(), value);
        self
    }

    pub fn with_error(self, ticker: &str, reason: &str) -> Self {
        self.errors
            .borrow_mut()
            .insert(ticker.to_string(), reason.to_string());
        self
    }

    pub fn set_price(&self, ticker: &str, price: f64) {
        self.prices.borrow_mut().insert(ticker.to_string(), price);
    }

    pub fn clear_errors(&self) {
        self.errors.borrow_mut().clear();
    }
}

impl MarketPort for MockMarket {
    fn latest_price(&self, ticker: &str) -> Result<f64, SharebookError> {
        if let Some(reason) = self.errors.borrow().get(ticker) {
            return Err(SharebookError::Provider {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        self.prices.borrow().get(ticker).copied().ok_or_else(|| {
            SharebookError::UnknownTicker {
                ticker: ticker.to_string(),
            }
        })
    }

    fn rsi(&self, ticker: &str, _period: u32) -> Result<f64, SharebookError> {
        if let Some(reason) = self.errors.borrow().get(ticker) {
            return Err(SharebookError::Provider {
                ticker: ticker.to_string(),
                reason: reason.clone(),
            });
        }
        self.rsi_values.borrow().get(ticker).copied().ok_or_else(|| {
            SharebookError::UnknownTicker {
                ticker: ticker.to_string(),
            }
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
