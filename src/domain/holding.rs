//! Holding aggregate and valuation arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate position in one ticker: share count plus average cost basis.
///
/// Keyed by uppercase ticker in the ledger document. Invariant: shares > 0 —
/// a holding that reaches zero shares is deleted, never stored. Selling does
/// not change `avg_cost`; only buys recompute the weighted average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub shares: f64,
    pub avg_cost: f64,
    pub last_updated: NaiveDate,
}

impl Holding {
    pub fn cost_basis(&self) -> f64 {
        self.shares * self.avg_cost
    }

    pub fn market_value(&self, price: f64) -> f64 {
        self.shares * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        (price - self.avg_cost) * self.shares
    }

    /// Unrealized return as a fraction of cost basis (0.10 = +10%).
    pub fn return_fraction(&self, price: f64) -> f64 {
        self.unrealized_pnl(price) / self.cost_basis()
    }

    /// Fold a buy into the weighted-average cost basis:
    /// `new_avg = (old_shares*old_avg + shares*price) / (old_shares+shares)`.
    pub fn apply_buy(&mut self, shares: f64, price: f64, date: NaiveDate) {
        let total_cost = self.shares * self.avg_cost + shares * price;
        self.shares += shares;
        self.avg_cost = total_cost / self.shares;
        self.last_updated = date;
    }
}
