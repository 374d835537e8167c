//! Immutable buy/sell transaction records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trade side. Serialized uppercase ("BUY"/"SELL") in the ledger document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeKind {
    Buy,
    Sell,
}

/// One entry in the append-only transaction log.
///
/// The log is the source-of-truth event record: entries are never mutated or
/// reordered after insertion, and insertion order is occurrence order.
/// `realized_pnl`/`realized_pnl_pct` are present only on sells. Ids are
/// monotonic; documents written before ids existed default to 0 on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TradeKind,
    pub ticker: String,
    pub shares: f64,
    pub price: f64,
    pub date: NaiveDate,
    pub total: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_pnl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realized_pnl_pct: Option<f64>,
}
