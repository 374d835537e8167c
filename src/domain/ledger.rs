//! Portfolio ledger: cost-basis accounting over an append-only trade log.
//!
//! Holdings are a cached aggregate; the transaction log is the source of
//! truth, and the cache must always equal a replay of the log (see
//! [`replay_holdings`]). Every mutation is read-modify-persist as one unit:
//! the change is applied to a scratch copy, saved through the store port,
//! and only then committed in memory, so a failed call leaves no partial
//! state behind.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::error::SharebookError;
use super::holding::Holding;
use super::transaction::{TradeKind, Transaction};
use super::validate::{normalize_ticker, require_positive};
use crate::ports::market_port::MarketPort;
use crate::ports::store_port::StorePort;

/// Persisted ledger document: holdings keyed by ticker plus the transaction log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerBook {
    #[serde(default)]
    pub holdings: HashMap<String, Holding>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl LedgerBook {
    fn next_transaction_id(&self) -> u64 {
        self.transactions
            .iter()
            .map(|txn| txn.id)
            .max()
            .map_or(1, |max| max + 1)
    }
}

/// Rebuild the holdings map by replaying the transaction log in order.
pub fn replay_holdings(transactions: &[Transaction]) -> HashMap<String, Holding> {
    let mut holdings: HashMap<String, Holding> = HashMap::new();
    for txn in transactions {
        match txn.kind {
            TradeKind::Buy => match holdings.get_mut(&txn.ticker) {
                Some(holding) => holding.apply_buy(txn.shares, txn.price, txn.date),
                None => {
                    holdings.insert(
                        txn.ticker.clone(),
                        Holding {
                            shares: txn.shares,
                            avg_cost: txn.price,
                            last_updated: txn.date,
                        },
                    );
                }
            },
            TradeKind::Sell => {
                if let Some(holding) = holdings.get_mut(&txn.ticker) {
                    let remaining = holding.shares - txn.shares;
                    if remaining == 0.0 {
                        holdings.remove(&txn.ticker);
                    } else {
                        holding.shares = remaining;
                        holding.last_updated = txn.date;
                    }
                }
            }
        }
    }
    holdings
}

/// Outcome of a buy, echoing the updated holding.
#[derive(Debug, Clone, PartialEq)]
pub struct BuyReceipt {
    pub ticker: String,
    pub transaction_id: u64,
    pub shares_bought: f64,
    pub total_cost: f64,
    pub shares_held: f64,
    pub avg_cost: f64,
}

/// Outcome of a sell, carrying P&L realized against average cost basis.
/// `shares_remaining` is zero when the position was fully liquidated.
#[derive(Debug, Clone, PartialEq)]
pub struct SellReceipt {
    pub ticker: String,
    pub transaction_id: u64,
    pub shares_sold: f64,
    pub sale_value: f64,
    pub realized_pnl: f64,
    pub realized_pnl_pct: f64,
    pub shares_remaining: f64,
}

/// Market figures for one priced holding.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketValuation {
    pub current_price: f64,
    pub market_value: f64,
    pub unrealized_pnl: f64,
    pub return_fraction: f64,
}

/// One row of a portfolio valuation. `market` is `None` when the price
/// lookup failed; the row is still reported rather than aborting the view.
#[derive(Debug, Clone, PartialEq)]
pub struct HoldingView {
    pub ticker: String,
    pub shares: f64,
    pub avg_cost: f64,
    pub cost_basis: f64,
    pub last_updated: NaiveDate,
    pub market: Option<MarketValuation>,
}

/// Aggregated portfolio valuation. Cost basis totals every holding;
/// market value and unrealized P&L cover only the priced ones.
#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSummary {
    pub holdings: Vec<HoldingView>,
    pub total_cost_basis: f64,
    pub total_market_value: f64,
    pub total_unrealized_pnl: f64,
    pub unpriced: usize,
}

/// The portfolio ledger component. Owns the ledger document and its store.
pub struct PortfolioLedger {
    store: Box<dyn StorePort>,
    book: LedgerBook,
}

impl PortfolioLedger {
    /// Load the ledger document through the store. A location that has never
    /// been written yields an empty book.
    pub fn open(store: Box<dyn StorePort>) -> Result<Self, SharebookError> {
        let book = store.load_ledger()?;
        Ok(Self { store, book })
    }

    pub fn book(&self) -> &LedgerBook {
        &self.book
    }

    /// Record a buy. Creates the holding on the first buy for a ticker and
    /// folds subsequent buys into the weighted-average cost basis. The date
    /// defaults to today.
    pub fn add_holding(
        &mut self,
        ticker: &str,
        shares: f64,
        price: f64,
        date: Option<NaiveDate>,
    ) -> Result<BuyReceipt, SharebookError> {
        let ticker = normalize_ticker(ticker)?;
        require_positive("shares", shares)?;
        require_positive("price", price)?;
        let date = date.unwrap_or_else(today);

        let mut book = self.book.clone();
        match book.holdings.get_mut(&ticker) {
            Some(holding) => holding.apply_buy(shares, price, date),
            None => {
                book.holdings.insert(
                    ticker.clone(),
                    Holding {
                        shares,
                        avg_cost: price,
                        last_updated: date,
                    },
                );
            }
        }

        let id = book.next_transaction_id();
        let total = shares * price;
        book.transactions.push(Transaction {
            id,
            kind: TradeKind::Buy,
            ticker: ticker.clone(),
            shares,
            price,
            date,
            total,
            realized_pnl: None,
            realized_pnl_pct: None,
        });

        self.store.save_ledger(&book)?;
        let updated = &book.holdings[&ticker];
        let receipt = BuyReceipt {
            ticker: ticker.clone(),
            transaction_id: id,
            shares_bought: shares,
            total_cost: total,
            shares_held: updated.shares,
            avg_cost: updated.avg_cost,
        };
        self.book = book;
        Ok(receipt)
    }

    /// Record a sell. Realized P&L is `(price - avg_cost) * shares`; the
    /// average cost of the remaining shares is unchanged. A sell that brings
    /// the position to exactly zero deletes the holding.
    pub fn remove_holding(
        &mut self,
        ticker: &str,
        shares: f64,
        price: f64,
        date: Option<NaiveDate>,
    ) -> Result<SellReceipt, SharebookError> {
        let ticker = normalize_ticker(ticker)?;
        require_positive("shares", shares)?;
        require_positive("price", price)?;
        let date = date.unwrap_or_else(today);

        let mut book = self.book.clone();
        let (realized_pnl, realized_pnl_pct, remaining) = {
            let Some(holding) = book.holdings.get_mut(&ticker) else {
                return Err(SharebookError::NotFound { ticker });
            };
            if shares > holding.shares {
                return Err(SharebookError::InsufficientShares {
                    ticker,
                    requested: shares,
                    held: holding.shares,
                });
            }
            let cost_basis = holding.avg_cost * shares;
            let pnl = (price - holding.avg_cost) * shares;
            let pct = pnl / cost_basis * 100.0;
            let remaining = holding.shares - shares;
            if remaining != 0.0 {
                holding.shares = remaining;
                holding.last_updated = date;
            }
            (pnl, pct, remaining)
        };
        if remaining == 0.0 {
            book.holdings.remove(&ticker);
        }

        let id = book.next_transaction_id();
        let total = shares * price;
        book.transactions.push(Transaction {
            id,
            kind: TradeKind::Sell,
            ticker: ticker.clone(),
            shares,
            price,
            date,
            total,
            realized_pnl: Some(realized_pnl),
            realized_pnl_pct: Some(realized_pnl_pct),
        });

        self.store.save_ledger(&book)?;
        let receipt = SellReceipt {
            ticker,
            transaction_id: id,
            shares_sold: shares,
            sale_value: total,
            realized_pnl,
            realized_pnl_pct,
            shares_remaining: remaining,
        };
        self.book = book;
        Ok(receipt)
    }

    /// Value every holding against current prices. A failed lookup marks the
    /// row as unpriced instead of failing the whole view; its cost basis
    /// still counts toward the invested total.
    pub fn view_portfolio(&self, market: &dyn MarketPort) -> PortfolioSummary {
        // Sorted for stable output.
        let mut tickers: Vec<&String> = self.book.holdings.keys().collect();
        tickers.sort();

        let mut holdings = Vec::with_capacity(tickers.len());
        let mut total_cost_basis = 0.0;
        let mut total_market_value = 0.0;
        let mut total_unrealized_pnl = 0.0;
        let mut unpriced = 0;

        for ticker in tickers {
            let holding = &self.book.holdings[ticker];
            let valuation = match market.latest_price(ticker) {
                Ok(price) => Some(MarketValuation {
                    current_price: price,
                    market_value: holding.market_value(price),
                    unrealized_pnl: holding.unrealized_pnl(price),
                    return_fraction: holding.return_fraction(price),
                }),
                Err(_) => None,
            };

            total_cost_basis += holding.cost_basis();
            match &valuation {
                Some(market) => {
                    total_market_value += market.market_value;
                    total_unrealized_pnl += market.unrealized_pnl;
                }
                None => unpriced += 1,
            }

            holdings.push(HoldingView {
                ticker: ticker.clone(),
                shares: holding.shares,
                avg_cost: holding.avg_cost,
                cost_basis: holding.cost_basis(),
                last_updated: holding.last_updated,
                market: valuation,
            });
        }

        PortfolioSummary {
            holdings,
            total_cost_basis,
            total_market_value,
            total_unrealized_pnl,
            unpriced,
        }
    }

    /// The most recent transactions, newest first. No limit returns the full
    /// log; the underlying log is never truncated by this read.
    pub fn transactions(&self, limit: Option<usize>) -> Vec<Transaction> {
        let take = limit.unwrap_or(self.book.transactions.len());
        self.book
            .transactions
            .iter()
            .rev()
            .take(take)
            .cloned()
            .collect()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
