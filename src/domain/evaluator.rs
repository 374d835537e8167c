//! Edge-triggered alert evaluation.
//!
//! `check_alerts` walks every ACTIVE alert, fetches the current price or RSI
//! through the market port, and flips matching alerts to TRIGGERED. The
//! transition is one-way, so a condition that stays true across repeated
//! calls is reported exactly once — on the call where the transition
//! happens. A provider failure skips only the affected alert; the rest of
//! the batch is still evaluated.

use chrono::Utc;

use super::alert::{AlertDirection, AlertStatus};
use super::alert_store::AlertStore;
use super::error::SharebookError;
use crate::ports::market_port::MarketPort;

/// Which kind of alert a report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Price,
    Rsi,
}

/// An alert that transitioned ACTIVE -> TRIGGERED during this call.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredAlert {
    pub id: u64,
    pub kind: AlertKind,
    pub ticker: String,
    pub label: String,
    pub direction: AlertDirection,
    pub target: f64,
    pub current: f64,
}

/// An ACTIVE alert that could not be evaluated this call. It stays ACTIVE
/// and will be retried on the next invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedAlert {
    pub id: u64,
    pub kind: AlertKind,
    pub ticker: String,
    pub reason: String,
}

/// Outcome of one `check_alerts` invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertCheckReport {
    /// Number of ACTIVE alerts considered.
    pub checked: usize,
    pub triggered: Vec<TriggeredAlert>,
    pub skipped: Vec<SkippedAlert>,
}

impl AlertCheckReport {
    pub fn any_triggered(&self) -> bool {
        !self.triggered.is_empty()
    }
}

/// Evaluate every ACTIVE alert against current market values.
///
/// Transitions are applied to a scratch copy of the alert document and
/// persisted before being committed, so a persistence failure leaves every
/// alert ACTIVE and re-armable. Nothing is persisted when no alert fires.
pub fn check_alerts(
    alerts: &mut AlertStore,
    market: &dyn MarketPort,
) -> Result<AlertCheckReport, SharebookError> {
    let mut book = alerts.list_alerts().clone();
    let mut report = AlertCheckReport::default();
    let now = Utc::now();

    for alert in book.price_alerts.iter_mut().filter(|a| a.is_active()) {
        report.checked += 1;
        let current = match market.latest_price(&alert.ticker) {
            Ok(price) => price,
            Err(err) => {
                report.skipped.push(SkippedAlert {
                    id: alert.id,
                    kind: AlertKind::Price,
                    ticker: alert.ticker.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        if alert.direction.is_met(current, alert.target_price) {
            alert.status = AlertStatus::Triggered;
            alert.triggered_at = Some(now);
            report.triggered.push(TriggeredAlert {
                id: alert.id,
                kind: AlertKind::Price,
                ticker: alert.ticker.clone(),
                label: alert.label(),
                direction: alert.direction,
                target: alert.target_price,
                current,
            });
        }
    }

    for alert in book.rsi_alerts.iter_mut().filter(|a| a.is_active()) {
        report.checked += 1;
        let current = match market.rsi(&alert.ticker, alert.period) {
            Ok(value) => value,
            Err(err) => {
                report.skipped.push(SkippedAlert {
                    id: alert.id,
                    kind: AlertKind::Rsi,
                    ticker: alert.ticker.clone(),
                    reason: err.to_string(),
                });
                continue;
            }
        };
        if alert.direction.is_met(current, alert.rsi_threshold) {
            alert.status = AlertStatus::Triggered;
            alert.triggered_at = Some(now);
            report.triggered.push(TriggeredAlert {
                id: alert.id,
                kind: AlertKind::Rsi,
                ticker: alert.ticker.clone(),
                label: alert.label(),
                direction: alert.direction,
                target: alert.rsi_threshold,
                current,
            });
        }
    }

    if report.any_triggered() {
        alerts.apply(book)?;
    }
    Ok(report)
}
