//! Price and RSI alert definitions and the persisted alert document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default RSI lookback window when the caller does not pick one.
pub const DEFAULT_RSI_PERIOD: u32 = 14;

/// Trigger side for an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertDirection {
    Above,
    Below,
}

impl AlertDirection {
    /// ABOVE fires at `current >= target`, BELOW at `current <= target`.
    pub fn is_met(self, current: f64, target: f64) -> bool {
        match self {
            AlertDirection::Above => current >= target,
            AlertDirection::Below => current <= target,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertDirection::Above => "above",
            AlertDirection::Below => "below",
        }
    }
}

/// Alert lifecycle state. The only transition is ACTIVE -> TRIGGERED, made by
/// the evaluator; a triggered alert stays triggered until explicitly cleared
/// or deleted. Alerts never expire on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Triggered,
}

/// Notify when a ticker's price crosses a target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    #[serde(default)]
    pub id: u64,
    pub ticker: String,
    pub target_price: f64,
    pub direction: AlertDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<DateTime<Utc>>,
}

impl PriceAlert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    /// Display label; falls back to e.g. "AAPL price above $250".
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!(
                "{} price {} ${}",
                self.ticker,
                self.direction.as_str(),
                self.target_price
            )
        })
    }
}

/// Notify when a ticker's RSI crosses a threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RsiAlert {
    #[serde(default)]
    pub id: u64,
    pub ticker: String,
    pub rsi_threshold: f64,
    #[serde(default = "default_rsi_period")]
    pub period: u32,
    pub direction: AlertDirection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub status: AlertStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub triggered_at: Option<DateTime<Utc>>,
}

impl RsiAlert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }

    /// Display label; falls back to e.g. "TSLA RSI below 30".
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!(
                "{} RSI {} {}",
                self.ticker,
                self.direction.as_str(),
                self.rsi_threshold
            )
        })
    }
}

fn default_rsi_period() -> u32 {
    DEFAULT_RSI_PERIOD
}

/// Persisted alert document: both alert kinds, all statuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertBook {
    #[serde(default)]
    pub price_alerts: Vec<PriceAlert>,
    #[serde(default)]
    pub rsi_alerts: Vec<RsiAlert>,
}

impl AlertBook {
    pub fn len(&self) -> usize {
        self.price_alerts.len() + self.rsi_alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.price_alerts.is_empty() && self.rsi_alerts.is_empty()
    }

    /// Ids are unique across both alert kinds.
    pub(crate) fn next_alert_id(&self) -> u64 {
        self.price_alerts
            .iter()
            .map(|alert| alert.id)
            .chain(self.rsi_alerts.iter().map(|alert| alert.id))
            .max()
            .map_or(1, |max| max + 1)
    }
}
