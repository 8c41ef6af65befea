use serde::{Deserialize, Serialize};
use std::fmt;

/// Order direction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trade lifecycle status
///
/// Status only moves forward: `Open` -> `Closed`. A closed trade is final.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Open,
    Closed,
}

impl TradeStatus {
    /// Whether a record in this status may be replaced by one in `next`.
    pub fn can_transition_to(self, next: TradeStatus) -> bool {
        match (self, next) {
            (TradeStatus::Open, _) => true,
            (TradeStatus::Closed, _) => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TradeStatus::Open => "open",
            TradeStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A simulated trade
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub symbol: String,
    pub side: TradeSide,
    pub quantity: f64,
    /// Execution price
    pub price: f64,
    pub status: TradeStatus,
    /// Realized profit/loss, only meaningful once closed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
}

impl Trade {
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }

    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed
    }

    /// Realized P&L: the recorded pnl of a closed trade, zero otherwise.
    pub fn realized_pnl(&self) -> f64 {
        if self.is_closed() {
            self.pnl.unwrap_or(0.0)
        } else {
            0.0
        }
    }

    /// Notional value at execution price.
    pub fn notional(&self) -> f64 {
        self.quantity * self.price
    }
}

/// Place trade request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceTradeRequest {
    pub symbol: String,
    pub quantity: f64,
    pub side: TradeSide,
}

/// Current price for a symbol (REST poll and push channel share this shape)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LivePrice {
    pub symbol: String,
    pub price: f64,
    #[serde(default, rename = "change24h", skip_serializing_if = "Option::is_none")]
    pub change_24h: Option<f64>,
}

/// Trading pairs offered in the trade form and live price widget
pub const POPULAR_SYMBOLS: [&str; 5] = ["BTCUSDT", "ETHUSDT", "ADAUSDT", "SOLUSDT", "DOTUSDT"];
