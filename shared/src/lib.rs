//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the PaperTrade desktop client and the
//! simulated trading backend. All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for API communication
//!   - **[`dto::auth`]**: Login, registration and the user record
//!   - **[`dto::trading`]**: Trades, order placement and live prices
//!   - **[`dto::wallet`]**: Wallet balance, deposits and withdrawals
//!   - **[`dto::notifications`]**: Notifications, settings and price alerts
//!   - **[`dto::profile`]**: Profile, preferences and two-factor setup
//! - **[`stats`]**: Derived statistics computed from a trade list
//! - **[`utils`]**: Display formatting shared by every screen
//!
//! ## Wire Format
//!
//! The backend speaks camelCase JSON with Mongo-style `_id` keys:
//! - Rust fields are snake_case and mapped with `#[serde(rename_all = "camelCase")]`
//! - Record identifiers deserialize from either `_id` or `id`
//! - Trading, auth and wallet endpoints wrap their payload in `{ "data": ... }`
//!   (see [`dto::envelope::ApiEnvelope`])
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::trading::{Trade, TradeSide, TradeStatus};
//! use shared::stats::TradeStats;
//!
//! let trades = vec![Trade {
//!     id: "t1".to_string(),
//!     symbol: "BTCUSDT".to_string(),
//!     side: TradeSide::Buy,
//!     quantity: 0.5,
//!     price: 45_000.0,
//!     status: TradeStatus::Closed,
//!     pnl: Some(120.0),
//!     created_at: "2024-01-01T00:00:00Z".to_string(),
//!     closed_at: None,
//! }];
//!
//! let stats = TradeStats::from_trades(&trades);
//! assert_eq!(stats.total_trades, 1);
//! assert_eq!(stats.win_rate, 100.0);
//! ```

pub mod dto;
pub mod stats;
pub mod utils;

// Wildcard re-exports: shared is a DTO library where every export is public API
pub use dto::*;
pub use stats::TradeStats;
pub use utils::*;
