//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the trading backend over REST and the push channel.
//!
//! ## Module Organization
//!
//! - [`auth`] - Login, registration, user record
//! - [`envelope`] - The `{ "data": ... }` wrapper and error bodies
//! - [`trading`] - Trades, order placement, live prices
//! - [`wallet`] - Wallet balance and transfers
//! - [`notifications`] - Notification feed, settings, price alerts
//! - [`profile`] - Profile, preferences, security
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /api/trade/place
//! Authorization: Bearer eyJhbGciOi...
//! Content-Type: application/json
//!
//! { "symbol": "BTCUSDT", "quantity": 0.25, "side": "buy" }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "data": {
//!     "_id": "665f1c...",
//!     "symbol": "BTCUSDT",
//!     "side": "buy",
//!     "quantity": 0.25,
//!     "price": 45230.5,
//!     "status": "open",
//!     "createdAt": "2024-06-04T10:00:00Z"
//!   }
//! }
//! ```

pub mod auth;
pub mod envelope;
pub mod notifications;
pub mod profile;
pub mod trading;
pub mod wallet;

pub use auth::*;
pub use envelope::*;
pub use notifications::*;
pub use profile::*;
pub use trading::*;
pub use wallet::*;
