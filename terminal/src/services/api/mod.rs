//! # Backend API Client Module
//!
//! HTTP client for the paper-trading backend plus the push price feed.
//!
//! ```text
//! api/
//! ├── client.rs        - ApiClient: headers, status mapping, ApiService impl
//! ├── auth.rs          - login, register
//! ├── trading.rs       - trades, place/close, live price
//! ├── wallet.rs        - balance, deposit, withdraw, transactions
//! ├── notifications.rs - notification center, settings, price alerts
//! ├── profile.rs       - profile, avatar, preferences, password, 2FA
//! └── websocket.rs     - priceUpdate push channel
//! ```

pub mod auth;
pub mod client;
pub mod notifications;
pub mod profile;
pub mod trading;
pub mod wallet;
pub mod websocket;

pub use client::ApiClient;
pub use websocket::PriceFeedStatus;
