//! # PaperTrade Desktop Client - Library Root
//!
//! A **native desktop GUI** for practicing cryptocurrency trading against a
//! simulated ("paper") trading backend. All business logic lives on the
//! server; this crate handles authentication, state, live prices and the
//! screens. This library contains every module used by the binary (`main.rs`).
//!
//! ## Features
//!
//! - **Accounts**: Sign in, registration, profile, preferences and 2FA
//! - **Paper Trading**: Market orders, trade history, closing trades and P&L stats
//! - **Wallet**: Virtual balance with deposits, withdrawals and history
//! - **Live Prices**: WebSocket push feed with REST polling as fallback
//! - **Notifications**: Inbox, price alerts and delivery settings
//! - **Learn**: Bundled trading guides and tutorials, readable offline
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              papertrade (this crate)                   │
//! ├────────────────────────────────────────────────────────┤
//! │  egui / eframe  - Immediate-mode GUI and native window │
//! │  egui_plot      - Live price chart                     │
//! │  Tokio          - Async runtime                        │
//! │  Reqwest        - REST client                          │
//! │  Tungstenite    - Price push channel                   │
//! └────────────────────────────────────────────────────────┘
//!          │ HTTP (JSON, bearer token)    │ WebSocket
//!          ▼                              ▼
//! ┌───────────────────────────────────────────────────────┐
//! │          Paper trading backend (`/api`)               │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: Orchestrator, state, store slices, events and handlers
//! - **config**: Environment configuration ([`ClientConfig`])
//! - **core**: Error type and the [`core::service::ApiService`] trait
//! - **services**: REST client, price stream, session file, bundled docs
//! - **ui**: Screens, widgets and theme
//! - **debug**: Log file setup and panic hook
//! - **utils**: Form validation and the Tokio runtime
//!
//! ### Module Dependency Graph
//!
//! ```text
//! main.rs
//!   │
//!   ├── app (state, events, handlers)
//!   │   ├── services::api (HTTP + WebSocket)
//!   │   └── services::session (persisted login)
//!   │
//!   └── ui (rendering)
//!       ├── screens::* (auth, dashboard, trades, wallet, ...)
//!       ├── widgets::* (nav bar, cards, forms, tables)
//!       └── theme
//! ```
//!
//! ## Event-Driven Architecture
//!
//! - Main thread: input handling and rendering
//! - Async tasks: network requests and the price stream (Tokio)
//!
//! Tasks report back through an `async_channel` of [`AppEvent`]s which the
//! main thread drains once per frame. State lives in
//! `Arc<parking_lot::RwLock<AppState>>` and is locked only briefly.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p papertrade
//! ```
//!
//! Integration tests under `tests/` run the HTTP client against an in-process
//! axum server and drive [`App`] with a mock [`core::service::ApiService`].

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;
pub mod utils;

pub use app::{App, AppEvent, AppState, Screen};
pub use config::ClientConfig;
pub use core::{AppError, Result};
