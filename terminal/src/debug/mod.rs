//! # Logging and Diagnostics
//!
//! File-based structured logging for the PaperTrade client.
//!
//! - **File-based logging**: `logs/papertrade.log` with daily rotation
//! - **Non-blocking writes** so logging never stalls the UI thread
//! - **Panic hook** that records the panic location and message before exit
//!
//! ## Configuration
//!
//! - `RUST_LOG`: Log level filter (e.g., `papertrade=debug,info`)
//! - `PAPERTRADE_LOG_DIR`: Directory for rotated log files (default: `logs`)
//! - `PAPERTRADE_LOG_STDERR`: Also log to stderr (1=on, 0=off)

pub mod config;
pub mod logger;

pub use config::DebugConfig;
pub use logger::init as init_logger;
