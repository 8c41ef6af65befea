//! # Services Module
//!
//! Everything that talks to the outside world.
//!
//! ```text
//! services/
//! ├── api/         - Backend REST client, one module per endpoint group,
//! │                  plus the WebSocket price stream
//! ├── session.rs   - Token + user persisted to a JSON file between runs
//! └── docs.rs      - Bundled guides and tutorials (read-only)
//! ```
//!
//! ## Error Handling
//!
//! Every network call returns `crate::core::Result<T>`:
//! - `AppError::Unauthorized` for HTTP 401 (the app forces a logout)
//! - `AppError::Api` with the server's message for other failures
//! - `AppError::Storage` for session file I/O
//!
//! ## Thread Safety
//!
//! `ApiClient` wraps `reqwest::Client` and keeps its bearer token behind a
//! `parking_lot::RwLock`, so one `Arc<ApiClient>` is shared by every task.

pub mod api;
pub mod docs;
pub mod session;
