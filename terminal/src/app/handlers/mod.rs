//! # Event Handlers
//!
//! User actions grouped by domain. Each handler validates input, applies any
//! optimistic state change, then spawns the request whose result comes back
//! through [`crate::app::AppEvent`].

pub mod auth;
pub mod navigation;
pub mod notifications;
pub mod profile;
pub mod trading;
pub mod wallet;
