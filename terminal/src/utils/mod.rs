//! # Utility Functions
//!
//! - **[`validation`]**: Form input checks (email, password, amounts, trade form)
//! - **[`runtime`]**: The process-wide Tokio runtime
//!
//! Display formatting (currency, percentages, timestamps) lives in
//! [`shared::utils`] so it can be unit tested without the GUI stack.

pub mod runtime;
pub mod validation;
