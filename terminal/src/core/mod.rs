//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and testability.
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: The `ApiService` trait every backend call goes through
//!
//! ## Dependency Injection
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use papertrade::config::ClientConfig;
//! use papertrade::core::service::ApiService;
//! use papertrade::services::api::ApiClient;
//!
//! // In production: the reqwest-backed client
//! let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&ClientConfig::default()));
//! // In tests: any mock implementing ApiService
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::ApiService;
