//! # Common Error Types
//!
//! Consolidated error handling for the PaperTrade client.
//!
//! ## Error Categories
//!
//! - **Unauthorized**: the backend answered 401; the session is no longer valid
//! - **Api**: backend communication errors (network, HTTP status, JSON decoding)
//! - **Validation**: input rejected before any request was sent
//! - **State**: application state management errors
//! - **Storage**: the local session file could not be read or written
//!
//! `Unauthorized` is the only variant the application treats as fatal for the
//! session: handlers route it to a forced logout instead of a toast.
//!
//! ## Usage Pattern
//!
//! ```rust
//! use papertrade::core::error::AppError;
//!
//! fn validate_amount(amount: f64) -> Result<f64, AppError> {
//!     if amount <= 0.0 {
//!         return Err(AppError::Validation("Amount must be positive".to_string()));
//!     }
//!     Ok(amount)
//! }
//!
//! assert!(validate_amount(-1.0).is_err());
//! ```

use thiserror::Error;

/// Application-wide error type.
///
/// # Example
///
/// ```rust
/// use papertrade::core::error::AppError;
///
/// let api_err = AppError::Api("HTTP error! status: 500".to_string());
/// let validation_err = AppError::Validation("Amount must be positive".to_string());
///
/// assert_eq!(api_err.to_string(), "HTTP error! status: 500");
/// assert_eq!(validation_err.to_string(), "Amount must be positive");
/// assert!(AppError::Unauthorized.is_unauthorized());
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// The backend rejected the bearer token (HTTP 401).
    #[error("Session expired. Please log in again.")]
    Unauthorized,

    /// Backend API communication error.
    ///
    /// Carries the server's error text when it sent one, otherwise
    /// `HTTP error! status: <code>` or a transport/decoding message.
    #[error("{0}")]
    Api(String),

    /// Input validation error, raised before any request is made.
    #[error("{0}")]
    Validation(String),

    /// Application state management error.
    #[error("State error: {0}")]
    State(String),

    /// Session persistence error.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized)
    }
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Api(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Api(msg.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}
