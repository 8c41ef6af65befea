use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper used by the auth, trading and wallet endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub data: T,
}

/// Error body returned by the backend on non-2xx responses
///
/// Different routes populate either `message` or `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorResponse {
    /// The most specific human-readable message carried by the body.
    pub fn into_message(self) -> Option<String> {
        [self.message, self.error]
            .into_iter()
            .flatten()
            .find(|msg| !msg.trim().is_empty())
    }
}
