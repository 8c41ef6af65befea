//! # API Client
//!
//! HTTP client for the paper-trading backend. All domain modules go through
//! the verb helpers here, so header handling and status mapping live in one
//! place:
//!
//! - `Content-Type: application/json` on JSON requests
//! - `Authorization: Bearer <token>` whenever a token is set
//! - `x-request-id: <uuid v4>` on every request, for backend log correlation
//! - 401 becomes [`AppError::Unauthorized`]; other non-2xx statuses become
//!   [`AppError::Api`] carrying the server's error text

use std::time::{Duration, Instant};

use parking_lot::RwLock;
use reqwest::multipart::Form;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use shared::dto::envelope::ErrorResponse;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::ApiService;

/// Request timeout used when no configuration is supplied.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Header carrying a per-request correlation id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// HTTP client for communicating with the backend API server.
///
/// Holds a pooled `reqwest::Client` plus the current bearer token. The token
/// sits behind a lock so the client can be shared as `Arc<dyn ApiService>`
/// and updated on login/logout.
pub struct ApiClient {
    pub(crate) client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a client from configuration (base URL and timeout).
    pub fn new(config: &ClientConfig) -> Self {
        Self::build(&config.api_url, config.request_timeout())
    }

    /// Create a client against an explicit base URL with the default timeout.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::build(&base_url.into(), Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    fn build(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build configured HTTP client, using defaults");
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/wallet`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, self.url(path))
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());

        if let Some(token) = self.token.read().as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn json_request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request(method, path)
            .header(header::CONTENT_TYPE, "application/json")
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, self.json_request(Method::GET, path))
            .await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.json_request(Method::POST, path).json(body);
        self.send(Method::POST, path, builder).await
    }

    /// POST without a request body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::POST, path, self.json_request(Method::POST, path))
            .await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.json_request(Method::PUT, path).json(body);
        self.send(Method::PUT, path, builder).await
    }

    /// PUT without a request body.
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::PUT, path, self.json_request(Method::PUT, path))
            .await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, self.json_request(Method::DELETE, path))
            .await
    }

    /// POST a multipart form (reqwest sets the boundary content type).
    pub async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let builder = self.request(Method::POST, path).multipart(form);
        self.send(Method::POST, path, builder).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<T> {
        let start = Instant::now();

        let response = builder.send().await.map_err(|e| {
            tracing::error!(method = %method, path = %path, error = %e, "API network error");
            AppError::Api(format!("Network error: {}", e))
        })?;

        tracing::debug!(
            method = %method,
            path = %path,
            status = response.status().as_u16(),
            duration_ms = start.elapsed().as_millis(),
            "API request completed"
        );

        decode_response(response).await
    }
}

/// Map a response to `T` or an [`AppError`].
///
/// An empty 2xx body decodes as JSON `null`, so `()`/`Option`/`Value`
/// targets accept `204 No Content`. A 2xx body that is not declared as JSON
/// decodes as a JSON string, so `Value`/`String` targets accept
/// `200 text/plain` acknowledgements.
pub(crate) async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_ascii_lowercase);

    if status == StatusCode::UNAUTHORIZED {
        tracing::warn!("Backend rejected credentials (401)");
        return Err(AppError::Unauthorized);
    }

    let body = response
        .text()
        .await
        .map_err(|e| AppError::Api(format!("Failed to read response: {}", e)))?;

    if !status.is_success() {
        let message = error_message(status, &body);
        tracing::warn!(status = status.as_u16(), error = %message, "API request failed");
        return Err(AppError::Api(message));
    }

    decode_success_body(content_type.as_deref(), body)
}

fn decode_success_body<T: DeserializeOwned>(content_type: Option<&str>, body: String) -> Result<T> {
    let parsed = if body.trim().is_empty() {
        serde_json::from_value(Value::Null)
    } else {
        match content_type {
            Some(kind) if kind.contains("json") => serde_json::from_str(&body),
            Some(_) => serde_json::from_value(Value::String(body)),
            // Undeclared: JSON when it parses, text otherwise.
            None => match serde_json::from_str::<Value>(&body) {
                Ok(value) => serde_json::from_value(value),
                Err(_) => serde_json::from_value(Value::String(body)),
            },
        }
    };
    parsed.map_err(|e| {
        tracing::error!(error = %e, "API response parse error");
        AppError::Api(format!("Failed to parse response: {}", e))
    })
}

/// Error text for a failed response.
///
/// A JSON `{message}`/`{error}` body yields that field; any other non-empty
/// body is passed through verbatim; an empty body yields
/// `HTTP error! status: <code>`.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP error! status: {}", status.as_u16());
    }

    serde_json::from_str::<ErrorResponse>(trimmed)
        .ok()
        .and_then(ErrorResponse::into_message)
        .unwrap_or_else(|| trimmed.to_string())
}

// Implement ApiService trait for ApiClient
#[async_trait::async_trait]
impl ApiService for ApiClient {
    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    async fn login(&self, request: shared::LoginRequest) -> Result<shared::AuthResponse> {
        super::auth::login(self, request).await
    }

    async fn register(&self, request: shared::RegisterRequest) -> Result<shared::AuthResponse> {
        super::auth::register(self, request).await
    }

    async fn get_user_trades(&self) -> Result<Vec<shared::Trade>> {
        super::trading::get_user_trades(self).await
    }

    async fn place_trade(&self, request: shared::PlaceTradeRequest) -> Result<shared::Trade> {
        super::trading::place_trade(self, request).await
    }

    async fn close_trade(&self, trade_id: &str) -> Result<shared::Trade> {
        super::trading::close_trade(self, trade_id).await
    }

    async fn get_live_price(&self, symbol: &str) -> Result<shared::LivePrice> {
        super::trading::get_live_price(self, symbol).await
    }

    async fn get_wallet(&self) -> Result<shared::Wallet> {
        super::wallet::get_wallet(self).await
    }

    async fn deposit(&self, request: shared::TransferRequest) -> Result<shared::Wallet> {
        super::wallet::deposit(self, request).await
    }

    async fn withdraw(&self, request: shared::TransferRequest) -> Result<shared::Wallet> {
        super::wallet::withdraw(self, request).await
    }

    async fn get_wallet_transactions(&self) -> Result<Vec<shared::WalletTransaction>> {
        super::wallet::get_transactions(self).await
    }

    async fn get_notifications(&self, page: u32, limit: u32) -> Result<shared::NotificationPage> {
        super::notifications::get_notifications(self, page, limit).await
    }

    async fn mark_notification_read(&self, id: &str) -> Result<()> {
        super::notifications::mark_as_read(self, id).await
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        super::notifications::mark_all_as_read(self).await
    }

    async fn delete_notification(&self, id: &str) -> Result<()> {
        super::notifications::delete_notification(self, id).await
    }

    async fn get_notification_settings(&self) -> Result<shared::NotificationSettings> {
        super::notifications::get_settings(self).await
    }

    async fn update_notification_settings(
        &self,
        settings: shared::NotificationSettings,
    ) -> Result<shared::NotificationSettings> {
        super::notifications::update_settings(self, settings).await
    }

    async fn get_price_alerts(&self) -> Result<Vec<shared::PriceAlert>> {
        super::notifications::get_price_alerts(self).await
    }

    async fn create_price_alert(
        &self,
        request: shared::CreatePriceAlertRequest,
    ) -> Result<shared::PriceAlert> {
        super::notifications::create_price_alert(self, request).await
    }

    async fn delete_price_alert(&self, id: &str) -> Result<()> {
        super::notifications::delete_price_alert(self, id).await
    }

    async fn toggle_price_alert(&self, id: &str, active: bool) -> Result<shared::PriceAlert> {
        super::notifications::toggle_price_alert(self, id, active).await
    }

    async fn get_profile(&self) -> Result<shared::UserProfile> {
        super::profile::get_profile(self).await
    }

    async fn update_profile(&self, update: shared::ProfileUpdate) -> Result<shared::UserProfile> {
        super::profile::update_profile(self, update).await
    }

    async fn upload_avatar(&self, file_name: String, bytes: Vec<u8>) -> Result<shared::AvatarResponse> {
        super::profile::upload_avatar(self, file_name, bytes).await
    }

    async fn get_profile_settings(&self) -> Result<shared::ProfileSettings> {
        super::profile::get_settings(self).await
    }

    async fn update_profile_settings(
        &self,
        settings: shared::ProfileSettings,
    ) -> Result<shared::ProfileSettings> {
        super::profile::update_settings(self, settings).await
    }

    async fn change_password(&self, request: shared::ChangePasswordRequest) -> Result<()> {
        super::profile::change_password(self, request).await
    }

    async fn delete_account(&self) -> Result<()> {
        super::profile::delete_account(self).await
    }

    async fn enable_two_factor(&self) -> Result<shared::TwoFactorSetup> {
        super::profile::enable_two_factor(self).await
    }

    async fn verify_two_factor(&self, token: String) -> Result<()> {
        super::profile::verify_two_factor(self, token).await
    }

    async fn disable_two_factor(&self, token: String) -> Result<()> {
        super::profile::disable_two_factor(self, token).await
    }
}
