//! # Service Traits
//!
//! The backend contract as a trait, so handlers can run against the real
//! HTTP client or a test double.

use async_trait::async_trait;
use shared::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use shared::dto::notifications::{
    CreatePriceAlertRequest, NotificationPage, NotificationSettings, PriceAlert,
};
use shared::dto::profile::{
    AvatarResponse, ChangePasswordRequest, ProfileSettings, ProfileUpdate, TwoFactorSetup,
    UserProfile,
};
use shared::dto::trading::{LivePrice, PlaceTradeRequest, Trade};
use shared::dto::wallet::{TransferRequest, Wallet, WalletTransaction};

use super::error::Result;

/// Every backend operation the client performs.
///
/// Implementations attach the current bearer token themselves; callers only
/// manage it through [`ApiService::set_token`].
#[async_trait]
pub trait ApiService: Send + Sync {
    /// Replace (or clear) the bearer token sent with every request.
    fn set_token(&self, token: Option<String>);

    /// Currently configured bearer token.
    fn token(&self) -> Option<String>;

    // Auth
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse>;
    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse>;

    // Trading
    async fn get_user_trades(&self) -> Result<Vec<Trade>>;
    async fn place_trade(&self, request: PlaceTradeRequest) -> Result<Trade>;
    async fn close_trade(&self, trade_id: &str) -> Result<Trade>;
    async fn get_live_price(&self, symbol: &str) -> Result<LivePrice>;

    // Wallet
    async fn get_wallet(&self) -> Result<Wallet>;
    async fn deposit(&self, request: TransferRequest) -> Result<Wallet>;
    async fn withdraw(&self, request: TransferRequest) -> Result<Wallet>;
    async fn get_wallet_transactions(&self) -> Result<Vec<WalletTransaction>>;

    // Notifications
    async fn get_notifications(&self, page: u32, limit: u32) -> Result<NotificationPage>;
    async fn mark_notification_read(&self, id: &str) -> Result<()>;
    async fn mark_all_notifications_read(&self) -> Result<()>;
    async fn delete_notification(&self, id: &str) -> Result<()>;
    async fn get_notification_settings(&self) -> Result<NotificationSettings>;
    async fn update_notification_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings>;
    async fn get_price_alerts(&self) -> Result<Vec<PriceAlert>>;
    async fn create_price_alert(&self, request: CreatePriceAlertRequest) -> Result<PriceAlert>;
    async fn delete_price_alert(&self, id: &str) -> Result<()>;
    async fn toggle_price_alert(&self, id: &str, active: bool) -> Result<PriceAlert>;

    // Profile
    async fn get_profile(&self) -> Result<UserProfile>;
    async fn update_profile(&self, update: ProfileUpdate) -> Result<UserProfile>;
    async fn upload_avatar(&self, file_name: String, bytes: Vec<u8>) -> Result<AvatarResponse>;
    async fn get_profile_settings(&self) -> Result<ProfileSettings>;
    async fn update_profile_settings(&self, settings: ProfileSettings) -> Result<ProfileSettings>;
    async fn change_password(&self, request: ChangePasswordRequest) -> Result<()>;
    async fn delete_account(&self) -> Result<()>;
    async fn enable_two_factor(&self) -> Result<TwoFactorSetup>;
    async fn verify_two_factor(&self, token: String) -> Result<()>;
    async fn disable_two_factor(&self, token: String) -> Result<()>;
}
