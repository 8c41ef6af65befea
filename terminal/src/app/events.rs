//! # Application Events
//!
//! Results of async tasks, sent back to the UI thread over the event channel.
//! Every network result carries `crate::core::Result` so a 401 reaches the
//! event handler as [`AppError::Unauthorized`](crate::core::AppError).

use shared::{
    AuthResponse, AvatarResponse, LivePrice, NotificationPage, NotificationSettings, PriceAlert,
    ProfileSettings, Trade, TransferKind, TwoFactorSetup, UserProfile, Wallet, WalletTransaction,
};

use crate::core::Result;
use crate::services::api::PriceFeedStatus;

/// Local-first notification mutation that was sent to the server.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOp {
    MarkRead(String),
    MarkAllRead,
    Delete(String),
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    LoginResult(Result<AuthResponse>),
    /// Registration finished; carries the session to start, which may come
    /// from the follow-up login
    RegisterResult(Result<AuthResponse>),

    TradesLoaded(Result<Vec<Trade>>),
    TradePlaced(Result<Trade>),
    TradeClosed { trade_id: String, result: Result<Trade> },
    /// Balance re-read after a trade settled
    BalanceRefreshed(Result<Wallet>),

    /// REST poll result for the selected symbol
    LivePriceResult(Result<LivePrice>),
    /// Push stream tick
    PriceTick(LivePrice),
    PriceFeedStatus(PriceFeedStatus),

    WalletLoaded(Result<Wallet>),
    TransferCompleted { kind: TransferKind, result: Result<Wallet> },
    WalletTransactionsLoaded(Result<Vec<WalletTransaction>>),

    NotificationsLoaded { page: u32, result: Result<NotificationPage> },
    NotificationSynced { op: NotificationOp, result: Result<()> },
    NotificationSettingsLoaded(Result<NotificationSettings>),
    NotificationSettingsSaved(Result<NotificationSettings>),
    PriceAlertsLoaded(Result<Vec<PriceAlert>>),
    PriceAlertCreated(Result<PriceAlert>),
    PriceAlertToggled { id: String, result: Result<PriceAlert> },
    PriceAlertDeleted { id: String, result: Result<()> },

    ProfileLoaded(Result<UserProfile>),
    ProfileUpdated(Result<UserProfile>),
    AvatarUploaded(Result<AvatarResponse>),
    ProfileSettingsLoaded(Result<ProfileSettings>),
    ProfileSettingsSaved(Result<ProfileSettings>),
    PasswordChanged(Result<()>),
    TwoFactorSetupReady(Result<TwoFactorSetup>),
    TwoFactorVerified(Result<()>),
    TwoFactorDisabled(Result<()>),
    AccountDeleted(Result<()>),

    /// Local validation or I/O failure from a task (e.g. avatar file read)
    TaskFailed(String),
}

impl AppEvent {
    /// Results that belong to a signed-in user and are meaningless after logout.
    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            AppEvent::LoginResult(_)
                | AppEvent::RegisterResult(_)
                | AppEvent::PriceFeedStatus(_)
                | AppEvent::TaskFailed(_)
        )
    }

    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            AppEvent::LoginResult(_) => "LoginResult",
            AppEvent::RegisterResult(_) => "RegisterResult",
            AppEvent::TradesLoaded(_) => "TradesLoaded",
            AppEvent::TradePlaced(_) => "TradePlaced",
            AppEvent::TradeClosed { .. } => "TradeClosed",
            AppEvent::BalanceRefreshed(_) => "BalanceRefreshed",
            AppEvent::LivePriceResult(_) => "LivePriceResult",
            AppEvent::PriceTick(_) => "PriceTick",
            AppEvent::PriceFeedStatus(_) => "PriceFeedStatus",
            AppEvent::WalletLoaded(_) => "WalletLoaded",
            AppEvent::TransferCompleted { .. } => "TransferCompleted",
            AppEvent::WalletTransactionsLoaded(_) => "WalletTransactionsLoaded",
            AppEvent::NotificationsLoaded { .. } => "NotificationsLoaded",
            AppEvent::NotificationSynced { .. } => "NotificationSynced",
            AppEvent::NotificationSettingsLoaded(_) => "NotificationSettingsLoaded",
            AppEvent::NotificationSettingsSaved(_) => "NotificationSettingsSaved",
            AppEvent::PriceAlertsLoaded(_) => "PriceAlertsLoaded",
            AppEvent::PriceAlertCreated(_) => "PriceAlertCreated",
            AppEvent::PriceAlertToggled { .. } => "PriceAlertToggled",
            AppEvent::PriceAlertDeleted { .. } => "PriceAlertDeleted",
            AppEvent::ProfileLoaded(_) => "ProfileLoaded",
            AppEvent::ProfileUpdated(_) => "ProfileUpdated",
            AppEvent::AvatarUploaded(_) => "AvatarUploaded",
            AppEvent::ProfileSettingsLoaded(_) => "ProfileSettingsLoaded",
            AppEvent::ProfileSettingsSaved(_) => "ProfileSettingsSaved",
            AppEvent::PasswordChanged(_) => "PasswordChanged",
            AppEvent::TwoFactorSetupReady(_) => "TwoFactorSetupReady",
            AppEvent::TwoFactorVerified(_) => "TwoFactorVerified",
            AppEvent::TwoFactorDisabled(_) => "TwoFactorDisabled",
            AppEvent::AccountDeleted(_) => "AccountDeleted",
            AppEvent::TaskFailed(_) => "TaskFailed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AppError;

    #[test]
    fn session_scoped_events() {
        assert!(AppEvent::TradesLoaded(Ok(Vec::new())).requires_session());
        assert!(AppEvent::WalletLoaded(Err(AppError::Unauthorized)).requires_session());
        assert!(!AppEvent::LoginResult(Err(AppError::Unauthorized)).requires_session());
        assert!(!AppEvent::PriceFeedStatus(PriceFeedStatus::Connecting).requires_session());
    }
}
