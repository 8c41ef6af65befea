//! # Event Handler
//!
//! Applies async task results to application state on the UI thread.
//!
//! Results that need a session are dropped while signed out. Every network
//! result is then checked for a 401, which forces a logout. Other failures become
//! a toast plus, where the slice tracks one, an error message; the data
//! already on screen is left untouched.

use shared::{
    format_currency, format_signed_currency, AuthResponse, AvatarResponse, LivePrice,
    NotificationPage, NotificationSettings, PriceAlert, ProfileSettings, Trade, TransferKind,
    TwoFactorSetup, UserProfile, Wallet, WalletTransaction,
};

use crate::app::events::NotificationOp;
use crate::app::state::ToastLevel;
use crate::app::store::{AuthAction, TradeAction, WalletAction};
use crate::app::{handlers, App, AppEvent};
use crate::core::{AppError, Result};
use crate::services::api::PriceFeedStatus;

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent) {
        tracing::debug!(event = event.name(), "Handling event");

        if event.requires_session() && !self.state.read().is_authenticated() {
            tracing::debug!(event = event.name(), "Dropping result received while signed out");
            return;
        }

        match event {
            AppEvent::LoginResult(result) => self.handle_login_result(result),
            AppEvent::RegisterResult(result) => self.handle_register_result(result),
            AppEvent::TradesLoaded(result) => self.handle_trades_loaded(result),
            AppEvent::TradePlaced(result) => self.handle_trade_placed(result),
            AppEvent::TradeClosed { trade_id, result } => self.handle_trade_closed(trade_id, result),
            AppEvent::BalanceRefreshed(result) => self.handle_balance_refreshed(result),
            AppEvent::LivePriceResult(result) => self.handle_live_price_result(result),
            AppEvent::PriceTick(price) => self.handle_price_tick(price),
            AppEvent::PriceFeedStatus(status) => self.handle_price_feed_status(status),
            AppEvent::WalletLoaded(result) => self.handle_wallet_loaded(result),
            AppEvent::TransferCompleted { kind, result } => self.handle_transfer_completed(kind, result),
            AppEvent::WalletTransactionsLoaded(result) => self.handle_transactions_loaded(result),
            AppEvent::NotificationsLoaded { page, result } => self.handle_notifications_loaded(page, result),
            AppEvent::NotificationSynced { op, result } => self.handle_notification_synced(op, result),
            AppEvent::NotificationSettingsLoaded(result) => self.handle_notification_settings(result, false),
            AppEvent::NotificationSettingsSaved(result) => self.handle_notification_settings(result, true),
            AppEvent::PriceAlertsLoaded(result) => self.handle_price_alerts_loaded(result),
            AppEvent::PriceAlertCreated(result) => self.handle_price_alert_created(result),
            AppEvent::PriceAlertToggled { id, result } => self.handle_price_alert_toggled(id, result),
            AppEvent::PriceAlertDeleted { id, result } => self.handle_price_alert_deleted(id, result),
            AppEvent::ProfileLoaded(result) => self.handle_profile_result(result, false),
            AppEvent::ProfileUpdated(result) => self.handle_profile_result(result, true),
            AppEvent::AvatarUploaded(result) => self.handle_avatar_uploaded(result),
            AppEvent::ProfileSettingsLoaded(result) => self.handle_profile_settings(result, false),
            AppEvent::ProfileSettingsSaved(result) => self.handle_profile_settings(result, true),
            AppEvent::PasswordChanged(result) => self.handle_password_changed(result),
            AppEvent::TwoFactorSetupReady(result) => self.handle_two_factor_setup(result),
            AppEvent::TwoFactorVerified(result) => self.handle_two_factor_changed(result, true),
            AppEvent::TwoFactorDisabled(result) => self.handle_two_factor_changed(result, false),
            AppEvent::AccountDeleted(result) => self.handle_account_deleted(result),
            AppEvent::TaskFailed(message) => {
                let mut state = self.state.write();
                state.profile.saving = false;
                state.toast(ToastLevel::Error, message);
            }
        }
    }
}

impl App {
    /// `true` when `result` is a 401. Signed-in sessions are ended.
    fn session_expired<T>(&mut self, result: &Result<T>) -> bool {
        match result {
            Err(e) if e.is_unauthorized() => {
                if self.state.read().is_authenticated() {
                    self.force_logout();
                } else {
                    tracing::debug!("Dropping unauthorized result received while signed out");
                }
                true
            }
            _ => false,
        }
    }

    fn report_error(&self, context: &str, error: &AppError) {
        tracing::error!(context, error = %error, "Request failed");
        self.state
            .write()
            .toast(ToastLevel::Error, format!("{}: {}", context, error));
    }

    fn toast(&self, level: ToastLevel, message: impl Into<String>) {
        self.state.write().toast(level, message);
    }

    fn begin_session(&mut self, response: AuthResponse, greeting: String) -> std::result::Result<(), String> {
        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| "Login response did not include an access token".to_string())?;
        tracing::info!(user_id = %response.user.id, "Authenticated");
        self.start_session(token, response.user);
        self.toast(ToastLevel::Success, greeting);
        Ok(())
    }

    fn handle_login_result(&mut self, result: Result<AuthResponse>) {
        tracing::info!(event = "LoginResult", success = result.is_ok(), "Processing login result");

        let failure = match result {
            Ok(response) => {
                let greeting = format!("Welcome back, {}!", response.user.display_name());
                self.begin_session(response, greeting).err()
            }
            Err(AppError::Unauthorized) => Some("Invalid email or password".to_string()),
            Err(e) => Some(e.to_string()),
        };

        if let Some(message) = failure {
            let mut state = self.state.write();
            state.store.dispatch_auth(AuthAction::LoginFailure(message.clone()));
            state.toast(ToastLevel::Error, format!("Login failed: {}", message));
        }
    }

    fn handle_register_result(&mut self, result: Result<AuthResponse>) {
        tracing::info!(event = "RegisterResult", success = result.is_ok(), "Processing register result");

        let failure = match result {
            Ok(response) => self
                .begin_session(
                    response,
                    "Account created! Welcome to PaperTrade.".to_string(),
                )
                .err(),
            Err(e) => Some(e.to_string()),
        };

        if let Some(message) = failure {
            let mut state = self.state.write();
            state.store.dispatch_auth(AuthAction::SetLoading(false));
            state.register_form.error = Some(message.clone());
            state.toast(ToastLevel::Error, format!("Registration failed: {}", message));
        }
    }

    fn handle_trades_loaded(&mut self, result: Result<Vec<Trade>>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(trades) => self.state.write().store.dispatch_trades(TradeAction::SetTrades(trades)),
            Err(e) => {
                self.state
                    .write()
                    .store
                    .dispatch_trades(TradeAction::TradeFailure(e.to_string()));
                self.report_error("Failed to load trades", &e);
            }
        }
    }

    fn handle_trade_placed(&mut self, result: Result<Trade>) {
        self.state.write().trade_form.submitting = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(trade) => {
                tracing::info!(trade_id = %trade.id, symbol = %trade.symbol, "Trade placed");
                {
                    let mut state = self.state.write();
                    state.toast(
                        ToastLevel::Success,
                        format!(
                            "Trade placed: {} {} {}",
                            trade.side.as_str().to_uppercase(),
                            trade.quantity,
                            trade.symbol
                        ),
                    );
                    state.trade_form.quantity.clear();
                    state.store.dispatch_trades(TradeAction::AddTrade(trade));
                }
                handlers::trading::refresh_balance(self.api.clone(), self.event_tx.clone());
            }
            Err(e) => {
                self.state
                    .write()
                    .store
                    .dispatch_trades(TradeAction::TradeFailure(e.to_string()));
                self.report_error("Trade failed", &e);
            }
        }
    }

    fn handle_trade_closed(&mut self, trade_id: String, result: Result<Trade>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(trade) => {
                tracing::info!(trade_id = %trade_id, pnl = ?trade.pnl, "Trade closed");
                {
                    let mut state = self.state.write();
                    let message = match trade.pnl {
                        Some(pnl) => format!("Trade closed. P&L {}", format_signed_currency(pnl)),
                        None => "Trade closed".to_string(),
                    };
                    state.toast(ToastLevel::Success, message);
                    state.store.dispatch_trades(TradeAction::UpdateTrade(trade));
                }
                handlers::trading::refresh_balance(self.api.clone(), self.event_tx.clone());
            }
            Err(e) => {
                self.state
                    .write()
                    .store
                    .dispatch_trades(TradeAction::TradeFailure(e.to_string()));
                self.report_error("Failed to close trade", &e);
            }
        }
    }

    fn handle_balance_refreshed(&mut self, result: Result<Wallet>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(wallet) => {
                let mut state = self.state.write();
                if state.store.wallet.wallet.is_some() {
                    state.store.dispatch_wallet(WalletAction::UpdateBalance(wallet.balance));
                } else {
                    state.store.dispatch_wallet(WalletAction::FetchSuccess(wallet));
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Balance refresh failed");
                self.toast(ToastLevel::Warning, "Could not refresh wallet balance");
            }
        }
    }

    fn handle_live_price_result(&mut self, result: Result<LivePrice>) {
        self.state.write().live_price.loading = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(price) => self.handle_price_tick(price),
            Err(e) => {
                // Polled every few seconds: keep the last price, no toast.
                tracing::warn!(error = %e, "Live price poll failed");
                self.state.write().live_price.error = Some(e.to_string());
            }
        }
    }

    fn handle_price_tick(&mut self, price: LivePrice) {
        let now = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        let mut state = self.state.write();
        if !state.live_price.record(price, now) {
            tracing::trace!("Ignoring price for unselected symbol");
        }
    }

    fn handle_price_feed_status(&mut self, status: PriceFeedStatus) {
        let mut state = self.state.write();
        let previous = state.live_price.feed_status;
        state.live_price.feed_status = status;
        if previous != status {
            tracing::info!(from = ?previous, to = ?status, "Price feed status changed");
            if status == PriceFeedStatus::Disabled {
                state.toast(ToastLevel::Warning, "Live price feed unavailable, falling back to polling");
            }
        }
    }

    fn handle_wallet_loaded(&mut self, result: Result<Wallet>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(wallet) => self.state.write().store.dispatch_wallet(WalletAction::FetchSuccess(wallet)),
            Err(e) => {
                self.state
                    .write()
                    .store
                    .dispatch_wallet(WalletAction::FetchFailure(e.to_string()));
                self.report_error("Failed to load wallet", &e);
            }
        }
    }

    fn handle_transfer_completed(&mut self, kind: TransferKind, result: Result<Wallet>) {
        self.state.write().wallet_screen.pending_transfer = None;
        if self.session_expired(&result) {
            return;
        }
        let label = match kind {
            TransferKind::Deposit => "Deposit",
            TransferKind::Withdraw => "Withdrawal",
        };
        match result {
            Ok(wallet) => {
                {
                    let mut state = self.state.write();
                    state.toast(
                        ToastLevel::Success,
                        format!("{} successful. New balance {}", label, format_currency(wallet.balance)),
                    );
                    state.wallet_screen.amount.clear();
                    state.store.dispatch_wallet(WalletAction::FetchSuccess(wallet));
                }
                self.fetch_transactions();
            }
            Err(e) => self.report_error(&format!("{} failed", label), &e),
        }
    }

    fn handle_transactions_loaded(&mut self, result: Result<Vec<WalletTransaction>>) {
        self.state.write().wallet_screen.transactions_loading = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(mut transactions) => {
                transactions.sort_by(|a, b| b.date.cmp(&a.date));
                self.state.write().wallet_screen.transactions = transactions;
            }
            Err(e) => self.report_error("Failed to load transactions", &e),
        }
    }

    fn handle_notifications_loaded(&mut self, page: u32, result: Result<NotificationPage>) {
        self.state.write().notifications.loading = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(loaded) => {
                let mut state = self.state.write();
                let center = &mut state.notifications;
                if page <= 1 {
                    center.items = loaded.notifications;
                } else {
                    for notification in loaded.notifications {
                        if !center.items.iter().any(|n| n.id == notification.id) {
                            center.items.push(notification);
                        }
                    }
                }
                center.total = loaded.total;
                center.page = page;
                center.error = None;
            }
            Err(e) => {
                self.state.write().notifications.error = Some(e.to_string());
                self.report_error("Failed to load notifications", &e);
            }
        }
    }

    fn handle_notification_synced(&mut self, op: NotificationOp, result: Result<()>) {
        if self.session_expired(&result) {
            return;
        }
        if let Err(e) = result {
            tracing::warn!(op = ?op, error = %e, "Notification update rejected, reloading");
            self.report_error("Failed to update notifications", &e);
            self.load_notifications(1);
        }
    }

    fn handle_notification_settings(&mut self, result: Result<NotificationSettings>, saved: bool) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(settings) => {
                let mut state = self.state.write();
                state.notifications.settings = Some(settings);
                if saved {
                    state.toast(ToastLevel::Success, "Notification settings saved");
                }
            }
            Err(e) => self.report_error("Failed to sync notification settings", &e),
        }
    }

    fn handle_price_alerts_loaded(&mut self, result: Result<Vec<PriceAlert>>) {
        self.state.write().notifications.alerts_loading = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(alerts) => self.state.write().notifications.alerts = alerts,
            Err(e) => self.report_error("Failed to load price alerts", &e),
        }
    }

    fn handle_price_alert_created(&mut self, result: Result<PriceAlert>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(alert) => {
                let mut state = self.state.write();
                state.toast(
                    ToastLevel::Success,
                    format!(
                        "Alert set: {} {} {}",
                        alert.symbol,
                        alert.condition.as_str(),
                        format_currency(alert.target_price)
                    ),
                );
                state.notifications.alert_form.target_price.clear();
                state.notifications.alerts.push(alert);
            }
            Err(e) => self.report_error("Failed to create price alert", &e),
        }
    }

    fn handle_price_alert_toggled(&mut self, id: String, result: Result<PriceAlert>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(updated) => {
                let mut state = self.state.write();
                if let Some(alert) = state.notifications.alerts.iter_mut().find(|a| a.id == id) {
                    *alert = updated;
                }
            }
            Err(e) => {
                {
                    let mut state = self.state.write();
                    if let Some(alert) = state.notifications.alerts.iter_mut().find(|a| a.id == id) {
                        alert.active = !alert.active;
                    }
                }
                self.report_error("Failed to update price alert", &e);
            }
        }
    }

    fn handle_price_alert_deleted(&mut self, id: String, result: Result<()>) {
        if self.session_expired(&result) {
            return;
        }
        if let Err(e) = result {
            tracing::warn!(alert_id = %id, "Price alert delete rejected, reloading");
            self.report_error("Failed to delete price alert", &e);
            self.load_price_alerts();
        }
    }

    fn handle_profile_result(&mut self, result: Result<UserProfile>, saved: bool) {
        {
            let mut state = self.state.write();
            state.profile.loading = false;
            state.profile.saving = false;
        }
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(profile) => {
                if let Err(e) = self.session.update_user(&profile.user) {
                    tracing::warn!(error = %e, "Failed to update stored user");
                }
                let mut state = self.state.write();
                state.store.dispatch_auth(AuthAction::UpdateUser(profile.user.clone()));
                state.profile.profile = Some(profile);
                state.profile.reset_form();
                if saved {
                    state.toast(ToastLevel::Success, "Profile updated");
                }
            }
            Err(e) if saved => self.report_error("Failed to update profile", &e),
            Err(e) => self.report_error("Failed to load profile", &e),
        }
    }

    fn handle_avatar_uploaded(&mut self, result: Result<AvatarResponse>) {
        self.state.write().profile.saving = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(response) => {
                let mut state = self.state.write();
                if let Some(profile) = state.profile.profile.as_mut() {
                    profile.avatar = Some(response.avatar);
                }
                state.toast(ToastLevel::Success, "Profile picture updated");
            }
            Err(e) => self.report_error("Failed to upload picture", &e),
        }
    }

    fn handle_profile_settings(&mut self, result: Result<ProfileSettings>, saved: bool) {
        self.state.write().profile.saving = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(settings) => {
                let mut state = self.state.write();
                state.profile.settings = Some(settings);
                if saved {
                    state.toast(ToastLevel::Success, "Preferences saved");
                }
            }
            Err(e) => self.report_error("Failed to sync preferences", &e),
        }
    }

    fn handle_password_changed(&mut self, result: Result<()>) {
        self.state.write().profile.saving = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(()) => {
                let mut state = self.state.write();
                state.profile.password_form = Default::default();
                state.toast(ToastLevel::Success, "Your password has been successfully updated.");
            }
            Err(e) => self.report_error("Failed to change password", &e),
        }
    }

    fn handle_two_factor_setup(&mut self, result: Result<TwoFactorSetup>) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(setup) => {
                let mut state = self.state.write();
                state.profile.two_factor_setup = Some(setup);
                state.toast(ToastLevel::Info, "Scan the code, then enter the 6-digit token to finish");
            }
            Err(e) => self.report_error("Failed to start two-factor setup", &e),
        }
    }

    fn handle_two_factor_changed(&mut self, result: Result<()>, enabled: bool) {
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(()) => {
                let mut state = self.state.write();
                state.profile.two_factor_enabled = enabled;
                state.profile.two_factor_setup = None;
                state.profile.two_factor_token.clear();
                let message = if enabled {
                    "Two-factor authentication enabled"
                } else {
                    "Two-factor authentication disabled"
                };
                state.toast(ToastLevel::Success, message);
            }
            Err(e) => self.report_error("Two-factor update failed", &e),
        }
    }

    fn handle_account_deleted(&mut self, result: Result<()>) {
        self.state.write().profile.saving = false;
        if self.session_expired(&result) {
            return;
        }
        match result {
            Ok(()) => {
                tracing::warn!("Account deleted");
                self.end_session();
                self.toast(ToastLevel::Info, "Your account has been permanently deleted.");
            }
            Err(e) => self.report_error("Failed to delete account", &e),
        }
    }
}
