//! # Application State Types
//!
//! Everything the UI reads each frame: the current screen, the [`Store`]
//! slices, and screen-local state (form buffers, live price, notification
//! center, profile editor, docs selection).
//!
//! The whole struct is cheap enough to clone once per frame, which is how the
//! renderer takes a consistent snapshot without holding the lock.

use std::time::Instant;

use shared::{
    AlertCondition, LivePrice, Notification, NotificationSettings, PriceAlert, ProfileSettings,
    TradeSide, TransferKind, TwoFactorSetup, UserProfile, WalletTransaction, POPULAR_SYMBOLS,
};

use crate::app::store::Store;
use crate::services::api::PriceFeedStatus;
use crate::services::docs::DocLevel;

/// Points kept for the live price chart.
pub const MAX_PRICE_HISTORY: usize = 120;

/// Notifications requested per page.
pub const NOTIFICATIONS_PAGE_SIZE: u32 = 20;

/// Application screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Login,
    Register,
    /// Wallet summary, stats, trade form and live price
    Dashboard,
    /// Trade history with close actions
    Trades,
    Wallet,
    Notifications,
    Profile,
    /// Trading guides, readable without an account
    Docs,
}

impl Screen {
    /// Screens in navigation bar order
    pub fn all() -> &'static [Screen] {
        &[
            Screen::Dashboard,
            Screen::Trades,
            Screen::Wallet,
            Screen::Notifications,
            Screen::Profile,
            Screen::Docs,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Login => "Sign In",
            Screen::Register => "Create Account",
            Screen::Dashboard => "Dashboard",
            Screen::Trades => "Trades",
            Screen::Wallet => "Wallet",
            Screen::Notifications => "Notifications",
            Screen::Profile => "Profile",
            Screen::Docs => "Learn",
        }
    }

    pub fn requires_auth(&self) -> bool {
        !matches!(self, Screen::Login | Screen::Register | Screen::Docs)
    }

    /// Screens that drive the live price and trade refresh timers.
    pub fn is_live(&self) -> bool {
        matches!(self, Screen::Dashboard | Screen::Trades)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient message queued by event handling, shown by the UI layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_no: String,
    pub address: String,
    /// Inline validation message
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TradeForm {
    pub symbol: String,
    pub quantity: String,
    pub side: TradeSide,
    pub submitting: bool,
}

impl Default for TradeForm {
    fn default() -> Self {
        Self {
            symbol: POPULAR_SYMBOLS[0].to_string(),
            quantity: String::new(),
            side: TradeSide::Buy,
            submitting: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Unix seconds
    pub time: f64,
    pub price: f64,
}

/// Live price of the selected symbol, fed by the push stream and the REST poll.
#[derive(Debug, Clone, PartialEq)]
pub struct LivePriceState {
    pub symbol: String,
    pub current: Option<LivePrice>,
    /// Previous price, for the up/down indicator
    pub previous: Option<f64>,
    pub history: Vec<PricePoint>,
    pub feed_status: PriceFeedStatus,
    pub loading: bool,
    pub error: Option<String>,
    pub last_update: Option<Instant>,
}

impl Default for LivePriceState {
    fn default() -> Self {
        Self {
            symbol: POPULAR_SYMBOLS[0].to_string(),
            current: None,
            previous: None,
            history: Vec::new(),
            feed_status: PriceFeedStatus::default(),
            loading: false,
            error: None,
            last_update: None,
        }
    }
}

impl LivePriceState {
    /// Record a price for the selected symbol. Prices for other symbols are dropped.
    pub fn record(&mut self, price: LivePrice, time: f64) -> bool {
        if price.symbol != self.symbol {
            return false;
        }
        self.previous = self.current.as_ref().map(|p| p.price);
        self.history.push(PricePoint { time, price: price.price });
        if self.history.len() > MAX_PRICE_HISTORY {
            let excess = self.history.len() - MAX_PRICE_HISTORY;
            self.history.drain(..excess);
        }
        self.current = Some(price);
        self.error = None;
        self.last_update = Some(Instant::now());
        true
    }

    /// Switch symbol and forget the old series.
    ///
    /// `loading` tracks the REST poll in flight and survives the switch; only
    /// the poll result clears it.
    pub fn select(&mut self, symbol: String) {
        if symbol != self.symbol {
            *self = LivePriceState {
                symbol,
                feed_status: self.feed_status,
                loading: self.loading,
                ..LivePriceState::default()
            };
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletScreenState {
    /// Deposit/withdraw amount buffer
    pub amount: String,
    pub transactions: Vec<WalletTransaction>,
    pub transactions_loading: bool,
    /// Transfer in flight
    pub pending_transfer: Option<TransferKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationTab {
    #[default]
    Inbox,
    Alerts,
    Settings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertForm {
    pub symbol: String,
    pub condition: AlertCondition,
    pub target_price: String,
}

impl Default for AlertForm {
    fn default() -> Self {
        Self {
            symbol: POPULAR_SYMBOLS[0].to_string(),
            condition: AlertCondition::Above,
            target_price: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsState {
    pub tab: NotificationTab,
    pub items: Vec<Notification>,
    pub total: u64,
    pub page: u32,
    pub unread_only: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub settings: Option<NotificationSettings>,
    pub alerts: Vec<PriceAlert>,
    pub alerts_loading: bool,
    pub alert_form: AlertForm,
}

impl NotificationsState {
    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn visible(&self) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| !self.unread_only || !n.read)
            .collect()
    }

    pub fn has_more(&self) -> bool {
        (self.items.len() as u64) < self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProfileTab {
    #[default]
    Details,
    Preferences,
    Security,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub full_name: String,
    pub email: String,
    pub phone_no: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordForm {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileState {
    pub tab: ProfileTab,
    pub profile: Option<UserProfile>,
    pub form: ProfileForm,
    pub settings: Option<ProfileSettings>,
    pub password_form: PasswordForm,
    /// Pending 2FA enrollment (QR payload and secret)
    pub two_factor_setup: Option<TwoFactorSetup>,
    pub two_factor_enabled: bool,
    pub two_factor_token: String,
    /// Typed confirmation for account deletion
    pub delete_confirmation: String,
    pub loading: bool,
    pub saving: bool,
}

impl ProfileState {
    /// Fill the edit form from the loaded profile.
    pub fn reset_form(&mut self) {
        if let Some(profile) = &self.profile {
            self.form = ProfileForm {
                full_name: profile.user.full_name.clone(),
                email: profile.user.email.clone(),
                phone_no: profile.user.phone_no.clone(),
                address: profile.user.address.clone(),
            };
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocsState {
    pub selected_slug: Option<String>,
    pub level_filter: Option<DocLevel>,
    pub search: String,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub store: Store,
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub trade_form: TradeForm,
    pub live_price: LivePriceState,
    pub wallet_screen: WalletScreenState,
    pub notifications: NotificationsState,
    pub profile: ProfileState,
    pub docs: DocsState,
    /// Toasts waiting for the UI to display them
    pub pending_toasts: Vec<Toast>,
    pub last_price_poll: Option<Instant>,
    pub last_trades_poll: Option<Instant>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Login,
            store: Store::default(),
            login_form: LoginForm::default(),
            register_form: RegisterForm::default(),
            trade_form: TradeForm::default(),
            live_price: LivePriceState::default(),
            wallet_screen: WalletScreenState::default(),
            notifications: NotificationsState::default(),
            profile: ProfileState::default(),
            docs: DocsState::default(),
            pending_toasts: Vec::new(),
            last_price_poll: None,
            last_trades_poll: None,
        }
    }
}

impl AppState {
    pub fn is_authenticated(&self) -> bool {
        self.store.is_authenticated()
    }

    pub fn toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.pending_toasts.push(Toast {
            level,
            message: message.into(),
        });
    }

    pub fn take_toasts(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending_toasts)
    }

    /// Drop everything tied to the signed-in user.
    pub fn clear_session(&mut self) {
        self.store.reset();
        self.trade_form = TradeForm::default();
        self.wallet_screen = WalletScreenState::default();
        self.notifications = NotificationsState::default();
        self.profile = ProfileState::default();
        self.live_price = LivePriceState::default();
        self.last_price_poll = None;
        self.last_trades_poll = None;
    }
}
