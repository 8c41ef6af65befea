//! Drives `App` against an in-memory `ApiService` and checks the event loop
//! outcomes the screens rely on.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use papertrade::app::{App, AppEvent, Screen, ToastLevel};
use papertrade::config::ClientConfig;
use papertrade::core::service::ApiService;
use papertrade::core::{AppError, Result};
use papertrade::services::session::SessionStore;
use shared::*;

#[derive(Default)]
struct MockApi {
    token: Mutex<Option<String>>,
    reject_trades: bool,
    balance: Mutex<f64>,
    trades: Mutex<Vec<Trade>>,
    /// Token returned by `register`; `None` makes the client log in afterwards.
    register_token: Option<String>,
    /// Notification and alert mutations are rejected.
    reject_syncs: bool,
    notifications: Mutex<Vec<Notification>>,
    alerts: Mutex<Vec<PriceAlert>>,
    login_calls: AtomicUsize,
    wallet_calls: AtomicUsize,
    transfer_calls: AtomicUsize,
}

impl MockApi {
    fn with_balance(balance: f64) -> Self {
        Self {
            balance: Mutex::new(balance),
            ..Default::default()
        }
    }

    fn wallet(&self) -> Wallet {
        Wallet {
            balance: *self.balance.lock(),
            currency: "USD".to_string(),
            last_updated: "2024-06-04T10:00:00Z".to_string(),
        }
    }
}

fn unsupported<T>() -> Result<T> {
    Err(AppError::Api("not available in tests".to_string()))
}

fn rejected<T>() -> Result<T> {
    Err(AppError::Api("Service unavailable".to_string()))
}

fn trade(id: &str, quantity: f64) -> Trade {
    Trade {
        id: id.to_string(),
        symbol: "BTCUSDT".to_string(),
        side: TradeSide::Buy,
        quantity,
        price: 100.0,
        status: TradeStatus::Open,
        pnl: None,
        created_at: "2024-06-04T10:00:00Z".to_string(),
        closed_at: None,
    }
}

fn notification(id: &str) -> Notification {
    Notification {
        id: id.to_string(),
        kind: NotificationKind::Trade,
        title: "Trade executed".to_string(),
        message: "Bought 1 BTCUSDT".to_string(),
        read: false,
        created_at: "2024-06-04T10:00:00Z".to_string(),
        data: None,
    }
}

fn alert(id: &str) -> PriceAlert {
    PriceAlert {
        id: id.to_string(),
        symbol: "BTCUSDT".to_string(),
        condition: AlertCondition::Above,
        target_price: 50_000.0,
        current_price: 45_000.0,
        active: true,
        created_at: "2024-06-04T10:00:00Z".to_string(),
    }
}

fn user() -> User {
    User {
        id: "u1".to_string(),
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone_no: "555-0100".to_string(),
        address: "London".to_string(),
        balance: 10_000.0,
    }
}

#[async_trait]
impl ApiService for MockApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.lock() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }

    async fn login(&self, request: LoginRequest) -> Result<AuthResponse> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        if request.password != "correct-horse" {
            return Err(AppError::Unauthorized);
        }
        Ok(AuthResponse {
            access_token: Some("jwt-login".to_string()),
            user: user(),
        })
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse> {
        Ok(AuthResponse {
            access_token: self.register_token.clone(),
            user: User {
                full_name: request.full_name,
                email: request.email,
                ..user()
            },
        })
    }

    async fn get_user_trades(&self) -> Result<Vec<Trade>> {
        if self.reject_trades {
            return Err(AppError::Unauthorized);
        }
        Ok(self.trades.lock().clone())
    }

    async fn place_trade(&self, request: PlaceTradeRequest) -> Result<Trade> {
        let price = 100.0;
        let trade = Trade {
            id: format!("t{}", self.trades.lock().len() + 1),
            symbol: request.symbol,
            side: request.side,
            quantity: request.quantity,
            price,
            status: TradeStatus::Open,
            pnl: None,
            created_at: "2024-06-04T10:00:00Z".to_string(),
            closed_at: None,
        };
        *self.balance.lock() -= request.quantity * price;
        self.trades.lock().push(trade.clone());
        Ok(trade)
    }

    async fn close_trade(&self, trade_id: &str) -> Result<Trade> {
        let mut trades = self.trades.lock();
        let Some(trade) = trades.iter_mut().find(|t| t.id == trade_id) else {
            return Err(AppError::Api("Trade not found".to_string()));
        };
        let pnl = 40.0;
        trade.status = TradeStatus::Closed;
        trade.pnl = Some(pnl);
        trade.closed_at = Some("2024-06-04T11:00:00Z".to_string());
        *self.balance.lock() += trade.quantity * trade.price + pnl;
        Ok(trade.clone())
    }

    async fn get_live_price(&self, symbol: &str) -> Result<LivePrice> {
        Ok(LivePrice {
            symbol: symbol.to_string(),
            price: 100.0,
            change_24h: None,
        })
    }

    async fn get_wallet(&self) -> Result<Wallet> {
        self.wallet_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.wallet())
    }

    async fn deposit(&self, request: TransferRequest) -> Result<Wallet> {
        self.transfer_calls.fetch_add(1, Ordering::SeqCst);
        *self.balance.lock() += request.amount;
        Ok(self.wallet())
    }

    async fn withdraw(&self, request: TransferRequest) -> Result<Wallet> {
        self.transfer_calls.fetch_add(1, Ordering::SeqCst);
        *self.balance.lock() -= request.amount;
        Ok(self.wallet())
    }

    async fn get_wallet_transactions(&self) -> Result<Vec<WalletTransaction>> {
        Ok(Vec::new())
    }

    async fn get_notifications(&self, _page: u32, _limit: u32) -> Result<NotificationPage> {
        let notifications = self.notifications.lock().clone();
        Ok(NotificationPage {
            total: notifications.len() as u64,
            notifications,
        })
    }

    async fn mark_notification_read(&self, _id: &str) -> Result<()> {
        if self.reject_syncs {
            return rejected();
        }
        Ok(())
    }

    async fn mark_all_notifications_read(&self) -> Result<()> {
        Ok(())
    }

    async fn delete_notification(&self, _id: &str) -> Result<()> {
        Ok(())
    }

    async fn get_notification_settings(&self) -> Result<NotificationSettings> {
        unsupported()
    }

    async fn update_notification_settings(
        &self,
        settings: NotificationSettings,
    ) -> Result<NotificationSettings> {
        Ok(settings)
    }

    async fn get_price_alerts(&self) -> Result<Vec<PriceAlert>> {
        Ok(self.alerts.lock().clone())
    }

    async fn create_price_alert(&self, _request: CreatePriceAlertRequest) -> Result<PriceAlert> {
        unsupported()
    }

    async fn delete_price_alert(&self, _id: &str) -> Result<()> {
        if self.reject_syncs {
            return rejected();
        }
        Ok(())
    }

    async fn toggle_price_alert(&self, id: &str, active: bool) -> Result<PriceAlert> {
        if self.reject_syncs {
            return rejected();
        }
        Ok(PriceAlert {
            active,
            ..alert(id)
        })
    }

    async fn get_profile(&self) -> Result<UserProfile> {
        unsupported()
    }

    async fn update_profile(&self, _update: ProfileUpdate) -> Result<UserProfile> {
        unsupported()
    }

    async fn upload_avatar(&self, _file_name: String, _bytes: Vec<u8>) -> Result<AvatarResponse> {
        unsupported()
    }

    async fn get_profile_settings(&self) -> Result<ProfileSettings> {
        unsupported()
    }

    async fn update_profile_settings(&self, settings: ProfileSettings) -> Result<ProfileSettings> {
        Ok(settings)
    }

    async fn change_password(&self, _request: ChangePasswordRequest) -> Result<()> {
        Ok(())
    }

    async fn delete_account(&self) -> Result<()> {
        Ok(())
    }

    async fn enable_two_factor(&self) -> Result<TwoFactorSetup> {
        unsupported()
    }

    async fn verify_two_factor(&self, _token: String) -> Result<()> {
        Ok(())
    }

    async fn disable_two_factor(&self, _token: String) -> Result<()> {
        Ok(())
    }
}

fn session_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("papertrade-app-{}.json", uuid::Uuid::new_v4()))
}

fn test_config(session_file: &std::path::Path) -> ClientConfig {
    ClientConfig {
        api_url: "http://127.0.0.1:9/api".to_string(),
        // Nothing listens here: the push feed fails and falls back to polling.
        ws_url: Some("ws://127.0.0.1:9/ws".to_string()),
        session_file: session_file.to_path_buf(),
        ..ClientConfig::default()
    }
}

/// Tick the app until `done` holds or two seconds pass.
async fn tick_until(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
    for _ in 0..200 {
        app.on_tick();
        if done(app) {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test(flavor = "multi_thread")]
async fn stored_session_is_restored_on_start() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-stored", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(10_000.0));
    let app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    let state = app.state.read();
    assert!(state.is_authenticated());
    assert_eq!(state.screen, Screen::Dashboard);
    assert_eq!(api.token().as_deref(), Some("jwt-stored"));
    drop(state);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn unauthorized_response_forces_logout() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-stale", &user()).unwrap();

    let api = Arc::new(MockApi {
        reject_trades: true,
        ..MockApi::with_balance(10_000.0)
    });
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    // The first tick on the dashboard refreshes trades, which the backend rejects.
    let logged_out = tick_until(&mut app, |app| app.state.read().screen == Screen::Login).await;
    assert!(logged_out, "app never returned to the login screen");

    let mut state = app.state.write();
    assert!(!state.is_authenticated());
    assert!(state.store.trades.trades.is_empty());
    assert!(state.store.wallet.wallet.is_none());
    let toasts = state.take_toasts();
    assert!(toasts
        .iter()
        .any(|t| t.level == ToastLevel::Warning && t.message.contains("Session expired")));
    drop(state);

    assert!(api.token().is_none());
    assert!(SessionStore::new(&path).load().is_none());
    assert!(!app.is_price_stream_running());
}

#[tokio::test(flavor = "multi_thread")]
async fn placing_a_trade_adds_it_and_refreshes_balance() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(10_000.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    // Let the dashboard's initial trade refresh land first.
    let loaded = tick_until(&mut app, |app| {
        let state = app.state.read();
        state.last_trades_poll.is_some() && !state.store.trades.loading
    })
    .await;
    assert!(loaded);

    {
        let mut state = app.state.write();
        state.trade_form.symbol = "ETHUSDT".to_string();
        state.trade_form.quantity = "2.5".to_string();
        state.trade_form.side = TradeSide::Buy;
    }
    app.handle_place_trade();
    assert!(app.state.read().trade_form.submitting);

    let settled = tick_until(&mut app, |app| {
        let state = app.state.read();
        state.store.trades.trades.iter().any(|t| t.symbol == "ETHUSDT")
            && state.store.wallet.balance() == Some(9_750.0)
    })
    .await;
    assert!(settled, "trade or balance never arrived");

    let state = app.state.read();
    assert!(!state.trade_form.submitting);
    assert!(state.trade_form.quantity.is_empty());
    assert_eq!(state.store.trades.open_trades().count(), 1);
    drop(state);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn invalid_quantity_never_reaches_the_backend() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(10_000.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    app.state.write().trade_form.quantity = "-3".to_string();
    app.handle_place_trade();

    let mut state = app.state.write();
    assert!(!state.trade_form.submitting);
    assert!(state
        .take_toasts()
        .iter()
        .any(|t| t.level == ToastLevel::Error));
    drop(state);
    assert!(api.trades.lock().is_empty());
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn login_persists_session_and_opens_dashboard() {
    let path = session_path();
    let api = Arc::new(MockApi::with_balance(5_000.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));
    assert_eq!(app.state.read().screen, Screen::Login);

    {
        let mut state = app.state.write();
        state.login_form.email = "ada@example.com".to_string();
        state.login_form.password = "correct-horse".to_string();
    }
    app.handle_login_click();

    let signed_in = tick_until(&mut app, |app| {
        let state = app.state.read();
        state.screen == Screen::Dashboard && state.store.wallet.balance() == Some(5_000.0)
    })
    .await;
    assert!(signed_in);

    let stored = SessionStore::new(&path).load().unwrap();
    assert_eq!(stored.token, "jwt-login");
    assert_eq!(stored.user.email, "ada@example.com");
    assert!(app.state.read().login_form.password.is_empty());

    app.handle_logout();
    assert_eq!(app.state.read().screen, Screen::Login);
    assert!(SessionStore::new(&path).load().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn wrong_password_shows_credentials_error() {
    let path = session_path();
    let api = Arc::new(MockApi::default());
    let mut app = App::with_api(test_config(&path), api, SessionStore::new(&path));

    {
        let mut state = app.state.write();
        state.login_form.email = "ada@example.com".to_string();
        state.login_form.password = "wrong".to_string();
    }
    app.handle_login_click();

    let failed = tick_until(&mut app, |app| app.state.read().store.auth.error.is_some()).await;
    assert!(failed);

    let state = app.state.read();
    assert_eq!(state.screen, Screen::Login);
    assert!(!state.store.auth.loading);
    assert_eq!(state.store.auth.error.as_deref(), Some("Invalid email or password"));
}

fn fill_register_form(app: &App) {
    let mut state = app.state.write();
    let form = &mut state.register_form;
    form.full_name = "Ada Lovelace".to_string();
    form.email = "ada@example.com".to_string();
    form.phone_no = "555-0100".to_string();
    form.address = "London".to_string();
    form.password = "correct-horse".to_string();
    form.confirm_password = "correct-horse".to_string();
}

async fn register_and_expect_login(register_token: Option<String>) {
    let path = session_path();
    let api = Arc::new(MockApi {
        register_token,
        ..MockApi::with_balance(10_000.0)
    });
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    fill_register_form(&app);
    app.handle_register_click();

    let signed_in = tick_until(&mut app, |app| app.state.read().screen == Screen::Dashboard).await;
    assert!(signed_in, "registration never reached the dashboard");

    assert_eq!(api.login_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.token().as_deref(), Some("jwt-login"));
    assert_eq!(SessionStore::new(&path).stored_token().as_deref(), Some("jwt-login"));
    assert!(app.state.read().register_form.password.is_empty());
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn register_without_token_logs_in_with_same_credentials() {
    register_and_expect_login(None).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn register_with_empty_token_logs_in_with_same_credentials() {
    register_and_expect_login(Some(String::new())).await;
}

#[tokio::test(flavor = "multi_thread")]
async fn register_with_token_skips_login() {
    let path = session_path();
    let api = Arc::new(MockApi {
        register_token: Some("jwt-register".to_string()),
        ..MockApi::with_balance(10_000.0)
    });
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    fill_register_form(&app);
    app.handle_register_click();

    let signed_in = tick_until(&mut app, |app| app.state.read().screen == Screen::Dashboard).await;
    assert!(signed_in);
    assert_eq!(api.login_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.token().as_deref(), Some("jwt-register"));
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn cached_wallet_is_reused_unless_forced() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(10_000.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    app.fetch_wallet(false);
    let loaded = tick_until(&mut app, |app| app.state.read().store.wallet.wallet.is_some()).await;
    assert!(loaded);
    assert_eq!(api.wallet_calls.load(Ordering::SeqCst), 1);

    app.fetch_wallet(false);
    assert!(!app.state.read().store.wallet.loading);
    tokio::time::sleep(Duration::from_millis(50)).await;
    app.on_tick();
    assert_eq!(api.wallet_calls.load(Ordering::SeqCst), 1);

    *api.balance.lock() = 12_000.0;
    app.fetch_wallet(true);
    let refreshed =
        tick_until(&mut app, |app| app.state.read().store.wallet.balance() == Some(12_000.0)).await;
    assert!(refreshed);
    assert_eq!(api.wallet_calls.load(Ordering::SeqCst), 2);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn deposit_and_withdraw_update_balance() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(1_000.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));
    app.fetch_wallet(true);
    assert!(tick_until(&mut app, |app| app.state.read().store.wallet.wallet.is_some()).await);

    app.state.write().wallet_screen.amount = "250".to_string();
    app.handle_transfer(TransferKind::Deposit);
    assert_eq!(app.state.read().wallet_screen.pending_transfer, Some(TransferKind::Deposit));
    let deposited = tick_until(&mut app, |app| {
        let state = app.state.read();
        state.wallet_screen.pending_transfer.is_none()
            && state.store.wallet.balance() == Some(1_250.0)
    })
    .await;
    assert!(deposited, "deposit never settled");
    assert!(app.state.read().wallet_screen.amount.is_empty());

    app.state.write().wallet_screen.amount = "1000".to_string();
    app.handle_transfer(TransferKind::Withdraw);
    let withdrawn = tick_until(&mut app, |app| {
        let state = app.state.read();
        state.wallet_screen.pending_transfer.is_none()
            && state.store.wallet.balance() == Some(250.0)
    })
    .await;
    assert!(withdrawn, "withdrawal never settled");
    assert_eq!(api.transfer_calls.load(Ordering::SeqCst), 2);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn withdrawal_over_balance_is_rejected_locally() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(100.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));
    app.fetch_wallet(true);
    assert!(tick_until(&mut app, |app| app.state.read().store.wallet.wallet.is_some()).await);

    app.state.write().wallet_screen.amount = "100.01".to_string();
    app.handle_transfer(TransferKind::Withdraw);

    let mut state = app.state.write();
    assert!(state.wallet_screen.pending_transfer.is_none());
    assert_eq!(state.wallet_screen.amount, "100.01");
    assert!(state
        .take_toasts()
        .iter()
        .any(|t| t.level == ToastLevel::Error && t.message == "Insufficient balance"));
    drop(state);
    assert_eq!(api.transfer_calls.load(Ordering::SeqCst), 0);
    assert_eq!(*api.balance.lock(), 100.0);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn closing_a_trade_settles_pnl_and_refreshes_balance() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(9_800.0));
    api.trades.lock().push(trade("t1", 2.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    let loaded = tick_until(&mut app, |app| {
        app.state.read().store.trades.trades.iter().any(|t| t.id == "t1")
    })
    .await;
    assert!(loaded);

    app.handle_close_trade("t1".to_string());
    assert_eq!(app.state.read().store.trades.closing_trade_id.as_deref(), Some("t1"));

    let settled = tick_until(&mut app, |app| {
        let state = app.state.read();
        let closed = state
            .store
            .trades
            .trades
            .iter()
            .any(|t| t.id == "t1" && t.status == TradeStatus::Closed);
        closed && state.store.wallet.balance() == Some(10_040.0)
    })
    .await;
    assert!(settled, "close never settled");

    let mut state = app.state.write();
    assert!(state.store.trades.closing_trade_id.is_none());
    assert_eq!(state.store.trades.trades[0].pnl, Some(40.0));
    assert!(state
        .take_toasts()
        .iter()
        .any(|t| t.level == ToastLevel::Success && t.message.starts_with("Trade closed")));
    drop(state);

    // A second close of the same trade is refused before any request.
    app.handle_close_trade("t1".to_string());
    assert!(app.state.read().store.trades.closing_trade_id.is_none());
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_mark_read_reloads_notifications() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi {
        reject_syncs: true,
        ..MockApi::with_balance(10_000.0)
    });
    *api.notifications.lock() = vec![notification("n1"), notification("n2")];
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));
    app.state.write().notifications.items = vec![notification("n1")];

    app.mark_notification_read("n1".to_string());
    assert!(app.state.read().notifications.items[0].read);

    let reloaded = tick_until(&mut app, |app| app.state.read().notifications.items.len() == 2).await;
    assert!(reloaded, "notifications were never reloaded");

    let mut state = app.state.write();
    assert!(state.notifications.items.iter().all(|n| !n.read));
    assert_eq!(state.notifications.total, 2);
    assert!(state
        .take_toasts()
        .iter()
        .any(|t| t.level == ToastLevel::Error && t.message.contains("Failed to update notifications")));
    drop(state);
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_alert_toggle_rolls_back() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi {
        reject_syncs: true,
        ..MockApi::with_balance(10_000.0)
    });
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));
    app.state.write().notifications.alerts = vec![alert("a1")];

    app.toggle_price_alert("a1".to_string());
    assert!(!app.state.read().notifications.alerts[0].active);

    let restored = tick_until(&mut app, |app| app.state.read().notifications.alerts[0].active).await;
    assert!(restored, "toggle was never rolled back");
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn rejected_alert_delete_reloads_alerts() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi {
        reject_syncs: true,
        ..MockApi::with_balance(10_000.0)
    });
    *api.alerts.lock() = vec![alert("a1")];
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));
    app.state.write().notifications.alerts = vec![alert("a1")];

    app.delete_price_alert("a1".to_string());
    assert!(app.state.read().notifications.alerts.is_empty());

    let reloaded = tick_until(&mut app, |app| {
        app.state.read().notifications.alerts.iter().any(|a| a.id == "a1")
    })
    .await;
    assert!(reloaded, "alerts were never reloaded");
    let _ = std::fs::remove_file(&path);
}

#[tokio::test(flavor = "multi_thread")]
async fn results_from_a_previous_session_are_discarded() {
    let path = session_path();
    SessionStore::new(&path).store_auth("jwt-live", &user()).unwrap();

    let api = Arc::new(MockApi::with_balance(10_000.0));
    let mut app = App::with_api(test_config(&path), api.clone(), SessionStore::new(&path));

    let stale_tx = app.event_tx();
    app.handle_logout();

    // In flight when the user logged out.
    let _ = stale_tx.try_send(AppEvent::TradesLoaded(Ok(vec![trade("t9", 1.0)])));
    // Delivered on the current channel but still tied to a signed-in user.
    app.event_tx()
        .try_send(AppEvent::WalletLoaded(Ok(api.wallet())))
        .unwrap();

    for _ in 0..5 {
        app.on_tick();
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let state = app.state.read();
    assert_eq!(state.screen, Screen::Login);
    assert!(state.store.trades.trades.is_empty());
    assert!(state.store.wallet.wallet.is_none());
    drop(state);
    let _ = std::fs::remove_file(&path);
}
