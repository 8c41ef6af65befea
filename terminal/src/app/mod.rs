//! # Application Orchestrator
//!
//! The main [`App`] struct coordinates the UI rendering layer, async tasks and
//! application state.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Main Thread (egui)                       │
//! │  ┌──────────────────────────────────────────────────────┐   │
//! │  │  App (orchestrator)                                  │   │
//! │  │  - on_tick() - drains events, drives poll timers     │   │
//! │  │  - handle_event() - applies async results            │   │
//! │  │  - handle_*() - user actions from the screens        │   │
//! │  └────────────┬─────────────────────────────────────────┘   │
//! │               │                                             │
//! │  ┌────────────▼─────────────────────────────────────────┐   │
//! │  │  State: Arc<RwLock<AppState>>                        │   │
//! │  │  - Store slices (auth, wallet, trades)               │   │
//! │  │  - Screen-local state (forms, live price, ...)       │   │
//! │  └──────────────────────────────────────────────────────┘   │
//! └───────────────────────┬─────────────────────────────────────┘
//!                         │ async_channel (unbounded)
//! ┌───────────────────────▼─────────────────────────────────────┐
//! │              Async Task Threads (Tokio)                     │
//! │  - REST requests through Arc<dyn ApiService>                │
//! │  - WebSocket price stream (JoinHandle owned by App)         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Async tasks never mutate the store directly; they send an [`AppEvent`]
//! which is applied on the UI thread in `on_tick()`.
//!
//! ## Session Expiry
//!
//! Any `AppError::Unauthorized` while signed in clears the session file,
//! resets the store, drops the client token, stops the price feed and returns
//! to the Login screen with a "Session expired" toast.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use papertrade::app::App;
//! use papertrade::config::ClientConfig;
//!
//! let mut app = App::new(ClientConfig::default());
//!
//! // In the egui update loop:
//! app.on_tick();
//! let snapshot = app.state.read().clone();
//! // render from `snapshot`, call app.handle_*() on user input
//! ```

mod event_handler;
mod events;
mod handlers;
mod state;
pub mod store;
mod tasks;

pub use events::{AppEvent, NotificationOp};
pub use handlers::navigation::resolve_screen;
pub use handlers::profile::DELETE_CONFIRMATION;
pub use state::*;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_channel::{unbounded, Receiver, Sender};
use parking_lot::RwLock;
use shared::{NotificationSettings, ProfileSettings, TransferKind, User};
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::core::service::ApiService;
use crate::services::api::{ApiClient, PriceFeedStatus};
use crate::services::session::SessionStore;
use store::AuthAction;

/// Main application orchestrator.
///
/// Owns the shared state, the event channel, the API service and the price
/// stream task. All `handle_*` methods are cheap: they validate, update state
/// and spawn work, never blocking the UI thread.
pub struct App {
    /// Thread-safe shared application state.
    ///
    /// Hold locks for the shortest possible time; the renderer clones a
    /// snapshot once per frame.
    pub state: Arc<RwLock<AppState>>,

    /// Results of async tasks, drained in `on_tick()`. Replaced on logout.
    pub event_rx: Receiver<AppEvent>,

    event_tx: Sender<AppEvent>,
    api: Arc<dyn ApiService>,
    session: SessionStore,
    config: ClientConfig,

    /// Push price stream, aborted when the live screens are left or on logout.
    price_stream: Option<JoinHandle<()>>,
}

impl App {
    /// Create the application with the HTTP client and session file from `config`.
    pub fn new(config: ClientConfig) -> Self {
        let api: Arc<dyn ApiService> = Arc::new(ApiClient::new(&config));
        let session = SessionStore::new(config.session_file.clone());
        Self::with_api(config, api, session)
    }

    /// Create the application with an injected API service.
    ///
    /// A session persisted by a previous run is restored immediately.
    pub fn with_api(config: ClientConfig, api: Arc<dyn ApiService>, session: SessionStore) -> Self {
        let (event_tx, event_rx) = unbounded();
        let mut app = App {
            state: Arc::new(RwLock::new(AppState::default())),
            event_rx,
            event_tx,
            api,
            session,
            config,
            price_stream: None,
        };
        app.restore_session();
        tracing::info!("App state initialized");
        app
    }

    fn restore_session(&mut self) {
        let Some(stored) = self.session.load() else {
            return;
        };
        tracing::info!(user_id = %stored.user.id, "Restoring stored session");
        self.api.set_token(Some(stored.token));
        let mut state = self.state.write();
        state.store.dispatch_auth(AuthAction::LoginSuccess(stored.user));
        state.screen = Screen::Dashboard;
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sender for results produced outside the app. Valid until the session ends.
    pub fn event_tx(&self) -> Sender<AppEvent> {
        self.event_tx.clone()
    }

    pub fn is_price_stream_running(&self) -> bool {
        self.price_stream.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Called every frame: apply pending events, then drive the poll timers.
    pub fn on_tick(&mut self) {
        let started = Instant::now();
        let mut processed = 0u32;
        while let Ok(event) = self.event_rx.try_recv() {
            processed += 1;
            self.handle_event(event);
        }
        if processed > 0 {
            tracing::trace!(
                events = processed,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Processed events"
            );
        }

        self.drive_timers(Instant::now());
    }

    fn handle_event(&mut self, event: AppEvent) {
        use event_handler::AppEventHandler;
        self.handle_event_impl(event);
    }

    /// Price poll and trade refresh run only while a live screen is shown.
    fn drive_timers(&mut self, now: Instant) {
        let due = |last: Option<Instant>, every: Duration| {
            last.map_or(true, |at| now.saturating_duration_since(at) >= every)
        };

        let (live, price_due, trades_due) = {
            let state = self.state.read();
            (
                state.is_authenticated() && state.screen.is_live(),
                due(state.last_price_poll, self.config.price_poll_interval()),
                due(state.last_trades_poll, self.config.trades_poll_interval()),
            )
        };

        if !live {
            self.stop_price_stream();
            let mut state = self.state.write();
            if state.last_price_poll.is_some() || state.last_trades_poll.is_some() {
                state.last_price_poll = None;
                state.last_trades_poll = None;
            }
            return;
        }

        self.ensure_price_stream();
        if price_due {
            tasks::market::poll_live_price(self.state.clone(), self.api.clone(), self.event_tx.clone());
        }
        if trades_due {
            tasks::trades::fetch_trades(self.state.clone(), self.api.clone(), self.event_tx.clone());
        }
    }

    fn ensure_price_stream(&mut self) {
        if self.is_price_stream_running() {
            return;
        }
        if self.state.read().live_price.feed_status == PriceFeedStatus::Disabled {
            return;
        }
        let Some(token) = self.api.token() else {
            return;
        };
        self.price_stream = Some(tasks::market::start_price_stream(
            &self.config,
            token,
            self.event_tx.clone(),
        ));
    }

    fn stop_price_stream(&mut self) {
        if let Some(handle) = self.price_stream.take() {
            handle.abort();
            tracing::info!("Price stream stopped");
            self.state.write().live_price.feed_status = PriceFeedStatus::Disconnected;
        }
    }

    /// Persist credentials and enter the signed-in state.
    pub(crate) fn start_session(&mut self, token: String, user: User) {
        if let Err(e) = self.session.store_auth(&token, &user) {
            tracing::warn!(error = %e, "Failed to persist session");
            self.state
                .write()
                .toast(ToastLevel::Warning, "Signed in, but the session could not be saved");
        }
        self.api.set_token(Some(token));
        {
            let mut state = self.state.write();
            state.store.dispatch_auth(AuthAction::LoginSuccess(user));
            state.login_form = LoginForm::default();
            state.register_form = RegisterForm::default();
            state.screen = Screen::Dashboard;
        }
        self.fetch_wallet(true);
    }

    /// Tear down everything tied to the signed-in user.
    ///
    /// The event channel is replaced, so results of requests still in flight
    /// land in a closed channel instead of the next session's store.
    fn end_session(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "Failed to clear stored session");
        }
        self.api.set_token(None);
        self.stop_price_stream();
        let (event_tx, event_rx) = unbounded();
        self.event_tx = event_tx;
        self.event_rx = event_rx;
        let mut state = self.state.write();
        state.clear_session();
        state.screen = Screen::Login;
    }

    /// Forced logout after the server rejected the token.
    pub(crate) fn force_logout(&mut self) {
        tracing::warn!("Session expired, logging out");
        self.end_session();
        self.state
            .write()
            .toast(ToastLevel::Warning, "Session expired. Please log in again.");
    }

    // ========== GUI Action Methods - Delegating to Handlers ==========

    pub fn handle_login_click(&mut self) {
        handlers::auth::handle_login_click(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn handle_register_click(&mut self) {
        handlers::auth::handle_register_click(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn handle_logout(&mut self) {
        tracing::info!("User logged out");
        self.end_session();
        self.state.write().toast(ToastLevel::Info, "You have been logged out");
    }

    pub fn handle_clear_auth_error(&mut self) {
        self.state.write().store.dispatch_auth(AuthAction::ClearError);
    }

    /// Navigate, then load whatever the entered screen shows.
    pub fn handle_screen_change(&mut self, screen: Screen) {
        let entered = handlers::navigation::handle_screen_change(self.state.clone(), screen);
        match entered {
            Screen::Dashboard | Screen::Trades => self.fetch_wallet(false),
            Screen::Wallet => {
                self.fetch_wallet(false);
                self.fetch_transactions();
            }
            Screen::Notifications => {
                self.load_notifications(1);
                self.load_price_alerts();
                handlers::notifications::load_settings(self.api.clone(), self.event_tx.clone());
            }
            Screen::Profile => self.load_profile(),
            Screen::Login | Screen::Register | Screen::Docs => {}
        }
    }

    pub fn next_screen(&mut self) {
        let current = self.state.read().screen;
        self.handle_screen_change(handlers::navigation::next_screen(current));
    }

    pub fn previous_screen(&mut self) {
        let current = self.state.read().screen;
        self.handle_screen_change(handlers::navigation::previous_screen(current));
    }

    pub fn handle_place_trade(&mut self) {
        handlers::trading::handle_place_trade(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn handle_close_trade(&mut self, trade_id: String) {
        handlers::trading::handle_close_trade(self.state.clone(), self.api.clone(), self.event_tx.clone(), trade_id);
    }

    pub fn refresh_trades(&mut self) {
        tasks::trades::fetch_trades(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    /// Switch the live price widget to another symbol and poll it right away.
    pub fn select_live_symbol(&mut self, symbol: String) {
        {
            let mut state = self.state.write();
            state.live_price.select(symbol);
            state.last_price_poll = None;
        }
        if self.state.read().is_authenticated() {
            tasks::market::poll_live_price(self.state.clone(), self.api.clone(), self.event_tx.clone());
        }
    }

    /// Fetch the wallet; `force == false` reuses a cached wallet.
    pub fn fetch_wallet(&mut self, force: bool) {
        handlers::wallet::fetch_wallet(self.state.clone(), self.api.clone(), self.event_tx.clone(), force);
    }

    pub fn handle_transfer(&mut self, kind: TransferKind) {
        handlers::wallet::handle_transfer(self.state.clone(), self.api.clone(), self.event_tx.clone(), kind);
    }

    pub fn fetch_transactions(&mut self) {
        handlers::wallet::fetch_transactions(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn load_notifications(&mut self, page: u32) {
        handlers::notifications::load_notifications(self.state.clone(), self.api.clone(), self.event_tx.clone(), page);
    }

    pub fn load_more_notifications(&mut self) {
        handlers::notifications::load_next_page(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn mark_notification_read(&mut self, id: String) {
        handlers::notifications::handle_mark_read(self.state.clone(), self.api.clone(), self.event_tx.clone(), id);
    }

    pub fn mark_all_notifications_read(&mut self) {
        handlers::notifications::handle_mark_all_read(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn delete_notification(&mut self, id: String) {
        handlers::notifications::handle_delete(self.state.clone(), self.api.clone(), self.event_tx.clone(), id);
    }

    pub fn save_notification_settings(&mut self, settings: NotificationSettings) {
        handlers::notifications::save_settings(self.api.clone(), self.event_tx.clone(), settings);
    }

    pub fn load_price_alerts(&mut self) {
        handlers::notifications::load_price_alerts(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn create_price_alert(&mut self) {
        handlers::notifications::handle_create_alert(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn toggle_price_alert(&mut self, id: String) {
        handlers::notifications::handle_toggle_alert(self.state.clone(), self.api.clone(), self.event_tx.clone(), id);
    }

    pub fn delete_price_alert(&mut self, id: String) {
        handlers::notifications::handle_delete_alert(self.state.clone(), self.api.clone(), self.event_tx.clone(), id);
    }

    pub fn load_profile(&mut self) {
        handlers::profile::load_profile(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn save_profile(&mut self) {
        handlers::profile::handle_save_profile(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn upload_avatar(&mut self, path: PathBuf) {
        handlers::profile::handle_upload_avatar(self.state.clone(), self.api.clone(), self.event_tx.clone(), path);
    }

    pub fn save_profile_settings(&mut self, settings: ProfileSettings) {
        handlers::profile::handle_save_settings(self.state.clone(), self.api.clone(), self.event_tx.clone(), settings);
    }

    pub fn change_password(&mut self) {
        handlers::profile::handle_change_password(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn enable_two_factor(&mut self) {
        handlers::profile::handle_enable_two_factor(self.api.clone(), self.event_tx.clone());
    }

    pub fn verify_two_factor(&mut self) {
        handlers::profile::handle_verify_two_factor(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn disable_two_factor(&mut self) {
        handlers::profile::handle_disable_two_factor(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    pub fn delete_account(&mut self) {
        handlers::profile::handle_delete_account(self.state.clone(), self.api.clone(), self.event_tx.clone());
    }

    /// Open a docs article by slug, or go back to the list with `None`.
    pub fn select_doc(&mut self, slug: Option<String>) {
        handlers::navigation::handle_select_doc(self.state.clone(), slug);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.price_stream.take() {
            handle.abort();
        }
    }
}
