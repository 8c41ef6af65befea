//! # State Store
//!
//! Authoritative session data, split into three slices. Each slice is only
//! mutated by applying an action value, so every transition is a single match
//! arm that can be unit tested without a UI or a network.
//!
//! ```text
//! Store
//! ├── auth    AuthSlice    <- AuthAction
//! ├── wallet  WalletSlice  <- WalletAction
//! └── trades  TradesSlice  <- TradeAction
//! ```

use shared::{Trade, TradeStats, User, Wallet};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthSlice {
    pub user: Option<User>,
    pub authenticated: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthAction {
    SetLoading(bool),
    LoginSuccess(User),
    LoginFailure(String),
    /// Replace the stored user after a profile edit. Ignored when logged out.
    UpdateUser(User),
    Logout,
    ClearError,
}

impl AuthSlice {
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::SetLoading(loading) => self.loading = loading,
            AuthAction::LoginSuccess(user) => {
                self.user = Some(user);
                self.authenticated = true;
                self.loading = false;
                self.error = None;
            }
            AuthAction::LoginFailure(message) => {
                self.error = Some(message);
                self.loading = false;
            }
            AuthAction::UpdateUser(user) => {
                if self.authenticated {
                    self.user = Some(user);
                }
            }
            AuthAction::Logout => *self = AuthSlice::default(),
            AuthAction::ClearError => self.error = None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalletSlice {
    pub wallet: Option<Wallet>,
    pub loading: bool,
    pub error: Option<String>,
    pub daily_change: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WalletAction {
    FetchStart,
    FetchSuccess(Wallet),
    FetchFailure(String),
    /// Overwrite the balance. No-op while no wallet is loaded.
    UpdateBalance(f64),
    UpdateDailyChange(f64),
    Reset,
}

impl WalletSlice {
    pub fn apply(&mut self, action: WalletAction) {
        match action {
            WalletAction::FetchStart => {
                self.loading = true;
                self.error = None;
            }
            WalletAction::FetchSuccess(wallet) => {
                self.wallet = Some(wallet);
                self.loading = false;
                self.error = None;
            }
            WalletAction::FetchFailure(message) => {
                self.loading = false;
                self.error = Some(message);
            }
            WalletAction::UpdateBalance(balance) => {
                if let Some(wallet) = self.wallet.as_mut() {
                    wallet.balance = balance;
                }
            }
            WalletAction::UpdateDailyChange(change) => self.daily_change = change,
            WalletAction::Reset => *self = WalletSlice::default(),
        }
    }

    pub fn balance(&self) -> Option<f64> {
        self.wallet.as_ref().map(|w| w.balance)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradesSlice {
    pub trades: Vec<Trade>,
    pub loading: bool,
    pub error: Option<String>,
    /// Trade with a close request in flight, if any.
    pub closing_trade_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradeAction {
    SetLoading(bool),
    SetTrades(Vec<Trade>),
    AddTrade(Trade),
    /// Replace the trade with the same id. Closed trades are never replaced.
    UpdateTrade(Trade),
    RemoveTrade(String),
    CloseStart(String),
    TradeFailure(String),
    Clear,
    ClearError,
}

impl TradesSlice {
    pub fn apply(&mut self, action: TradeAction) {
        match action {
            TradeAction::SetLoading(loading) => self.loading = loading,
            TradeAction::SetTrades(incoming) => {
                // A refresh started before a close may still report the trade open.
                let trades = incoming
                    .into_iter()
                    .map(|trade| match self.trades.iter().find(|t| t.id == trade.id) {
                        Some(existing) if !existing.status.can_transition_to(trade.status) => {
                            tracing::debug!(trade_id = %trade.id, "Keeping locally closed trade over stale refresh");
                            existing.clone()
                        }
                        _ => trade,
                    })
                    .collect();
                self.trades = trades;
                self.loading = false;
                self.error = None;
            }
            TradeAction::AddTrade(trade) => {
                if self.trades.iter().any(|t| t.id == trade.id) {
                    tracing::debug!(trade_id = %trade.id, "Trade already in store, treating add as update");
                    self.apply(TradeAction::UpdateTrade(trade));
                } else {
                    self.trades.push(trade);
                }
            }
            TradeAction::UpdateTrade(trade) => {
                if self.closing_trade_id.as_deref() == Some(trade.id.as_str()) {
                    self.closing_trade_id = None;
                }
                match self.trades.iter_mut().find(|t| t.id == trade.id) {
                    Some(existing) if existing.status.can_transition_to(trade.status) => {
                        *existing = trade;
                    }
                    Some(existing) => {
                        tracing::warn!(
                            trade_id = %existing.id,
                            current = %existing.status,
                            incoming = %trade.status,
                            "Refusing to modify a closed trade"
                        );
                    }
                    None => {}
                }
            }
            TradeAction::RemoveTrade(id) => self.trades.retain(|t| t.id != id),
            TradeAction::CloseStart(id) => self.closing_trade_id = Some(id),
            TradeAction::TradeFailure(message) => {
                self.error = Some(message);
                self.loading = false;
                self.closing_trade_id = None;
            }
            TradeAction::Clear => *self = TradesSlice::default(),
            TradeAction::ClearError => self.error = None,
        }
    }

    pub fn stats(&self) -> TradeStats {
        TradeStats::from_trades(&self.trades)
    }

    pub fn open_trades(&self) -> impl Iterator<Item = &Trade> {
        self.trades.iter().filter(|t| t.is_open())
    }

    /// Newest first, as the history table shows them.
    pub fn recent(&self, limit: usize) -> Vec<&Trade> {
        let mut trades: Vec<&Trade> = self.trades.iter().collect();
        trades.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        trades.truncate(limit);
        trades
    }

    pub fn is_closing(&self, id: &str) -> bool {
        self.closing_trade_id.as_deref() == Some(id)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    pub auth: AuthSlice,
    pub wallet: WalletSlice,
    pub trades: TradesSlice,
}

impl Store {
    pub fn dispatch_auth(&mut self, action: AuthAction) {
        self.auth.apply(action);
    }

    pub fn dispatch_wallet(&mut self, action: WalletAction) {
        self.wallet.apply(action);
    }

    pub fn dispatch_trades(&mut self, action: TradeAction) {
        self.trades.apply(action);
    }

    /// Clear every slice. Used on logout and forced session expiry.
    pub fn reset(&mut self) {
        self.auth.apply(AuthAction::Logout);
        self.wallet.apply(WalletAction::Reset);
        self.trades.apply(TradeAction::Clear);
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.authenticated
    }

    pub fn stats(&self) -> TradeStats {
        self.trades.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{TradeSide, TradeStatus};

    fn user() -> User {
        User {
            id: "u1".to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phone_no: String::new(),
            address: String::new(),
            balance: 10_000.0,
        }
    }

    fn wallet(balance: f64) -> Wallet {
        Wallet {
            balance,
            currency: "USD".to_string(),
            last_updated: "2024-06-01T00:00:00Z".to_string(),
        }
    }

    fn trade(id: &str, status: TradeStatus, pnl: Option<f64>) -> Trade {
        Trade {
            id: id.to_string(),
            symbol: "BTCUSDT".to_string(),
            side: TradeSide::Buy,
            quantity: 0.5,
            price: 45_000.0,
            status,
            pnl,
            created_at: format!("2024-06-01T00:00:0{}Z", id.len()),
            closed_at: None,
        }
    }

    #[test]
    fn login_success_clears_error() {
        let mut auth = AuthSlice::default();
        auth.apply(AuthAction::SetLoading(true));
        auth.apply(AuthAction::LoginFailure("Invalid email or password".to_string()));
        assert!(!auth.loading);
        assert!(auth.error.is_some());

        auth.apply(AuthAction::LoginSuccess(user()));
        assert!(auth.authenticated);
        assert_eq!(auth.error, None);
        assert_eq!(auth.user.as_ref().map(|u| u.id.as_str()), Some("u1"));
    }

    #[test]
    fn update_user_requires_session() {
        let mut auth = AuthSlice::default();
        auth.apply(AuthAction::UpdateUser(user()));
        assert!(auth.user.is_none());
    }

    #[test]
    fn update_balance_without_wallet_is_noop() {
        let mut slice = WalletSlice::default();
        slice.apply(WalletAction::UpdateBalance(500.0));
        assert_eq!(slice, WalletSlice::default());

        slice.apply(WalletAction::FetchSuccess(wallet(1_000.0)));
        slice.apply(WalletAction::UpdateBalance(500.0));
        assert_eq!(slice.balance(), Some(500.0));
    }

    #[test]
    fn fetch_failure_keeps_wallet() {
        let mut slice = WalletSlice::default();
        slice.apply(WalletAction::FetchSuccess(wallet(1_000.0)));
        slice.apply(WalletAction::FetchStart);
        assert!(slice.loading);
        slice.apply(WalletAction::FetchFailure("boom".to_string()));
        assert!(!slice.loading);
        assert_eq!(slice.balance(), Some(1_000.0));
        assert_eq!(slice.error.as_deref(), Some("boom"));
    }

    #[test]
    fn closed_trade_cannot_reopen() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::SetTrades(vec![trade("t1", TradeStatus::Closed, Some(100.0))]));

        slice.apply(TradeAction::UpdateTrade(trade("t1", TradeStatus::Open, None)));
        assert_eq!(slice.trades[0].status, TradeStatus::Closed);
        assert_eq!(slice.trades[0].pnl, Some(100.0));
    }

    #[test]
    fn closed_trade_is_immutable() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::SetTrades(vec![trade("t1", TradeStatus::Closed, Some(100.0))]));

        slice.apply(TradeAction::UpdateTrade(trade("t1", TradeStatus::Closed, Some(-5.0))));
        assert_eq!(slice.trades[0].pnl, Some(100.0));
    }

    #[test]
    fn close_flow_updates_open_trade() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::AddTrade(trade("t1", TradeStatus::Open, None)));
        slice.apply(TradeAction::CloseStart("t1".to_string()));
        assert!(slice.is_closing("t1"));

        slice.apply(TradeAction::UpdateTrade(trade("t1", TradeStatus::Closed, Some(25.0))));
        assert!(!slice.is_closing("t1"));
        assert_eq!(slice.trades[0].status, TradeStatus::Closed);
        assert_eq!(slice.stats().total_pnl, 25.0);
    }

    #[test]
    fn close_failure_clears_pending_close() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::AddTrade(trade("t1", TradeStatus::Open, None)));
        slice.apply(TradeAction::CloseStart("t1".to_string()));
        slice.apply(TradeAction::TradeFailure("Trade not found".to_string()));
        assert_eq!(slice.closing_trade_id, None);
        assert_eq!(slice.trades[0].status, TradeStatus::Open);
    }

    #[test]
    fn duplicate_add_does_not_duplicate() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::AddTrade(trade("t1", TradeStatus::Open, None)));
        slice.apply(TradeAction::AddTrade(trade("t1", TradeStatus::Open, None)));
        assert_eq!(slice.trades.len(), 1);
    }

    #[test]
    fn remove_trade() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::SetTrades(vec![
            trade("t1", TradeStatus::Open, None),
            trade("t22", TradeStatus::Open, None),
        ]));
        slice.apply(TradeAction::RemoveTrade("t1".to_string()));
        assert_eq!(slice.trades.len(), 1);
        assert_eq!(slice.trades[0].id, "t22");
    }

    #[test]
    fn recent_is_newest_first() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::SetTrades(vec![
            trade("a", TradeStatus::Open, None),
            trade("bbb", TradeStatus::Open, None),
            trade("cc", TradeStatus::Open, None),
        ]));
        let ids: Vec<_> = slice.recent(2).iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["bbb", "cc"]);
    }

    #[test]
    fn reset_clears_everything() {
        let mut store = Store::default();
        store.dispatch_auth(AuthAction::LoginSuccess(user()));
        store.dispatch_wallet(WalletAction::FetchSuccess(wallet(10.0)));
        store.dispatch_wallet(WalletAction::UpdateDailyChange(2.5));
        store.dispatch_trades(TradeAction::AddTrade(trade("t1", TradeStatus::Open, None)));

        store.reset();
        assert_eq!(store, Store::default());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn stale_refresh_does_not_reopen_closed_trade() {
        let mut slice = TradesSlice::default();
        slice.apply(TradeAction::AddTrade(trade("t1", TradeStatus::Open, None)));
        slice.apply(TradeAction::CloseStart("t1".to_string()));
        slice.apply(TradeAction::UpdateTrade(trade("t1", TradeStatus::Closed, Some(25.0))));

        slice.apply(TradeAction::SetTrades(vec![
            trade("t1", TradeStatus::Open, None),
            trade("t22", TradeStatus::Open, None),
        ]));

        assert_eq!(slice.trades.len(), 2);
        assert_eq!(slice.trades[0].status, TradeStatus::Closed);
        assert_eq!(slice.trades[0].pnl, Some(25.0));
        assert_eq!(slice.trades[1].id, "t22");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn action() -> impl Strategy<Value = TradeAction> {
            let id = prop::sample::select(vec!["t1", "t2", "t3"]);
            let status = prop::sample::select(vec![TradeStatus::Open, TradeStatus::Closed]);
            prop_oneof![
                (id.clone(), status.clone()).prop_map(|(id, s)| TradeAction::AddTrade(trade(id, s, Some(1.0)))),
                (id.clone(), status.clone()).prop_map(|(id, s)| TradeAction::UpdateTrade(trade(id, s, Some(2.0)))),
                id.clone().prop_map(|id| TradeAction::CloseStart(id.to_string())),
                prop::collection::btree_map(id.clone(), status.clone(), 0..3).prop_map(|listed| {
                    TradeAction::SetTrades(listed.into_iter().map(|(id, s)| trade(id, s, Some(3.0))).collect())
                }),
                id.prop_map(|id| TradeAction::RemoveTrade(id.to_string())),
            ]
        }

        proptest! {
            #[test]
            fn closed_trades_never_reopen(actions in prop::collection::vec(action(), 1..40)) {
                let mut slice = TradesSlice::default();
                for action in actions {
                    let closed_before: Vec<String> = slice
                        .trades
                        .iter()
                        .filter(|t| t.is_closed())
                        .map(|t| t.id.clone())
                        .collect();
                    slice.apply(action);
                    for id in closed_before {
                        if let Some(t) = slice.trades.iter().find(|t| t.id == id) {
                            prop_assert!(t.is_closed());
                        }
                    }
                    let mut ids: Vec<&str> = slice.trades.iter().map(|t| t.id.as_str()).collect();
                    ids.sort_unstable();
                    ids.dedup();
                    prop_assert_eq!(ids.len(), slice.trades.len());
                }
            }
        }
    }
}
