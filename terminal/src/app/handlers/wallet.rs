//! # Wallet Handlers
//!
//! Balance fetch, deposits, withdrawals and transaction history.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, ToastLevel};
use crate::app::store::WalletAction;
use crate::app::tasks::spawn_event;
use crate::core::service::ApiService;
use crate::utils::validation::validate_transfer_amount;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{TransferKind, TransferRequest};
use std::sync::Arc;

/// Fetch the wallet.
///
/// With `force == false` a cached wallet is reused and no request is sent.
pub(crate) fn fetch_wallet(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    force: bool,
) {
    {
        let mut state = state.write();
        let slice = &state.store.wallet;
        if slice.loading || (!force && slice.wallet.is_some()) {
            return;
        }
        state.store.dispatch_wallet(WalletAction::FetchStart);
    }

    spawn_event(event_tx, async move { AppEvent::WalletLoaded(api.get_wallet().await) });
}

/// Handle the deposit or withdraw button
///
/// Internal handler function - use [`crate::app::App::handle_transfer`] instead.
pub(crate) fn handle_transfer(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    kind: TransferKind,
) {
    let request = {
        let mut state = state.write();
        if state.wallet_screen.pending_transfer.is_some() {
            return;
        }
        let amount = match validate_transfer_amount(&state.wallet_screen.amount) {
            Ok(amount) => amount,
            Err(message) => {
                state.toast(ToastLevel::Error, message);
                return;
            }
        };
        let wallet = state.store.wallet.wallet.clone();
        if kind == TransferKind::Withdraw {
            if let Some(balance) = wallet.as_ref().map(|w| w.balance) {
                if amount > balance {
                    state.toast(ToastLevel::Error, "Insufficient balance");
                    return;
                }
            }
        }
        state.wallet_screen.pending_transfer = Some(kind);
        TransferRequest {
            amount,
            currency: wallet.map(|w| w.currency).unwrap_or_else(|| "USD".to_string()),
        }
    };

    tracing::info!(kind = ?kind, amount = request.amount, "Wallet transfer requested");
    spawn_event(event_tx, async move {
        let result = match kind {
            TransferKind::Deposit => api.deposit(request).await,
            TransferKind::Withdraw => api.withdraw(request).await,
        };
        AppEvent::TransferCompleted { kind, result }
    });
}

pub(crate) fn fetch_transactions(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.wallet_screen.transactions_loading {
            return;
        }
        state.wallet_screen.transactions_loading = true;
    }

    spawn_event(event_tx, async move {
        AppEvent::WalletTransactionsLoaded(api.get_wallet_transactions().await)
    });
}
