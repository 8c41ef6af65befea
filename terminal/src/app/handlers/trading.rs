//! # Trading Handlers
//!
//! Trade placement and closing. Both follow the same shape: validate, mark
//! the pending operation in state, spawn the request.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, ToastLevel};
use crate::app::store::TradeAction;
use crate::app::tasks::spawn_event;
use crate::core::service::ApiService;
use crate::utils::validation::validate_trade_form;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::PlaceTradeRequest;
use std::sync::Arc;

/// Handle the trade form submit
///
/// Internal handler function - use [`crate::app::App::handle_place_trade`] instead.
pub(crate) fn handle_place_trade(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let request = {
        let mut state = state.write();
        if state.trade_form.submitting {
            return;
        }
        let form = &state.trade_form;
        match validate_trade_form(&form.symbol, &form.quantity) {
            Ok(quantity) => {
                let request = PlaceTradeRequest {
                    symbol: form.symbol.clone(),
                    quantity,
                    side: form.side,
                };
                state.trade_form.submitting = true;
                request
            }
            Err(message) => {
                state.toast(ToastLevel::Error, message);
                return;
            }
        }
    };

    tracing::info!(
        symbol = %request.symbol,
        side = %request.side,
        quantity = request.quantity,
        "Placing trade"
    );
    spawn_event(event_tx, async move { AppEvent::TradePlaced(api.place_trade(request).await) });
}

/// Handle a close button in the trade history table
///
/// Internal handler function - use [`crate::app::App::handle_close_trade`] instead.
pub(crate) fn handle_close_trade(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    trade_id: String,
) {
    {
        let mut state = state.write();
        if state.store.trades.closing_trade_id.is_some() {
            tracing::debug!("A close is already in flight");
            return;
        }
        let is_open = state
            .store
            .trades
            .trades
            .iter()
            .find(|t| t.id == trade_id)
            .map(|t| t.is_open());
        match is_open {
            Some(true) => {}
            Some(false) => {
                state.toast(ToastLevel::Warning, "Trade is already closed");
                return;
            }
            None => {
                state.toast(ToastLevel::Error, "Trade not found");
                return;
            }
        }
        state.store.dispatch_trades(TradeAction::CloseStart(trade_id.clone()));
    }

    tracing::info!(trade_id = %trade_id, "Closing trade");
    spawn_event(event_tx, async move {
        let result = api.close_trade(&trade_id).await;
        AppEvent::TradeClosed { trade_id, result }
    });
}

/// Re-read the wallet after a trade so the balance reflects the settlement.
pub(crate) fn refresh_balance(api: Arc<dyn ApiService>, event_tx: Sender<AppEvent>) {
    spawn_event(event_tx, async move { AppEvent::BalanceRefreshed(api.get_wallet().await) });
}
