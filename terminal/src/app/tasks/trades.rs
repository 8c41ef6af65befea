//! # Trade Refresh Tasks

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;

use super::spawn_event;
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::store::TradeAction;
use crate::core::service::ApiService;

/// Reload the user's trades. No-op while a load is running.
pub(crate) fn fetch_trades(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.store.trades.loading {
            return;
        }
        state.store.dispatch_trades(TradeAction::SetLoading(true));
        state.last_trades_poll = Some(std::time::Instant::now());
    }

    spawn_event(event_tx, async move {
        let result = api.get_user_trades().await;
        if let Ok(trades) = &result {
            tracing::debug!(count = trades.len(), "Fetched trades");
        }
        AppEvent::TradesLoaded(result)
    });
}
