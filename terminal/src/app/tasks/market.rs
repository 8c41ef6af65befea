//! # Market Data Tasks
//!
//! The live price widget is fed from two sources: the WebSocket push stream
//! and a REST poll of `/trades/live-price/:symbol`. Both land in
//! `AppState::live_price`.

use std::sync::Arc;

use async_channel::Sender;
use parking_lot::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::spawn_event;
use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::config::ClientConfig;
use crate::core::service::ApiService;
use crate::services::api::websocket;

/// Poll the current price of the selected symbol.
///
/// Skipped while a poll is already in flight so slow responses don't pile up.
pub(crate) fn poll_live_price(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let symbol = {
        let mut state = state.write();
        if state.live_price.loading {
            debug!("Price poll already in flight, skipping");
            return;
        }
        state.live_price.loading = true;
        state.last_price_poll = Some(std::time::Instant::now());
        state.live_price.symbol.clone()
    };

    spawn_event(event_tx, async move {
        let start = std::time::Instant::now();
        let result = api.get_live_price(&symbol).await;
        debug!(
            symbol = %symbol,
            success = result.is_ok(),
            duration_ms = start.elapsed().as_millis(),
            "Live price poll finished"
        );
        AppEvent::LivePriceResult(result)
    });
}

/// Start the push price stream for the signed-in user.
pub(crate) fn start_price_stream(
    config: &ClientConfig,
    token: String,
    event_tx: Sender<AppEvent>,
) -> JoinHandle<()> {
    let url = config.price_stream_url();
    info!(url = %url, "Starting price stream task");
    websocket::spawn_price_stream(url, token, event_tx)
}
