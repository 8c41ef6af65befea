//! # Trading Endpoints
//!
//! Trade history, order placement, closing and the REST live-price fallback.
//! Every response is wrapped as `{ "data": ... }`.

use shared::dto::envelope::ApiEnvelope;
use shared::dto::trading::{LivePrice, PlaceTradeRequest, Trade};

use super::client::ApiClient;
use crate::core::error::Result;

/// All trades of the authenticated user.
#[tracing::instrument(skip(client))]
pub async fn get_user_trades(client: &ApiClient) -> Result<Vec<Trade>> {
    let trades = client
        .get::<ApiEnvelope<Vec<Trade>>>("/user/trades")
        .await?
        .data;
    tracing::debug!(count = trades.len(), "Fetched user trades");
    Ok(trades)
}

/// Place a simulated market order.
#[tracing::instrument(skip(client, request), fields(symbol = %request.symbol, side = %request.side, quantity = request.quantity))]
pub async fn place_trade(client: &ApiClient, request: PlaceTradeRequest) -> Result<Trade> {
    let trade = client
        .post::<_, ApiEnvelope<Trade>>("/trade/place", &request)
        .await?
        .data;
    tracing::info!(trade_id = %trade.id, price = trade.price, "Trade placed");
    Ok(trade)
}

/// Close an open trade; the backend computes its pnl.
#[tracing::instrument(skip(client))]
pub async fn close_trade(client: &ApiClient, trade_id: &str) -> Result<Trade> {
    let trade = client
        .post_empty::<ApiEnvelope<Trade>>(&format!("/trade/close/{}", trade_id))
        .await?
        .data;
    tracing::info!(trade_id = %trade.id, pnl = ?trade.pnl, "Trade closed");
    Ok(trade)
}

/// Current price of one symbol.
#[tracing::instrument(skip(client), level = "debug")]
pub async fn get_live_price(client: &ApiClient, symbol: &str) -> Result<LivePrice> {
    Ok(client
        .get::<ApiEnvelope<LivePrice>>(&format!("/trades/live-price/{}", symbol))
        .await?
        .data)
}
