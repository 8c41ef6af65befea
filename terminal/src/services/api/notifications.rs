//! # Notification Endpoints
//!
//! Notification center, notification settings and price alerts. Unlike the
//! trading endpoints these return their payload unwrapped.

use serde_json::Value;
use shared::dto::notifications::{
    CreatePriceAlertRequest, NotificationPage, NotificationSettings, PriceAlert,
    TogglePriceAlertRequest,
};

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client))]
pub async fn get_notifications(client: &ApiClient, page: u32, limit: u32) -> Result<NotificationPage> {
    client
        .get(&format!("/notifications?page={}&limit={}", page, limit))
        .await
}

#[tracing::instrument(skip(client))]
pub async fn mark_as_read(client: &ApiClient, id: &str) -> Result<()> {
    client
        .put_empty::<Value>(&format!("/notifications/{}/read", id))
        .await
        .map(|_| ())
}

#[tracing::instrument(skip(client))]
pub async fn mark_all_as_read(client: &ApiClient) -> Result<()> {
    client
        .put_empty::<Value>("/notifications/read-all")
        .await
        .map(|_| ())
}

#[tracing::instrument(skip(client))]
pub async fn delete_notification(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete::<Value>(&format!("/notifications/{}", id))
        .await
        .map(|_| ())
}

pub async fn get_settings(client: &ApiClient) -> Result<NotificationSettings> {
    client.get("/notifications/settings").await
}

#[tracing::instrument(skip(client, settings))]
pub async fn update_settings(
    client: &ApiClient,
    settings: NotificationSettings,
) -> Result<NotificationSettings> {
    client.put("/notifications/settings", &settings).await
}

pub async fn get_price_alerts(client: &ApiClient) -> Result<Vec<PriceAlert>> {
    client.get("/notifications/price-alerts").await
}

#[tracing::instrument(skip(client, request), fields(symbol = %request.symbol, target = request.target_price))]
pub async fn create_price_alert(
    client: &ApiClient,
    request: CreatePriceAlertRequest,
) -> Result<PriceAlert> {
    client.post("/notifications/price-alerts", &request).await
}

#[tracing::instrument(skip(client))]
pub async fn delete_price_alert(client: &ApiClient, id: &str) -> Result<()> {
    client
        .delete::<Value>(&format!("/notifications/price-alerts/{}", id))
        .await
        .map(|_| ())
}

#[tracing::instrument(skip(client))]
pub async fn toggle_price_alert(client: &ApiClient, id: &str, active: bool) -> Result<PriceAlert> {
    client
        .put(
            &format!("/notifications/price-alerts/{}", id),
            &TogglePriceAlertRequest { active },
        )
        .await
}
