//! # Notification Handlers
//!
//! Notification center, delivery settings and price alerts.
//!
//! Read/delete/toggle mutations are applied to local state first and then
//! sent to the server. A failed sync reloads the list from the server.

use crate::app::events::{AppEvent, NotificationOp};
use crate::app::state::{AppState, ToastLevel, NOTIFICATIONS_PAGE_SIZE};
use crate::app::tasks::spawn_event;
use crate::core::service::ApiService;
use crate::utils::validation::validate_alert_target;
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{CreatePriceAlertRequest, NotificationSettings};
use std::sync::Arc;

/// Load one page of notifications. Page 1 replaces the list, later pages append.
pub(crate) fn load_notifications(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    page: u32,
) {
    let page = page.max(1);
    {
        let mut state = state.write();
        if state.notifications.loading {
            return;
        }
        state.notifications.loading = true;
        state.notifications.error = None;
    }

    spawn_event(event_tx, async move {
        let result = api.get_notifications(page, NOTIFICATIONS_PAGE_SIZE).await;
        AppEvent::NotificationsLoaded { page, result }
    });
}

pub(crate) fn load_next_page(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let next = {
        let state = state.read();
        if !state.notifications.has_more() {
            return;
        }
        state.notifications.page + 1
    };
    load_notifications(state, api, event_tx, next);
}

fn sync(api: Arc<dyn ApiService>, event_tx: Sender<AppEvent>, op: NotificationOp) {
    spawn_event(event_tx, async move {
        let result = match &op {
            NotificationOp::MarkRead(id) => api.mark_notification_read(id).await,
            NotificationOp::MarkAllRead => api.mark_all_notifications_read().await,
            NotificationOp::Delete(id) => api.delete_notification(id).await,
        };
        AppEvent::NotificationSynced { op, result }
    });
}

pub(crate) fn handle_mark_read(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    id: String,
) {
    {
        let mut state = state.write();
        match state.notifications.items.iter_mut().find(|n| n.id == id) {
            Some(notification) if !notification.read => notification.read = true,
            _ => return,
        }
    }
    sync(api, event_tx, NotificationOp::MarkRead(id));
}

pub(crate) fn handle_mark_all_read(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.notifications.unread_count() == 0 {
            return;
        }
        for notification in state.notifications.items.iter_mut() {
            notification.read = true;
        }
    }
    sync(api, event_tx, NotificationOp::MarkAllRead);
}

pub(crate) fn handle_delete(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    id: String,
) {
    {
        let mut state = state.write();
        let before = state.notifications.items.len();
        state.notifications.items.retain(|n| n.id != id);
        if state.notifications.items.len() == before {
            return;
        }
        state.notifications.total = state.notifications.total.saturating_sub(1);
    }
    sync(api, event_tx, NotificationOp::Delete(id));
}

pub(crate) fn load_settings(api: Arc<dyn ApiService>, event_tx: Sender<AppEvent>) {
    spawn_event(event_tx, async move {
        AppEvent::NotificationSettingsLoaded(api.get_notification_settings().await)
    });
}

pub(crate) fn save_settings(
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    settings: NotificationSettings,
) {
    spawn_event(event_tx, async move {
        AppEvent::NotificationSettingsSaved(api.update_notification_settings(settings).await)
    });
}

pub(crate) fn load_price_alerts(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.notifications.alerts_loading {
            return;
        }
        state.notifications.alerts_loading = true;
    }
    spawn_event(event_tx, async move { AppEvent::PriceAlertsLoaded(api.get_price_alerts().await) });
}

pub(crate) fn handle_create_alert(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let request = {
        let mut state = state.write();
        let form = state.notifications.alert_form.clone();
        match validate_alert_target(&form.symbol, &form.target_price) {
            Ok(target_price) => CreatePriceAlertRequest {
                symbol: form.symbol,
                condition: form.condition,
                target_price,
            },
            Err(message) => {
                state.toast(ToastLevel::Error, message);
                return;
            }
        }
    };

    tracing::info!(symbol = %request.symbol, target = request.target_price, "Creating price alert");
    spawn_event(event_tx, async move {
        AppEvent::PriceAlertCreated(api.create_price_alert(request).await)
    });
}

pub(crate) fn handle_toggle_alert(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    id: String,
) {
    let active = {
        let mut state = state.write();
        match state.notifications.alerts.iter_mut().find(|a| a.id == id) {
            Some(alert) => {
                alert.active = !alert.active;
                alert.active
            }
            None => return,
        }
    };
    spawn_event(event_tx, async move {
        let result = api.toggle_price_alert(&id, active).await;
        AppEvent::PriceAlertToggled { id, result }
    });
}

pub(crate) fn handle_delete_alert(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    id: String,
) {
    state.write().notifications.alerts.retain(|a| a.id != id);
    spawn_event(event_tx, async move {
        let result = api.delete_price_alert(&id).await;
        AppEvent::PriceAlertDeleted { id, result }
    });
}
