use serde::{Deserialize, Serialize};

/// Notification category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Trade,
    PriceAlert,
    Market,
    Account,
    System,
}

impl NotificationKind {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationKind::Trade => "Trade",
            NotificationKind::PriceAlert => "Price Alert",
            NotificationKind::Market => "Market",
            NotificationKind::Account => "Account",
            NotificationKind::System => "System",
        }
    }
}

/// Structured context attached to a notification
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Notification feed entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<NotificationData>,
}

/// One page of the notification feed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NotificationPage {
    #[serde(default)]
    pub notifications: Vec<Notification>,
    #[serde(default)]
    pub total: u64,
}

/// Delivery preferences for notifications
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub price_alerts: bool,
    pub trade_alerts: bool,
    pub market_news: bool,
    pub account_updates: bool,
    pub system_alerts: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            price_alerts: true,
            trade_alerts: true,
            market_news: false,
            account_updates: true,
            system_alerts: true,
        }
    }
}

/// Trigger direction of a price alert
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    Above,
    Below,
}

impl AlertCondition {
    /// Whether `price` satisfies this condition against `target`.
    pub fn is_met(&self, price: f64, target: f64) -> bool {
        match self {
            AlertCondition::Above => price >= target,
            AlertCondition::Below => price <= target,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCondition::Above => "above",
            AlertCondition::Below => "below",
        }
    }
}

/// User-defined price alert
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceAlert {
    #[serde(alias = "_id")]
    pub id: String,
    pub symbol: String,
    pub condition: AlertCondition,
    pub target_price: f64,
    #[serde(default)]
    pub current_price: f64,
    pub active: bool,
    pub created_at: String,
}

impl PriceAlert {
    /// Whether the alert is active and its condition holds at the last known price.
    pub fn is_triggered(&self) -> bool {
        self.active && self.condition.is_met(self.current_price, self.target_price)
    }
}

/// Create price alert request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePriceAlertRequest {
    pub symbol: String,
    pub condition: AlertCondition,
    pub target_price: f64,
}

/// Toggle price alert request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TogglePriceAlertRequest {
    pub active: bool,
}
