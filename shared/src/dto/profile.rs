use serde::{Deserialize, Serialize};

use super::auth::User;

/// User profile (user record plus avatar)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial profile update; unset fields are left untouched by the backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.email.is_none() && self.phone_no.is_none() && self.address.is_none()
    }
}

/// UI theme preference stored server-side
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Dark,
    Light,
    System,
}

/// Account preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub price_alerts: bool,
    pub trade_alerts: bool,
    pub market_news: bool,
    pub theme: ThemePreference,
    pub language: String,
    pub timezone: String,
    pub currency: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            price_alerts: true,
            trade_alerts: true,
            market_news: false,
            theme: ThemePreference::Dark,
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            currency: "USD".to_string(),
        }
    }
}

/// Change password request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Two-factor enrollment material
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TwoFactorSetup {
    pub qr_code: String,
    pub secret: String,
}

/// One-time code submitted to verify or disable two-factor auth
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TwoFactorTokenRequest {
    pub token: String,
}

/// Avatar upload response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AvatarResponse {
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_flattens_user() {
        let json = r#"{"_id":"u1","fullName":"Ada","email":"ada@example.com","balance":5,"avatar":"/img/a.png"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.user.id, "u1");
        assert_eq!(profile.avatar.as_deref(), Some("/img/a.png"));
    }

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            address: Some("Paris".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "address": "Paris" }));
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_settings_theme_lowercase() {
        let settings = ProfileSettings {
            theme: ThemePreference::System,
            ..Default::default()
        };
        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(value["theme"], "system");
        assert_eq!(value["marketNews"], false);
    }
}
