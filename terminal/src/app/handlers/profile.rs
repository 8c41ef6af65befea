//! # Profile Handlers
//!
//! Profile details, avatar, preferences and account security.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, ProfileForm, ToastLevel};
use crate::app::tasks::spawn_event;
use crate::core::service::ApiService;
use crate::utils::validation::{
    validate_email, validate_password, validate_password_confirmation, validate_required,
    validate_two_factor_token,
};
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{ChangePasswordRequest, ProfileSettings, ProfileUpdate, UserProfile};
use std::path::PathBuf;
use std::sync::Arc;

/// Typed confirmation required before an account is deleted.
pub const DELETE_CONFIRMATION: &str = "DELETE";

pub(crate) fn load_profile(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.profile.loading {
            return;
        }
        state.profile.loading = true;
    }
    let settings_api = api.clone();
    let settings_tx = event_tx.clone();
    spawn_event(event_tx, async move { AppEvent::ProfileLoaded(api.get_profile().await) });
    spawn_event(settings_tx, async move {
        AppEvent::ProfileSettingsLoaded(settings_api.get_profile_settings().await)
    });
}

/// Fields of `form` that differ from `profile`.
pub fn profile_changes(profile: &UserProfile, form: &ProfileForm) -> ProfileUpdate {
    fn changed(current: &str, edited: &str) -> Option<String> {
        let edited = edited.trim();
        (edited != current).then(|| edited.to_string())
    }

    ProfileUpdate {
        full_name: changed(&profile.user.full_name, &form.full_name),
        email: changed(&profile.user.email, &form.email),
        phone_no: changed(&profile.user.phone_no, &form.phone_no),
        address: changed(&profile.user.address, &form.address),
    }
}

pub(crate) fn handle_save_profile(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let update = {
        let mut state = state.write();
        if state.profile.saving {
            return;
        }
        let Some(profile) = state.profile.profile.clone() else {
            return;
        };
        let form = state.profile.form.clone();
        let checks = validate_required(&form.full_name, "Full name")
            .into_result()
            .and_then(|_| validate_email(&form.email).into_result());
        if let Err(message) = checks {
            state.toast(ToastLevel::Error, message);
            return;
        }
        let update = profile_changes(&profile, &form);
        if update.is_empty() {
            state.toast(ToastLevel::Info, "No changes to save");
            return;
        }
        state.profile.saving = true;
        update
    };

    spawn_event(event_tx, async move { AppEvent::ProfileUpdated(api.update_profile(update).await) });
}

/// Upload the image at `path` as the new avatar.
pub(crate) fn handle_upload_avatar(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    path: PathBuf,
) {
    state.write().profile.saving = true;
    spawn_event(event_tx, async move {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "avatar".to_string());
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::info!(file = %file_name, size = bytes.len(), "Uploading avatar");
                AppEvent::AvatarUploaded(api.upload_avatar(file_name, bytes).await)
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read avatar file");
                AppEvent::TaskFailed(format!("Could not read {}: {}", file_name, e))
            }
        }
    });
}

pub(crate) fn handle_save_settings(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
    settings: ProfileSettings,
) {
    state.write().profile.saving = true;
    spawn_event(event_tx, async move {
        AppEvent::ProfileSettingsSaved(api.update_profile_settings(settings).await)
    });
}

pub(crate) fn handle_change_password(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let request = {
        let mut state = state.write();
        let form = state.profile.password_form.clone();
        let checks = validate_required(&form.current_password, "Current password")
            .into_result()
            .and_then(|_| validate_password_confirmation(&form.new_password, &form.confirm_password).into_result())
            .and_then(|_| validate_password(&form.new_password).into_result());
        if let Err(message) = checks {
            state.toast(ToastLevel::Error, message);
            return;
        }
        state.profile.saving = true;
        ChangePasswordRequest {
            current_password: form.current_password,
            new_password: form.new_password,
        }
    };

    spawn_event(event_tx, async move { AppEvent::PasswordChanged(api.change_password(request).await) });
}

pub(crate) fn handle_enable_two_factor(api: Arc<dyn ApiService>, event_tx: Sender<AppEvent>) {
    spawn_event(event_tx, async move { AppEvent::TwoFactorSetupReady(api.enable_two_factor().await) });
}

fn two_factor_token(state: &Arc<RwLock<AppState>>) -> Option<String> {
    let mut state = state.write();
    let token = state.profile.two_factor_token.trim().to_string();
    match validate_two_factor_token(&token).error {
        Some(message) => {
            state.toast(ToastLevel::Error, message);
            None
        }
        None => Some(token),
    }
}

pub(crate) fn handle_verify_two_factor(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    if let Some(token) = two_factor_token(&state) {
        spawn_event(event_tx, async move { AppEvent::TwoFactorVerified(api.verify_two_factor(token).await) });
    }
}

pub(crate) fn handle_disable_two_factor(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    if let Some(token) = two_factor_token(&state) {
        spawn_event(event_tx, async move { AppEvent::TwoFactorDisabled(api.disable_two_factor(token).await) });
    }
}

pub(crate) fn handle_delete_account(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    {
        let mut state = state.write();
        if state.profile.delete_confirmation.trim() != DELETE_CONFIRMATION {
            state.toast(
                ToastLevel::Error,
                format!("Type {} to confirm account deletion", DELETE_CONFIRMATION),
            );
            return;
        }
        state.profile.saving = true;
    }
    tracing::warn!("Account deletion requested");
    spawn_event(event_tx, async move { AppEvent::AccountDeleted(api.delete_account().await) });
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::User;

    fn profile() -> UserProfile {
        UserProfile {
            user: User {
                id: "u1".to_string(),
                full_name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone_no: "555".to_string(),
                address: "London".to_string(),
                balance: 0.0,
            },
            avatar: None,
        }
    }

    #[test]
    fn unchanged_form_is_empty_update() {
        let mut state = crate::app::state::ProfileState {
            profile: Some(profile()),
            ..Default::default()
        };
        state.reset_form();
        assert!(profile_changes(&profile(), &state.form).is_empty());
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let form = ProfileForm {
            full_name: "Ada King ".to_string(),
            email: "ada@example.com".to_string(),
            phone_no: "555".to_string(),
            address: "Paris".to_string(),
        };
        let update = profile_changes(&profile(), &form);
        assert_eq!(update.full_name.as_deref(), Some("Ada King"));
        assert_eq!(update.email, None);
        assert_eq!(update.address.as_deref(), Some("Paris"));
    }
}
