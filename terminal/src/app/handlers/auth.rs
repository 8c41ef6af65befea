//! # Authentication Handlers
//!
//! Handlers for login and registration.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::app::store::AuthAction;
use crate::app::tasks::spawn_event;
use crate::core::service::ApiService;
use crate::utils::validation::{
    validate_email, validate_password, validate_password_confirmation, validate_required,
};
use async_channel::Sender;
use parking_lot::RwLock;
use shared::{LoginRequest, RegisterRequest};
use std::sync::Arc;

/// Handle login button click
///
/// Internal handler function - use [`crate::app::App::handle_login_click`] instead.
pub(crate) fn handle_login_click(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let request = {
        let mut state = state.write();
        if state.store.auth.loading {
            return;
        }
        let email = state.login_form.email.trim().to_string();
        let password = state.login_form.password.clone();
        if email.is_empty() || password.is_empty() {
            state.store.dispatch_auth(AuthAction::LoginFailure("Email and password are required".to_string()));
            return;
        }
        state.store.dispatch_auth(AuthAction::SetLoading(true));
        LoginRequest { email, password }
    };

    tracing::info!(email = %request.email, "Login requested");
    spawn_event(event_tx, async move { AppEvent::LoginResult(api.login(request).await) });
}

fn validate_register_form(state: &AppState) -> Result<RegisterRequest, String> {
    let form = &state.register_form;
    validate_required(&form.full_name, "Full name").into_result()?;
    validate_email(&form.email).into_result()?;
    validate_required(&form.phone_no, "Phone number").into_result()?;
    validate_required(&form.address, "Address").into_result()?;
    validate_password(&form.password).into_result()?;
    validate_password_confirmation(&form.password, &form.confirm_password).into_result()?;

    Ok(RegisterRequest {
        full_name: form.full_name.trim().to_string(),
        email: form.email.trim().to_string(),
        password: form.password.clone(),
        phone_no: form.phone_no.trim().to_string(),
        address: form.address.trim().to_string(),
    })
}

/// Handle register button click
///
/// Registers, then logs in with the same credentials when the backend does
/// not hand back a token directly.
///
/// Internal handler function - use [`crate::app::App::handle_register_click`] instead.
pub(crate) fn handle_register_click(
    state: Arc<RwLock<AppState>>,
    api: Arc<dyn ApiService>,
    event_tx: Sender<AppEvent>,
) {
    let request = {
        let mut state = state.write();
        if state.store.auth.loading {
            return;
        }
        match validate_register_form(&state) {
            Ok(request) => {
                state.register_form.error = None;
                state.store.dispatch_auth(AuthAction::SetLoading(true));
                request
            }
            Err(message) => {
                state.register_form.error = Some(message);
                return;
            }
        }
    };

    tracing::info!(email = %request.email, "Registration requested");
    spawn_event(event_tx, async move {
        let credentials = LoginRequest {
            email: request.email.clone(),
            password: request.password.clone(),
        };
        let result = match api.register(request).await {
            Ok(response) if response.access_token.as_deref().is_some_and(|t| !t.is_empty()) => {
                Ok(response)
            }
            Ok(_) => {
                tracing::debug!("Register response carried no token, logging in");
                api.login(credentials).await
            }
            Err(e) => Err(e),
        };
        AppEvent::RegisterResult(result)
    });
}
