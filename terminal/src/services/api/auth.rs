//! # Authentication Endpoints
//!
//! Login and registration. Both return `{ "data": AuthResponse }`.

use shared::dto::auth::{AuthResponse, LoginRequest, RegisterRequest};
use shared::dto::envelope::ApiEnvelope;

use super::client::ApiClient;
use crate::core::error::Result;

/// Login with email and password.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn login(client: &ApiClient, request: LoginRequest) -> Result<AuthResponse> {
    tracing::info!("Attempting login");
    let start = std::time::Instant::now();

    let result = client
        .post::<_, ApiEnvelope<AuthResponse>>("/auth/login", &request)
        .await
        .map(|envelope| envelope.data);

    match &result {
        Ok(_) => tracing::info!(duration_ms = start.elapsed().as_millis(), "Login successful"),
        Err(e) => tracing::warn!(error = %e, duration_ms = start.elapsed().as_millis(), "Login failed"),
    }
    result
}

/// Register a new account.
///
/// Some backend deployments answer with the created user but no token; the
/// caller then performs a regular login with the same credentials.
#[tracing::instrument(skip(client, request), fields(email = %request.email))]
pub async fn register(client: &ApiClient, request: RegisterRequest) -> Result<AuthResponse> {
    tracing::info!("Attempting registration");

    let response = client
        .post::<_, ApiEnvelope<AuthResponse>>("/auth/register", &request)
        .await?
        .data;

    tracing::info!(has_token = response.access_token.is_some(), "Registration accepted");
    Ok(response)
}
