//! # Profile Endpoints
//!
//! Profile record, avatar upload, preferences, password and two-factor
//! management. Payloads are returned unwrapped.

use reqwest::multipart::{Form, Part};
use serde_json::Value;
use shared::dto::profile::{
    AvatarResponse, ChangePasswordRequest, ProfileSettings, ProfileUpdate, TwoFactorSetup,
    TwoFactorTokenRequest, UserProfile,
};

use super::client::ApiClient;
use crate::core::error::{AppError, Result};

#[tracing::instrument(skip(client))]
pub async fn get_profile(client: &ApiClient) -> Result<UserProfile> {
    client.get("/user/profile").await
}

#[tracing::instrument(skip(client, update))]
pub async fn update_profile(client: &ApiClient, update: ProfileUpdate) -> Result<UserProfile> {
    client.put("/user/update-profile", &update).await
}

/// Guess an image MIME type from the file extension.
pub fn image_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

/// Upload a new avatar as multipart field `avatar`.
#[tracing::instrument(skip(client, bytes), fields(size = bytes.len()))]
pub async fn upload_avatar(
    client: &ApiClient,
    file_name: String,
    bytes: Vec<u8>,
) -> Result<AvatarResponse> {
    let mime = image_mime_type(&file_name);
    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| AppError::Validation(format!("Invalid image type: {}", e)))?;
    let form = Form::new().part("avatar", part);

    client.post_multipart("/profile/update-image", form).await
}

pub async fn get_settings(client: &ApiClient) -> Result<ProfileSettings> {
    client.get("/profile/settings").await
}

#[tracing::instrument(skip(client, settings))]
pub async fn update_settings(client: &ApiClient, settings: ProfileSettings) -> Result<ProfileSettings> {
    client.put("/profile/settings", &settings).await
}

#[tracing::instrument(skip(client, request))]
pub async fn change_password(client: &ApiClient, request: ChangePasswordRequest) -> Result<()> {
    client
        .post::<_, Value>("/profile/change-password", &request)
        .await
        .map(|_| ())
}

#[tracing::instrument(skip(client))]
pub async fn delete_account(client: &ApiClient) -> Result<()> {
    tracing::warn!("Deleting account");
    client.delete::<Value>("/profile/account").await.map(|_| ())
}

#[tracing::instrument(skip(client))]
pub async fn enable_two_factor(client: &ApiClient) -> Result<TwoFactorSetup> {
    client.post_empty("/profile/2fa/enable").await
}

#[tracing::instrument(skip(client, token))]
pub async fn verify_two_factor(client: &ApiClient, token: String) -> Result<()> {
    client
        .post::<_, Value>("/profile/2fa/verify", &TwoFactorTokenRequest { token })
        .await
        .map(|_| ())
}

#[tracing::instrument(skip(client, token))]
pub async fn disable_two_factor(client: &ApiClient, token: String) -> Result<()> {
    client
        .post::<_, Value>("/profile/2fa/disable", &TwoFactorTokenRequest { token })
        .await
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_mime_type() {
        assert_eq!(image_mime_type("me.PNG"), "image/png");
        assert_eq!(image_mime_type("me.webp"), "image/webp");
        assert_eq!(image_mime_type("me.jpeg"), "image/jpeg");
        assert_eq!(image_mime_type("avatar"), "image/jpeg");
    }
}
