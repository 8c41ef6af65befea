//! # Wallet Endpoints
//!
//! Simulated cash balance, deposits, withdrawals and transfer history.

use shared::dto::envelope::ApiEnvelope;
use shared::dto::wallet::{TransferRequest, Wallet, WalletTransaction};

use super::client::ApiClient;
use crate::core::error::Result;

#[tracing::instrument(skip(client))]
pub async fn get_wallet(client: &ApiClient) -> Result<Wallet> {
    let wallet = client.get::<ApiEnvelope<Wallet>>("/wallet").await?.data;
    tracing::debug!(balance = wallet.balance, currency = %wallet.currency, "Fetched wallet");
    Ok(wallet)
}

#[tracing::instrument(skip(client, request), fields(amount = request.amount))]
pub async fn deposit(client: &ApiClient, request: TransferRequest) -> Result<Wallet> {
    let wallet = client
        .post::<_, ApiEnvelope<Wallet>>("/wallet/deposit", &request)
        .await?
        .data;
    tracing::info!(balance = wallet.balance, "Deposit completed");
    Ok(wallet)
}

#[tracing::instrument(skip(client, request), fields(amount = request.amount))]
pub async fn withdraw(client: &ApiClient, request: TransferRequest) -> Result<Wallet> {
    let wallet = client
        .post::<_, ApiEnvelope<Wallet>>("/wallet/withdraw", &request)
        .await?
        .data;
    tracing::info!(balance = wallet.balance, "Withdrawal completed");
    Ok(wallet)
}

#[tracing::instrument(skip(client))]
pub async fn get_transactions(client: &ApiClient) -> Result<Vec<WalletTransaction>> {
    Ok(client
        .get::<ApiEnvelope<Vec<WalletTransaction>>>("/wallet/transactions")
        .await?
        .data)
}
