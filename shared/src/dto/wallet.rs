use serde::{Deserialize, Serialize};

/// Simulated cash wallet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: f64,
    pub currency: String,
    #[serde(default)]
    pub last_updated: String,
}

/// Deposit or withdraw request body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransferRequest {
    pub amount: f64,
    pub currency: String,
}

pub type DepositRequest = TransferRequest;
pub type WithdrawRequest = TransferRequest;

/// Direction of a wallet transfer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransferKind {
    Deposit,
    Withdraw,
}

/// Wallet transaction history entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WalletTransaction {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransferKind,
    pub amount: f64,
    pub date: String,
}

impl WalletTransaction {
    /// Amount with the sign of its effect on the balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransferKind::Deposit => self.amount.abs(),
            TransferKind::Withdraw => -self.amount.abs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_deserializes() {
        let wallet: Wallet =
            serde_json::from_str(r#"{"balance":9500.25,"currency":"USD","lastUpdated":"2024-06-04T10:00:00Z"}"#)
                .unwrap();
        assert_eq!(wallet.balance, 9500.25);
        assert_eq!(wallet.currency, "USD");
    }

    #[test]
    fn test_transaction_signed_amount() {
        let tx: WalletTransaction =
            serde_json::from_str(r#"{"id":"1","type":"withdraw","amount":500,"date":"2024-01-12"}"#).unwrap();
        assert_eq!(tx.signed_amount(), -500.0);
    }
}
