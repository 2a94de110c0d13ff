//! JSON request and response bodies

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{OperationType, Wallet, WalletId};

/// Body of `POST /api/v1/wallet`
///
/// Every field is optional so that a missing one produces a field-specific
/// validation message instead of a generic decode failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequestDto {
    pub wallet_id: Option<WalletId>,
    pub operation_type: Option<OperationType>,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
}

/// `{walletId, balance}` with the balance as a JSON number
///
/// The number carries every digit of the decimal, scale included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletBalanceResponse {
    pub wallet_id: WalletId,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub balance: Decimal,
}

impl From<Wallet> for WalletBalanceResponse {
    fn from(wallet: Wallet) -> Self {
        Self {
            wallet_id: wallet.id,
            balance: wallet.balance,
        }
    }
}

/// Error body shared by every failing route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Numeric HTTP status
    pub status: u16,
    /// HTTP reason phrase, e.g. `Not Found`
    pub error: String,
    /// Human-readable description
    pub message: String,
}
