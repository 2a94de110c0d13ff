//! Operation-related types for the wallet ledger
//!
//! This module defines the balance-mutation request consumed by the operation
//! engine, and the ledger command used when replaying a command file.

use super::wallet::WalletId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance-mutating operations supported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    /// Credit funds to a wallet
    ///
    /// Applied as `balance := balance + amount` in a single atomic step.
    Deposit,

    /// Debit funds from a wallet
    ///
    /// Applied as `balance := balance - amount` guarded by `balance >= amount`
    /// inside the same atomic step.
    Withdraw,
}

impl OperationType {
    /// Lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "deposit",
            OperationType::Withdraw => "withdraw",
        }
    }
}

/// A request to mutate a wallet balance
///
/// Transient: never persisted. The amount is optional so that a missing
/// amount reaches validation and is reported as `InvalidAmount` rather
/// than being rejected earlier with a less specific error.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationRequest {
    /// Target wallet
    pub wallet_id: WalletId,

    /// Deposit or withdraw
    pub operation_type: OperationType,

    /// Amount to apply; must be present and strictly positive
    pub amount: Option<Decimal>,
}

impl OperationRequest {
    pub fn deposit(wallet_id: WalletId, amount: Decimal) -> Self {
        Self {
            wallet_id,
            operation_type: OperationType::Deposit,
            amount: Some(amount),
        }
    }

    pub fn withdraw(wallet_id: WalletId, amount: Decimal) -> Self {
        Self {
            wallet_id,
            operation_type: OperationType::Withdraw,
            amount: Some(amount),
        }
    }
}

/// Kinds of command a replay file can contain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Create a wallet with the given identifier and a zero balance
    Create,
    /// Deposit into an existing wallet
    Deposit,
    /// Withdraw from an existing wallet
    Withdraw,
}

/// One row of a replay file
///
/// `Create` ignores the amount. `Deposit` and `Withdraw` become an
/// [`OperationRequest`] and go through the operation engine.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerCommand {
    /// What to do
    pub kind: CommandKind,

    /// The wallet this command targets
    pub wallet: WalletId,

    /// Amount for deposits and withdrawals
    pub amount: Option<Decimal>,
}

impl LedgerCommand {
    /// Convert a deposit/withdraw command into an operation request
    ///
    /// Returns `None` for `Create`, which is not a balance mutation.
    pub fn to_operation_request(&self) -> Option<OperationRequest> {
        let operation_type = match self.kind {
            CommandKind::Create => return None,
            CommandKind::Deposit => OperationType::Deposit,
            CommandKind::Withdraw => OperationType::Withdraw,
        };

        Some(OperationRequest {
            wallet_id: self.wallet,
            operation_type,
            amount: self.amount,
        })
    }
}
