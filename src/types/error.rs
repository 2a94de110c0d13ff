//! Error types for the wallet ledger
//!
//! This module defines every error that can occur while creating wallets,
//! applying operations and reading balances.
//!
//! # Error Categories
//!
//! - **Client faults**: unknown wallet, duplicate wallet, invalid amount, insufficient funds
//! - **Transient store faults**: lock contention, retried by the operation engine
//! - **Server faults**: exhausted retries, overflow, storage failures, broken invariants

use super::wallet::WalletId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for the wallet ledger
///
/// Each variant carries enough context to produce a descriptive message for
/// the caller. Only [`WalletError::StoreContention`] is transient; see
/// [`WalletError::is_transient`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WalletError {
    /// No wallet exists with the given identifier
    #[error("Wallet not found with id: {wallet_id}")]
    NotFound {
        /// The identifier that was looked up
        wallet_id: WalletId,
    },

    /// Creation was requested with an identifier that is already taken
    #[error("Wallet {wallet_id} already exists")]
    AlreadyExists {
        /// The duplicate identifier
        wallet_id: WalletId,
    },

    /// Amount is missing, not strictly positive, or finer than the balance scale
    ///
    /// Raised before any store access; no state changes.
    #[error("{reason} (got {})", amount.map(|a| a.to_string()).unwrap_or_else(|| "none".to_string()))]
    InvalidAmount {
        /// The rejected amount, if one was supplied
        amount: Option<Decimal>,
        /// Why it was rejected
        reason: String,
    },

    /// Withdrawal exceeds the balance, or the wallet vanished mid-operation
    ///
    /// The store's guarded update cannot tell these two apart and reports
    /// zero affected rows for both.
    #[error("Insufficient funds in wallet {wallet_id} for requested amount {requested}")]
    InsufficientFunds {
        /// Wallet the withdrawal targeted
        wallet_id: WalletId,
        /// Requested withdrawal amount
        requested: Decimal,
    },

    /// The store could not acquire a lock in time
    ///
    /// Transient: the operation engine retries these with backoff and only
    /// surfaces [`WalletError::RetriesExhausted`] when the cap is reached.
    #[error("Store contention on wallet {wallet_id}: {message}")]
    StoreContention {
        /// Wallet whose row was contended
        wallet_id: WalletId,
        /// Backend description of the contention
        message: String,
    },

    /// Every retry attempt hit store contention
    #[error("Store contention on wallet {wallet_id} persisted after {attempts} attempts")]
    RetriesExhausted {
        /// Wallet the operation targeted
        wallet_id: WalletId,
        /// Number of attempts made
        attempts: u32,
    },

    /// A deposit would overflow the decimal range
    ///
    /// The store rejects the update and leaves the balance untouched.
    #[error("Balance overflow in deposit for wallet {wallet_id}")]
    BalanceOverflow {
        /// Wallet whose balance would overflow
        wallet_id: WalletId,
    },

    /// Non-transient storage failure
    #[error("Storage error: {message}")]
    Storage {
        /// Backend description of the failure
        message: String,
    },

    /// An internal invariant was violated
    #[error("Unexpected error: {message}")]
    Unexpected {
        /// Description of the violated invariant
        message: String,
    },
}

pub const AMOUNT_MISSING: &str = "Amount cannot be null";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be positive";
pub const AMOUNT_TOO_PRECISE: &str = "Amount must have at most 2 fractional digits";

// Helper functions for creating common errors

impl WalletError {
    /// Create a NotFound error
    pub fn not_found(wallet_id: WalletId) -> Self {
        WalletError::NotFound { wallet_id }
    }

    /// Create an AlreadyExists error
    pub fn already_exists(wallet_id: WalletId) -> Self {
        WalletError::AlreadyExists { wallet_id }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(amount: Option<Decimal>, reason: &str) -> Self {
        WalletError::InvalidAmount {
            amount,
            reason: reason.to_string(),
        }
    }

    /// Create an InsufficientFunds error
    pub fn insufficient_funds(wallet_id: WalletId, requested: Decimal) -> Self {
        WalletError::InsufficientFunds {
            wallet_id,
            requested,
        }
    }

    /// Create a StoreContention error
    pub fn store_contention(wallet_id: WalletId, message: &str) -> Self {
        WalletError::StoreContention {
            wallet_id,
            message: message.to_string(),
        }
    }

    /// Create a RetriesExhausted error
    pub fn retries_exhausted(wallet_id: WalletId, attempts: u32) -> Self {
        WalletError::RetriesExhausted {
            wallet_id,
            attempts,
        }
    }

    /// Create a BalanceOverflow error
    pub fn balance_overflow(wallet_id: WalletId) -> Self {
        WalletError::BalanceOverflow { wallet_id }
    }

    /// Create a Storage error
    pub fn storage(message: &str) -> Self {
        WalletError::Storage {
            message: message.to_string(),
        }
    }

    /// Create an Unexpected error
    pub fn unexpected(message: &str) -> Self {
        WalletError::Unexpected {
            message: message.to_string(),
        }
    }

    /// Whether retrying the same operation may succeed without caller intervention
    pub fn is_transient(&self) -> bool {
        matches!(self, WalletError::StoreContention { .. })
    }
}
