//! Core traits for wallet storage
//!
//! This module defines the storage abstraction the operation engine and the
//! query service are written against, so that the in-memory store and any
//! other backend can be used interchangeably.

use std::fmt::Debug;

use crate::types::{Wallet, WalletError, WalletId};
use rust_decimal::Decimal;

/// Durable keyed storage mapping wallet identifier to balance
///
/// Implementations must apply `deposit_atomic` and `withdraw_atomic` as one
/// indivisible read-modify-write per wallet row. Callers rely on that as the
/// only concurrency guard: no lock is taken above the store.
///
/// Every method returns a `Result` so backends can report failures. A backend
/// reports lock or timeout conditions as [`WalletError::StoreContention`],
/// which the operation engine retries.
pub trait WalletStore: Debug + Send + Sync {
    /// Insert a new wallet with a zero balance
    ///
    /// Generates an identifier when `id` is `None`. Fails with
    /// `AlreadyExists` when `id` is already present.
    fn create(&self, id: Option<WalletId>) -> Result<Wallet, WalletError>;

    /// Check whether a wallet exists
    fn exists(&self, id: WalletId) -> Result<bool, WalletError>;

    /// Read the committed balance; fails with `NotFound` if absent
    fn get_balance(&self, id: WalletId) -> Result<Decimal, WalletError>;

    /// Atomically apply `balance := balance + amount`
    ///
    /// Returns the number of rows changed: 1 on success, 0 when the wallet
    /// does not exist.
    fn deposit_atomic(&self, id: WalletId, amount: Decimal) -> Result<u64, WalletError>;

    /// Atomically apply `balance := balance - amount` where `balance >= amount`
    ///
    /// Returns 1 on success, 0 when the guard fails or the wallet does not exist.
    fn withdraw_atomic(&self, id: WalletId, amount: Decimal) -> Result<u64, WalletError>;

    /// List every wallet identifier, in no particular order
    fn list_ids(&self) -> Result<Vec<WalletId>, WalletError>;

    /// Read every wallet with its balance, in no particular order
    fn list_wallets(&self) -> Result<Vec<Wallet>, WalletError>;
}
