//! Wallet-related types for the wallet ledger
//!
//! This module defines the Wallet structure and the identifier type used
//! to key wallets in the store, the cache and every adapter.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

/// Wallet identifier
///
/// Opaque unique token; generated as a v4 UUID when the caller does not supply one.
pub type WalletId = Uuid;

/// Number of fractional digits a stored balance carries
pub const BALANCE_SCALE: u32 = 2;

/// Wallet state as held by the store
///
/// The balance is non-negative after every committed operation. It is only
/// ever changed through the store's atomic conditional updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Wallet {
    /// The wallet identifier
    pub id: WalletId,

    /// Current balance, fixed-point with two fractional digits
    pub balance: Decimal,
}

impl Wallet {
    /// Create a new wallet with a zero balance
    ///
    /// # Arguments
    ///
    /// * `id` - The identifier for this wallet
    ///
    /// # Returns
    ///
    /// A new Wallet with balance = 0.00
    pub fn new(id: WalletId) -> Self {
        Wallet {
            id,
            balance: Decimal::new(0, BALANCE_SCALE),
        }
    }
}
