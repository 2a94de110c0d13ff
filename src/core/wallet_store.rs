//! Thread-safe in-memory wallet store
//!
//! This module provides the `InMemoryWalletStore` struct, which keeps wallet
//! balances in a concurrent map and implements the [`WalletStore`] contract.
//!
//! # Design
//!
//! The store uses `DashMap` (a sharded concurrent HashMap). `get_mut` holds the
//! shard's write lock for the lifetime of the returned guard, so a guarded
//! update performed through that guard is an indivisible read-modify-write on
//! the wallet row. That is the only concurrency guard in the whole mutation
//! path.
//!
//! # Thread Safety
//!
//! - Operations on wallets in different shards proceed in parallel
//! - Operations on the same wallet are serialized by the shard lock
//! - The balance check of a withdrawal and its write happen under one guard

use crate::core::traits::WalletStore;
use crate::types::{Wallet, WalletError, WalletId, BALANCE_SCALE};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Thread-safe wallet store backed by `DashMap`
///
/// One entry per wallet: identifier → balance.
#[derive(Debug, Default)]
pub struct InMemoryWalletStore {
    wallets: DashMap<WalletId, Decimal>,
}

impl InMemoryWalletStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            wallets: DashMap::new(),
        }
    }
}

impl WalletStore for InMemoryWalletStore {
    fn create(&self, id: Option<WalletId>) -> Result<Wallet, WalletError> {
        let id = id.unwrap_or_else(Uuid::new_v4);

        match self.wallets.entry(id) {
            Entry::Occupied(_) => Err(WalletError::already_exists(id)),
            Entry::Vacant(slot) => {
                let wallet = Wallet::new(id);
                slot.insert(wallet.balance);
                Ok(wallet)
            }
        }
    }

    fn exists(&self, id: WalletId) -> Result<bool, WalletError> {
        Ok(self.wallets.contains_key(&id))
    }

    fn get_balance(&self, id: WalletId) -> Result<Decimal, WalletError> {
        self.wallets
            .get(&id)
            .map(|balance| *balance.value())
            .ok_or_else(|| WalletError::not_found(id))
    }

    fn deposit_atomic(&self, id: WalletId, amount: Decimal) -> Result<u64, WalletError> {
        let Some(mut balance) = self.wallets.get_mut(&id) else {
            return Ok(0);
        };

        let updated = balance
            .checked_add(amount)
            .ok_or_else(|| WalletError::balance_overflow(id))?;
        *balance = rescaled(updated);
        Ok(1)
    }

    fn withdraw_atomic(&self, id: WalletId, amount: Decimal) -> Result<u64, WalletError> {
        let Some(mut balance) = self.wallets.get_mut(&id) else {
            return Ok(0);
        };

        // Guard and write under the same shard lock.
        if *balance < amount {
            return Ok(0);
        }
        let updated = *balance - amount;
        *balance = rescaled(updated);
        Ok(1)
    }

    fn list_ids(&self) -> Result<Vec<WalletId>, WalletError> {
        Ok(self.wallets.iter().map(|entry| *entry.key()).collect())
    }

    fn list_wallets(&self) -> Result<Vec<Wallet>, WalletError> {
        Ok(self
            .wallets
            .iter()
            .map(|entry| Wallet {
                id: *entry.key(),
                balance: *entry.value(),
            })
            .collect())
    }
}

/// Keep stored balances at the fixed two-digit scale
fn rescaled(mut value: Decimal) -> Decimal {
    value.rescale(BALANCE_SCALE);
    value
}
