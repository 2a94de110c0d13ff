//! Read side of the ledger
//!
//! `QueryService` answers balance reads from the cache when it can and fills
//! the cache from the store on a miss. Listing and creation go straight to
//! the store.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info};

use super::balance_cache::BalanceCache;
use super::traits::WalletStore;
use crate::types::{Wallet, WalletError, WalletId};

/// Cache-first balance reads plus wallet creation and listing
#[derive(Debug, Clone)]
pub struct QueryService {
    store: Arc<dyn WalletStore>,
    cache: BalanceCache,
}

impl QueryService {
    pub fn new(store: Arc<dyn WalletStore>, cache: BalanceCache) -> Self {
        Self { store, cache }
    }

    /// Read a wallet balance
    ///
    /// A cache hit returns the cached snapshot. On a miss the balance is read
    /// from the store and written to the cache before it is returned.
    ///
    /// # Returns
    ///
    /// * `Ok(Decimal)` - The balance
    /// * `Err(WalletError::NotFound)` - The wallet does not exist (nothing is cached)
    pub fn get_balance(&self, wallet_id: WalletId) -> Result<Decimal, WalletError> {
        if let Some(balance) = self.cache.get(wallet_id) {
            return Ok(balance);
        }

        let balance = self.store.get_balance(wallet_id)?;
        debug!(%wallet_id, %balance, "caching balance read from store");
        self.cache.put(wallet_id, balance);
        Ok(balance)
    }

    /// List every wallet identifier; never cached
    pub fn list_wallet_ids(&self) -> Result<Vec<WalletId>, WalletError> {
        self.store.list_ids()
    }

    /// Create a wallet with a zero balance
    ///
    /// Generates an identifier when `id` is `None`. The new wallet is not cached.
    pub fn create_wallet(&self, id: Option<WalletId>) -> Result<Wallet, WalletError> {
        let wallet = self.store.create(id)?;
        info!(wallet_id = %wallet.id, "wallet created");
        Ok(wallet)
    }
}
