//! Wallet ledger facade
//!
//! `WalletLedger` wires one store, one balance cache, one operation engine and
//! one query service together. The HTTP adapter and the replay strategies both
//! talk to the ledger only.
//!
//! # Architecture
//!
//! ```text
//! WalletLedger
//!     ├── Arc<dyn WalletStore>  (source of truth)
//!     ├── OperationEngine       (evicts cache, writes store, retries)
//!     └── QueryService          (reads cache, fills on miss)
//! ```
//!
//! The engine and the query service share the same `BalanceCache`.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::balance_cache::{BalanceCache, CacheConfig};
use super::engine::OperationEngine;
use super::query::QueryService;
use super::retry::RetryPolicy;
use super::traits::WalletStore;
use super::wallet_store::InMemoryWalletStore;
use crate::types::{CommandKind, LedgerCommand, OperationRequest, Wallet, WalletError, WalletId};

/// Tunables for a ledger instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Balance cache bounds
    pub cache: CacheConfig,
    /// Retry schedule for transient store failures
    pub retry: RetryPolicy,
}

/// Shared entry point for every ledger operation
///
/// Cheap to clone; clones operate on the same store and cache.
#[derive(Debug, Clone)]
pub struct WalletLedger {
    store: Arc<dyn WalletStore>,
    engine: OperationEngine,
    query: QueryService,
}

impl WalletLedger {
    /// Create a ledger over the given store
    ///
    /// # Arguments
    ///
    /// * `store` - Wallet store shared by the engine and the query service
    /// * `config` - Cache bounds and retry schedule
    pub fn new(store: Arc<dyn WalletStore>, config: LedgerConfig) -> Self {
        let cache = BalanceCache::new(config.cache);
        let engine = OperationEngine::new(Arc::clone(&store), cache.clone(), config.retry);
        let query = QueryService::new(Arc::clone(&store), cache);

        Self {
            store,
            engine,
            query,
        }
    }

    /// Ledger over a fresh in-memory store with default bounds
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryWalletStore::new()), LedgerConfig::default())
    }

    pub fn create_wallet(&self, id: Option<WalletId>) -> Result<Wallet, WalletError> {
        self.query.create_wallet(id)
    }

    /// Validate and apply a deposit or withdrawal
    ///
    /// See [`OperationEngine::perform_operation`].
    pub async fn perform_operation(&self, request: &OperationRequest) -> Result<(), WalletError> {
        self.engine.perform_operation(request).await
    }

    pub fn get_balance(&self, wallet_id: WalletId) -> Result<Decimal, WalletError> {
        self.query.get_balance(wallet_id)
    }

    pub fn list_wallet_ids(&self) -> Result<Vec<WalletId>, WalletError> {
        self.query.list_wallet_ids()
    }

    /// Every wallet with its committed balance, sorted by identifier
    ///
    /// Reads the store directly, bypassing the cache.
    pub fn snapshot(&self) -> Result<Vec<Wallet>, WalletError> {
        let mut wallets = self.store.list_wallets()?;
        wallets.sort_by_key(|wallet| wallet.id);
        Ok(wallets)
    }

    /// Apply one replay command
    ///
    /// `Create` creates the wallet with the command's identifier; deposits and
    /// withdrawals go through the operation engine.
    pub async fn apply(&self, command: &LedgerCommand) -> Result<(), WalletError> {
        match command.to_operation_request() {
            Some(request) => self.perform_operation(&request).await,
            None => {
                debug_assert_eq!(command.kind, CommandKind::Create);
                self.create_wallet(Some(command.wallet)).map(|_| ())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn command(kind: CommandKind, wallet: WalletId, amount: Option<Decimal>) -> LedgerCommand {
        LedgerCommand {
            kind,
            wallet,
            amount,
        }
    }

    #[tokio::test]
    async fn test_create_deposit_withdraw_round() {
        let ledger = WalletLedger::in_memory();
        let id = ledger.create_wallet(None).unwrap().id;
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::ZERO);

        let amount = Decimal::new(2500, 2);
        ledger
            .perform_operation(&OperationRequest::deposit(id, amount))
            .await
            .unwrap();
        assert_eq!(ledger.get_balance(id).unwrap(), amount);

        ledger
            .perform_operation(&OperationRequest::withdraw(id, amount))
            .await
            .unwrap();
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_read_after_write_is_not_stale() {
        let ledger = WalletLedger::in_memory();
        let id = ledger.create_wallet(None).unwrap().id;

        // Warm the cache with 0.00, then mutate
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::ZERO);
        ledger
            .perform_operation(&OperationRequest::deposit(id, Decimal::new(10050, 2)))
            .await
            .unwrap();

        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::new(10050, 2));
    }

    #[tokio::test]
    async fn test_apply_commands() {
        let ledger = WalletLedger::in_memory();
        let id = Uuid::new_v4();

        ledger
            .apply(&command(CommandKind::Create, id, None))
            .await
            .unwrap();
        ledger
            .apply(&command(CommandKind::Deposit, id, Some(Decimal::new(10, 0))))
            .await
            .unwrap();
        ledger
            .apply(&command(CommandKind::Withdraw, id, Some(Decimal::new(4, 0))))
            .await
            .unwrap();

        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::new(6, 0));
    }

    #[tokio::test]
    async fn test_apply_create_twice_fails() {
        let ledger = WalletLedger::in_memory();
        let id = Uuid::new_v4();
        let create = command(CommandKind::Create, id, Some(Decimal::new(5, 0)));

        ledger.apply(&create).await.unwrap();
        assert_eq!(
            ledger.apply(&create).await,
            Err(WalletError::already_exists(id))
        );
        // The amount on a create row is ignored
        assert_eq!(ledger.get_balance(id).unwrap(), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_snapshot_is_sorted() {
        let ledger = WalletLedger::in_memory();
        for _ in 0..10 {
            ledger.create_wallet(None).unwrap();
        }

        let snapshot = ledger.snapshot().unwrap();

        assert_eq!(snapshot.len(), 10);
        assert!(snapshot.windows(2).all(|pair| pair[0].id < pair[1].id));
    }

    #[test]
    fn test_debug_lists_components() {
        let rendered = format!("{:?}", WalletLedger::in_memory());

        for part in ["WalletLedger", "InMemoryWalletStore", "OperationEngine", "QueryService"] {
            assert!(rendered.contains(part), "{part} missing from {rendered}");
        }
    }

    #[test]
    fn test_clones_share_state() {
        let ledger = WalletLedger::in_memory();
        let clone = ledger.clone();

        let wallet = clone.create_wallet(None).unwrap();

        assert_eq!(ledger.list_wallet_ids().unwrap(), vec![wallet.id]);
    }
}
