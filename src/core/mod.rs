//! Core business logic module
//!
//! This module contains the balance-mutation components:
//! - `traits` - Storage abstraction
//! - `wallet_store` - In-memory store with atomic conditional updates
//! - `balance_cache` - Bounded read-through cache
//! - `retry` - Backoff schedule for transient store failures
//! - `engine` - Deposit/withdraw validation and application
//! - `query` - Cache-first reads, listing and creation
//! - `ledger` - Facade wiring the pieces together
//! - `batch_processor` - Per-wallet partitioned batch execution

pub mod balance_cache;
pub mod batch_processor;
pub mod engine;
pub mod ledger;
pub mod query;
pub mod retry;
pub mod traits;
pub mod wallet_store;

pub use balance_cache::{BalanceCache, CacheConfig};
pub use batch_processor::{BatchProcessor, CommandResult};
pub use engine::OperationEngine;
pub use ledger::{LedgerConfig, WalletLedger};
pub use query::QueryService;
pub use retry::RetryPolicy;
pub use traits::WalletStore;
pub use wallet_store::InMemoryWalletStore;
