//! Wallet Ledger Library
//! # Overview
//!
//! This library provides a minimal wallet ledger: create a wallet, deposit,
//! withdraw, read a balance, list wallets. Balances are mutated only through
//! the store's guarded atomic updates, so concurrent withdrawals can never
//! overdraw a wallet.
//!
//! # Architecture
//!
//! - [`types`] - Core data types (Wallet, OperationRequest, WalletError, ...)
//! - [`core`] - Business logic components:
//!   - [`core::wallet_store`] - In-memory store with atomic conditional updates
//!   - [`core::balance_cache`] - Bounded read-through balance cache
//!   - [`core::engine`] - Validation, cache eviction, atomic update, retry
//!   - [`core::query`] - Cache-first reads, listing, creation
//!   - [`core::ledger`] - Facade shared by every adapter
//! - [`http`] - JSON API over axum
//! - [`io`] / [`strategy`] - CSV command replay, sequential or parallel
//! - [`cli`] / [`logging`] - Binary configuration and tracing setup
//!
//! # Operations
//!
//! - **Deposit**: `balance := balance + amount`
//! - **Withdraw**: `balance := balance - amount`, only if `balance >= amount`
//!
//! Amounts must be present, strictly positive, and carry at most two
//! fractional digits.

// Module declarations
pub mod cli;
pub mod core;
pub mod http;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use core::{
    BalanceCache, CacheConfig, InMemoryWalletStore, LedgerConfig, RetryPolicy, WalletLedger,
    WalletStore,
};
pub use io::write_balances_csv;
pub use types::{
    CommandKind, LedgerCommand, OperationRequest, OperationType, Wallet, WalletError, WalletId,
};
