//! Read-through balance cache
//!
//! Bounded, time-limited map from wallet identifier to a balance snapshot,
//! backed by `moka`. The query path fills it on a miss; the operation engine
//! evicts a wallet's entry before every mutation. Nothing on the mutation
//! path ever reads from it.

use crate::types::WalletId;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::debug;

/// Bounds for the balance cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Time-to-live measured from the write of an entry
    pub ttl: Duration,
    /// Maximum number of entries before least-recently-used eviction
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_entries: 500,
        }
    }
}

/// Concurrent balance cache
///
/// Cheap to clone; clones share the same entries.
#[derive(Debug, Clone)]
pub struct BalanceCache {
    inner: Cache<WalletId, Decimal>,
}

impl BalanceCache {
    pub fn new(config: CacheConfig) -> Self {
        let inner = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { inner }
    }

    /// Cached balance snapshot, or `None` on a miss or an expired entry
    pub fn get(&self, wallet_id: WalletId) -> Option<Decimal> {
        let hit = self.inner.get(&wallet_id);
        debug!(%wallet_id, hit = hit.is_some(), "balance cache lookup");
        hit
    }

    pub fn put(&self, wallet_id: WalletId, balance: Decimal) {
        self.inner.insert(wallet_id, balance);
    }

    pub fn evict(&self, wallet_id: WalletId) {
        self.inner.invalidate(&wallet_id);
    }

    /// Approximate number of live entries
    ///
    /// Runs pending maintenance first so capacity evictions are reflected.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }
}

impl Default for BalanceCache {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
