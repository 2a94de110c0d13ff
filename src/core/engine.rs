//! Balance-mutation engine
//!
//! This module provides the `OperationEngine` struct, which validates deposit
//! and withdraw requests and applies them to a [`WalletStore`].
//!
//! # Design
//!
//! Caching, retry and atomicity are explicit steps of `perform_operation`:
//!
//! ```text
//! validate amount ──► evict cache entry ──► exists? ──► atomic update
//!                                             ▲               │
//!                                             └── backoff ◄───┘ (transient only)
//! ```
//!
//! The engine never reads the cache and never takes a lock of its own. The
//! store's guarded single-step update is what keeps concurrent withdrawals on
//! one wallet from overdrawing it.
//!
//! # Thread Safety
//!
//! The engine is cheap to clone and can be shared across tasks. Backoff sleeps
//! suspend only the calling task.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{error, info, warn};

use super::balance_cache::BalanceCache;
use super::retry::RetryPolicy;
use super::traits::WalletStore;
use crate::types::error::{AMOUNT_MISSING, AMOUNT_NOT_POSITIVE, AMOUNT_TOO_PRECISE};
use crate::types::{OperationRequest, OperationType, WalletError, WalletId, BALANCE_SCALE};

/// Applies validated balance mutations with cache eviction and retry
#[derive(Debug, Clone)]
pub struct OperationEngine {
    /// Source of truth for balances
    store: Arc<dyn WalletStore>,

    /// Cache owned by the query path; only evicted from here
    cache: BalanceCache,

    /// Backoff schedule for transient store failures
    retry: RetryPolicy,
}

impl OperationEngine {
    /// Create a new OperationEngine
    ///
    /// # Arguments
    ///
    /// * `store` - Shared wallet store
    /// * `cache` - Balance cache to evict before each mutation
    /// * `retry` - Retry schedule for transient store failures
    pub fn new(store: Arc<dyn WalletStore>, cache: BalanceCache, retry: RetryPolicy) -> Self {
        Self {
            store,
            cache,
            retry,
        }
    }

    /// Validate and apply a deposit or withdrawal
    ///
    /// 1. Rejects a missing, non-positive or over-precise amount
    /// 2. Evicts the wallet's cache entry (once, before touching the store)
    /// 3. Checks that the wallet exists
    /// 4. Issues the atomic update for the operation type
    /// 5. Repeats 3-4 with backoff while the store reports contention
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The balance change is committed
    /// * `Err(WalletError::InvalidAmount)` - Validation failed; nothing was touched
    /// * `Err(WalletError::NotFound)` - The wallet does not exist
    /// * `Err(WalletError::InsufficientFunds)` - The withdrawal guard failed
    /// * `Err(WalletError::RetriesExhausted)` - Contention outlasted the retry cap
    /// * `Err(WalletError::Unexpected)` - A deposit lost its row after the existence check
    ///
    /// No partial state is committed on any error.
    pub async fn perform_operation(&self, request: &OperationRequest) -> Result<(), WalletError> {
        let amount = validate_amount(request.amount)?;
        let wallet_id = request.wallet_id;
        let operation = request.operation_type;

        info!(
            %wallet_id,
            operation = operation.as_str(),
            %amount,
            "performing wallet operation"
        );

        self.cache.evict(wallet_id);

        let mut attempt = 1;
        loop {
            match self.apply_once(wallet_id, operation, amount) {
                Err(err) if err.is_transient() => {
                    if !self.retry.should_retry(attempt) {
                        error!(%wallet_id, attempts = attempt, error = %err, "giving up after store contention");
                        return Err(WalletError::retries_exhausted(wallet_id, attempt));
                    }

                    let delay = self.retry.delay_after(attempt);
                    warn!(
                        %wallet_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient store failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Ok(()) => {
                    info!(%wallet_id, operation = operation.as_str(), "operation successful");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: existence check followed by the atomic update
    fn apply_once(
        &self,
        wallet_id: WalletId,
        operation: OperationType,
        amount: Decimal,
    ) -> Result<(), WalletError> {
        if !self.store.exists(wallet_id)? {
            warn!(%wallet_id, "operation on unknown wallet");
            return Err(WalletError::not_found(wallet_id));
        }

        match operation {
            OperationType::Deposit => {
                let rows = self.store.deposit_atomic(wallet_id, amount)?;
                if rows == 0 {
                    error!(%wallet_id, "deposit failed unexpectedly for existing wallet");
                    return Err(WalletError::unexpected(&format!(
                        "Deposit failed unexpectedly for wallet {}",
                        wallet_id
                    )));
                }
            }
            OperationType::Withdraw => {
                let rows = self.store.withdraw_atomic(wallet_id, amount)?;
                if rows == 0 {
                    warn!(%wallet_id, %amount, "insufficient funds or wallet disappeared");
                    return Err(WalletError::insufficient_funds(wallet_id, amount));
                }
            }
        }

        Ok(())
    }
}

/// Check that an amount is present, strictly positive and fits the balance scale
///
/// Trailing zeros are ignored, so `10.500` is accepted as `10.50`.
pub fn validate_amount(amount: Option<Decimal>) -> Result<Decimal, WalletError> {
    let value = amount.ok_or_else(|| WalletError::invalid_amount(None, AMOUNT_MISSING))?;

    if value <= Decimal::ZERO {
        return Err(WalletError::invalid_amount(amount, AMOUNT_NOT_POSITIVE));
    }

    let normalized = value.normalize();
    if normalized.scale() > BALANCE_SCALE {
        return Err(WalletError::invalid_amount(amount, AMOUNT_TOO_PRECISE));
    }

    Ok(normalized)
}
