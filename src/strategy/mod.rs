//! Replay strategy module
//!
//! A replay strategy is a complete pipeline: read a command CSV, apply every
//! command to a fresh ledger, write the final balances. The sequential and the
//! parallel pipeline are selected at runtime.

use crate::cli::StrategyType;
use crate::types::{LedgerCommand, WalletError};
use std::io::Write;
use std::path::Path;
use tracing::warn;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncProcessingStrategy, BatchConfig};
pub use sync::SyncProcessingStrategy;

/// Complete replay pipeline
pub trait ProcessingStrategy: Send + Sync {
    /// Replay commands from `input_path` and write balances to `output`
    ///
    /// # Returns
    ///
    /// * `Ok(())` if the replay completed, possibly with rejected commands
    /// * `Err(String)` on a fatal error (input cannot be opened, output cannot be written)
    ///
    /// Rejected commands and malformed rows are logged and do not fail the replay.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Counters collected during one replay
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Commands the ledger accepted
    pub applied: usize,
    /// Commands the ledger rejected
    pub rejected: usize,
    /// Rows that never became a command
    pub skipped: usize,
}

impl ReplaySummary {
    /// Count one command outcome, logging rejections
    pub fn record(&mut self, command: &LedgerCommand, result: &Result<(), WalletError>) {
        match result {
            Ok(()) => self.applied += 1,
            Err(e) => {
                warn!(wallet_id = %command.wallet, kind = ?command.kind, error = %e, "command rejected");
                self.rejected += 1;
            }
        }
    }
}

/// Create a replay strategy
///
/// # Arguments
///
/// * `strategy_type` - Sequential or parallel
/// * `config` - Batch configuration for the parallel strategy (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy),
        StrategyType::Async => Box::new(AsyncProcessingStrategy::new(config.unwrap_or_default())),
    }
}
