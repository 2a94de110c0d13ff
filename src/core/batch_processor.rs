//! Batch processing with wallet-based partitioning
//!
//! This module provides the `BatchProcessor` struct, which runs a batch of
//! ledger commands concurrently while keeping each wallet's commands in order.
//!
//! # Design
//!
//! A batch is split into one partition per wallet. Each partition runs on its
//! own tokio task and applies its commands sequentially. Partitions for
//! different wallets run in parallel.
//!
//! ```text
//! BatchProcessor
//!     └── WalletLedger  (shared, cheap to clone)
//! ```

use std::collections::HashMap;

use tracing::error;

use super::ledger::WalletLedger;
use crate::types::{LedgerCommand, WalletError, WalletId};

/// Outcome of applying one command
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// The command that was applied
    pub command: LedgerCommand,

    /// Success or the error the ledger reported
    pub result: Result<(), WalletError>,
}

/// Batch processor with wallet-based partitioning
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    ledger: WalletLedger,
}

impl BatchProcessor {
    pub fn new(ledger: WalletLedger) -> Self {
        Self { ledger }
    }

    /// Split a batch into per-wallet partitions
    ///
    /// # Guarantees
    ///
    /// - Each command appears in exactly one partition
    /// - Commands keep their original relative order inside a partition
    pub fn partition_by_wallet(
        &self,
        batch: Vec<LedgerCommand>,
    ) -> HashMap<WalletId, Vec<LedgerCommand>> {
        let mut partitions: HashMap<WalletId, Vec<LedgerCommand>> = HashMap::new();

        for command in batch {
            partitions.entry(command.wallet).or_default().push(command);
        }

        partitions
    }

    /// Apply one wallet's commands in order
    ///
    /// A failing command does not stop the ones after it.
    pub async fn process_wallet_commands(&self, commands: Vec<LedgerCommand>) -> Vec<CommandResult> {
        let mut results = Vec::with_capacity(commands.len());

        for command in commands {
            let result = self.ledger.apply(&command).await;
            results.push(CommandResult { command, result });
        }

        results
    }

    /// Apply a batch, one task per wallet partition
    ///
    /// # Returns
    ///
    /// One `CommandResult` per command. Results for one wallet are in input
    /// order; results across wallets are in no particular order.
    pub async fn process_batch(&self, batch: Vec<LedgerCommand>) -> Vec<CommandResult> {
        let partitions = self.partition_by_wallet(batch);

        let tasks: Vec<_> = partitions
            .into_values()
            .map(|commands| {
                let processor = self.clone();
                tokio::spawn(async move { processor.process_wallet_commands(commands).await })
            })
            .collect();

        let mut results = Vec::new();
        for task in tasks {
            match task.await {
                Ok(wallet_results) => results.extend(wallet_results),
                Err(e) => error!(error = %e, "partition task failed"),
            }
        }

        results
    }
}
