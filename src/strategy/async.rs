//! Parallel batch replay strategy
//!
//! Reads replay commands in batches and runs each batch through the
//! `BatchProcessor`, which partitions it by wallet.
//!
//! # Architecture
//!
//! ```text
//! AsyncProcessingStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     └── BatchProcessor (wallet partitioning + tokio tasks)
//!         └── WalletLedger
//! ```
//!
//! Batches run one after another, so a wallet whose commands span several
//! batches still sees them in file order. Within a batch, different wallets
//! run in parallel on the multi-threaded runtime.

use crate::core::{BatchProcessor, WalletLedger};
use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_balances_csv;
use crate::strategy::{ProcessingStrategy, ReplaySummary};
use std::io::Write;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, info, warn};

/// Configuration for batch replay
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Number of commands per batch
    pub batch_size: usize,
    /// Worker threads of the replay runtime
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a BatchConfig, replacing zero values with the defaults
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(default = default.batch_size, "batch_size of 0 is invalid, using default");
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            warn!(
                default = default.max_concurrent_batches,
                "max_concurrent_batches of 0 is invalid, using default"
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Parallel batch replay strategy
#[derive(Debug, Clone)]
pub struct AsyncProcessingStrategy {
    config: BatchConfig,
}

impl AsyncProcessingStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ProcessingStrategy for AsyncProcessingStrategy {
    /// Replay a command file in parallel batches and write the final balances
    ///
    /// 1. Builds a multi-threaded runtime with `max_concurrent_batches` workers
    /// 2. Reads up to `batch_size` commands at a time with an `AsyncReader`
    /// 3. Runs each batch to completion through a `BatchProcessor`
    /// 4. Writes the ledger snapshot with `write_balances_csv`
    ///
    /// Fatal errors are returned; row and command errors are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .enable_time()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let ledger = WalletLedger::in_memory();
        let processor = BatchProcessor::new(ledger.clone());

        let summary = runtime.block_on(async {
            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            let mut reader = AsyncReader::new(file.compat());
            let mut summary = ReplaySummary::default();
            let mut batch_num = 0usize;

            loop {
                let batch = reader.read_batch(self.config.batch_size).await;
                if batch.is_empty() {
                    break;
                }

                batch_num += 1;
                debug!(batch = batch_num, commands = batch.len(), "processing batch");

                for outcome in processor.process_batch(batch).await {
                    summary.record(&outcome.command, &outcome.result);
                }
            }

            Ok::<_, String>(summary)
        })?;

        info!(
            applied = summary.applied,
            rejected = summary.rejected,
            "parallel replay finished"
        );

        let wallets = ledger
            .snapshot()
            .map_err(|e| format!("Failed to read final balances: {}", e))?;
        write_balances_csv(&wallets, output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::NamedTempFile;

    const A: &str = "11111111-1111-4111-8111-111111111111";
    const B: &str = "22222222-2222-4222-8222-222222222222";

    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[rstest]
    #[case::defaults(0, 0, BatchConfig::default())]
    #[case::custom(10, 3, BatchConfig { batch_size: 10, max_concurrent_batches: 3 })]
    #[case::zero_batch(0, 3, BatchConfig { batch_size: 1000, max_concurrent_batches: 3 })]
    fn test_batch_config_new(
        #[case] batch_size: usize,
        #[case] workers: usize,
        #[case] expected: BatchConfig,
    ) {
        assert_eq!(BatchConfig::new(batch_size, workers), expected);
    }

    #[rstest]
    #[case::one_per_batch(1)]
    #[case::two_per_batch(2)]
    #[case::single_batch(1000)]
    fn test_ordering_across_batches(#[case] batch_size: usize) {
        let file = create_temp_csv(&format!(
            "type,wallet,amount\n\
             create,{A},\n\
             create,{B},\n\
             deposit,{A},100\n\
             deposit,{B},50\n\
             withdraw,{A},30\n\
             deposit,{B},25\n\
             withdraw,{A},20\n\
             withdraw,{B},80\n"
        ));

        let strategy = AsyncProcessingStrategy::new(BatchConfig::new(batch_size, 2));
        let mut output = Vec::new();
        strategy.process(file.path(), &mut output).unwrap();

        // B's final withdrawal exceeds its 75.00 and is rejected
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("wallet,balance\n{A},50.00\n{B},75.00\n")
        );
    }

    #[test]
    fn test_missing_file() {
        let strategy = AsyncProcessingStrategy::new(BatchConfig::default());
        let mut output = Vec::new();

        let result = strategy.process(Path::new("nonexistent.csv"), &mut output);

        assert!(result.unwrap_err().contains("Failed to open file"));
        assert!(output.is_empty());
    }
}
