//! Sequential replay strategy
//!
//! Applies replay commands one at a time, in file order, on a single-threaded
//! tokio runtime. The runtime exists only because the operation engine sleeps
//! between retries.
//!
//! # Design
//!
//! The strategy only orchestrates, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Command application to `WalletLedger`
//! - CSV output to `csv_format::write_balances_csv`
//!
//! Memory usage is O(wallets), not O(commands).

use crate::core::WalletLedger;
use crate::io::csv_format::write_balances_csv;
use crate::io::sync_reader::SyncReader;
use crate::strategy::{ProcessingStrategy, ReplaySummary};
use std::io::Write;
use std::path::Path;
use tracing::{info, warn};

/// Sequential replay strategy
///
/// ```no_run
/// use wallet_ledger::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncProcessingStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("commands.csv"), &mut output)
///     .expect("Replay failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncProcessingStrategy;

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Replay a command file and write the final balances
    ///
    /// 1. Opens the file with a `SyncReader`
    /// 2. Applies each command through a fresh in-memory `WalletLedger`
    /// 3. Writes the ledger snapshot with `write_balances_csv`
    ///
    /// Fatal errors (file not found, runtime or output errors) are returned
    /// immediately. Row and command errors are logged and skipped.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        let ledger = WalletLedger::in_memory();
        let reader = SyncReader::new(input_path)?;
        let mut summary = ReplaySummary::default();

        runtime.block_on(async {
            for row in reader {
                match row {
                    Ok(command) => {
                        let result = ledger.apply(&command).await;
                        summary.record(&command, &result);
                    }
                    Err(e) => {
                        warn!(error = %e, "skipping invalid command row");
                        summary.skipped += 1;
                    }
                }
            }
        });

        info!(
            applied = summary.applied,
            rejected = summary.rejected,
            skipped = summary.skipped,
            "sequential replay finished"
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

    fn replay(content: &str) -> Result<String, String> {
        let file = create_temp_csv(content);
        let mut output = Vec::new();
        SyncProcessingStrategy.process(file.path(), &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_withdraw_sequence_from_funded_wallet() {
        let output = replay(&format!(
            "type,wallet,amount\n\
             create,{A},\n\
             deposit,{A},100.50\n\
             withdraw,{A},60.00\n\
             withdraw,{A},60.00\n"
        ))
        .unwrap();

        assert_eq!(output, format!("wallet,balance\n{A},40.50\n"));
    }

    #[test]
    fn test_rejected_commands_do_not_stop_replay() {
        let output = replay(&format!(
            "type,wallet,amount\n\
             deposit,{A},5\n\
             create,{A},\n\
             deposit,{A},-100\n\
             deposit,{A},1.005\n\
             transfer,{A},1\n\
             create,{B},\n\
             create,{B},\n\
             deposit,{B},2.5\n"
        ))
        .unwrap();

        assert_eq!(output, format!("wallet,balance\n{A},0.00\n{B},2.50\n"));
    }

    #[test]
    fn test_empty_input() {
        let output = replay("type,wallet,amount\n").unwrap();
        assert_eq!(output, "wallet,balance\n");
    }

    #[test]
    fn test_missing_file() {
        let mut output = Vec::new();
        let result = SyncProcessingStrategy.process(Path::new("nonexistent.csv"), &mut output);
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SyncProcessingStrategy>();
    }
}
