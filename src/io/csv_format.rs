//! CSV format handling for replay commands and balance output
//!
//! This module centralizes all CSV format concerns, providing:
//! - CsvRecord structure for deserialization
//! - Conversion from CSV records to ledger commands
//! - Balance output serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{CommandKind, LedgerCommand, Wallet, WalletId};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns: type, wallet, amount.
/// The amount is optional because `create` rows carry none.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CsvRecord {
    #[serde(rename = "type")]
    pub command_type: String,
    pub wallet: String,
    pub amount: Option<String>,
}

/// Convert a CsvRecord to a LedgerCommand
///
/// This function:
/// - Parses the command type (case-insensitive; `withdrawal` is accepted for `withdraw`)
/// - Parses the wallet identifier as a UUID
/// - Parses the amount into a Decimal (if present)
/// - Requires an amount for deposit and withdraw rows
///
/// Amount sign and precision are not checked here; the operation engine
/// validates them.
///
/// # Returns
///
/// * `Ok(LedgerCommand)` - Successfully converted record
/// * `Err(String)` - Description of the conversion failure
pub fn convert_csv_record(csv_record: CsvRecord) -> Result<LedgerCommand, String> {
    let kind = match csv_record.command_type.trim().to_lowercase().as_str() {
        "create" => CommandKind::Create,
        "deposit" => CommandKind::Deposit,
        "withdraw" | "withdrawal" => CommandKind::Withdraw,
        _ => {
            return Err(format!(
                "Invalid command type: '{}' for wallet {}",
                csv_record.command_type, csv_record.wallet
            ))
        }
    };

    let wallet = WalletId::from_str(csv_record.wallet.trim())
        .map_err(|_| format!("Invalid wallet id '{}'", csv_record.wallet))?;

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            match Decimal::from_str(amount_str.trim()) {
                Ok(decimal) => Some(decimal),
                Err(_) => {
                    return Err(format!(
                        "Invalid amount '{}' for wallet {}",
                        amount_str, wallet
                    ))
                }
            }
        }
        _ => None,
    };

    if kind != CommandKind::Create && amount.is_none() {
        return Err(format!(
            "{:?} command for wallet {} requires an amount",
            kind, wallet
        ));
    }

    Ok(LedgerCommand {
        kind,
        wallet,
        amount,
    })
}

/// Write wallet balances in CSV format
///
/// Columns: wallet, balance. Rows are sorted by wallet identifier and
/// balances always carry two fractional digits.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_balances_csv(wallets: &[Wallet], output: &mut dyn Write) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["wallet", "balance"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted = wallets.to_vec();
    sorted.sort_by_key(|wallet| wallet.id);

    for wallet in sorted {
        writer
            .write_record(&[wallet.id.to_string(), format!("{:.2}", wallet.balance)])
            .map_err(|e| format!("Failed to write balance record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}
