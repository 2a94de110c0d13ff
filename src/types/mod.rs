//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `wallet`: Wallet identifier and wallet state
//! - `operation`: Operation requests and replayable ledger commands
//! - `error`: Error types for the wallet ledger

pub mod error;
pub mod operation;
pub mod wallet;

pub use error::WalletError;
pub use operation::{CommandKind, LedgerCommand, OperationRequest, OperationType};
pub use wallet::{Wallet, WalletId, BALANCE_SCALE};
