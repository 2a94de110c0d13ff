//! Wallet Ledger CLI
//!
//! # Usage
//!
//! ```bash
//! cargo run -- serve --host 0.0.0.0 --port 8080
//! cargo run -- replay commands.csv > balances.csv
//! cargo run -- replay --strategy sync commands.csv > balances.csv
//! cargo run -- replay --strategy async --batch-size 2000 --max-concurrent 8 commands.csv
//! ```
//!
//! `serve` exposes the JSON API. `replay` applies a `type,wallet,amount` CSV to
//! an empty ledger and prints `wallet,balance` rows to stdout. Logs go to
//! stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (bad arguments, file not found, bind failure, etc.)

use std::process;

use wallet_ledger::cli::{self, Command};
use wallet_ledger::{http, logging, strategy, WalletLedger};

fn main() {
    let args = cli::parse_args();

    if let Err(e) = logging::init_logging(&args.log_level, args.log_format) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    let outcome = match args.command {
        Command::Serve(serve) => run_server(&serve.bind_address()),
        Command::Replay(replay) => {
            let config = matches!(replay.strategy, cli::StrategyType::Async)
                .then(|| replay.to_batch_config());
            let strategy = strategy::create_strategy(replay.strategy, config);

            let mut output = std::io::stdout();
            strategy.process(&replay.input_file, &mut output)
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_server(address: &str) -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

    runtime.block_on(http::serve(WalletLedger::in_memory(), address))
}
