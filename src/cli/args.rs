use crate::logging::LogFormat;
use crate::strategy::BatchConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Wallet ledger: serve the HTTP API or replay a command file
#[derive(Parser, Debug)]
#[command(name = "wallet-ledger", version, propagate_version = true)]
#[command(about = "Concurrency-safe wallet ledger", long_about = None)]
pub struct CliArgs {
    /// Default log filter when RUST_LOG is unset
    #[arg(
        long,
        global = true,
        env = "WALLET_LOG_LEVEL",
        default_value = "info",
        value_name = "FILTER"
    )]
    pub log_level: String,

    /// Log output format
    #[arg(
        long,
        global = true,
        env = "WALLET_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Pretty
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Apply a CSV command file to an empty ledger and print the final balances
    Replay(ReplayArgs),
}

/// Arguments for the `serve` subcommand
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "WALLET_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "WALLET_PORT", default_value_t = 8080)]
    pub port: u16,
}

impl ServeArgs {
    /// `host:port` string suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Arguments for the `replay` subcommand
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Input CSV file with `type,wallet,amount` rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Replay strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Replay strategy: 'sync' for sequential or 'async' for parallel batches"
    )]
    pub strategy: StrategyType,

    /// Number of commands per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of commands per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker threads (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Worker threads for parallel replay (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

/// Available replay strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl ReplayArgs {
    /// Build a BatchConfig from the arguments, defaulting what is absent
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_none() && self.max_concurrent_batches.is_none() {
            return BatchConfig::default();
        }

        let default = BatchConfig::default();
        BatchConfig::new(
            self.batch_size.unwrap_or(default.batch_size),
            self.max_concurrent_batches
                .unwrap_or(default.max_concurrent_batches),
        )
    }
}
