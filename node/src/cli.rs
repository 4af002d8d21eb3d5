//! # CLI Interface
//!
//! Defines the command-line argument structure for `luncheon-node` using
//! `clap` derive. Subcommands: `hash`, `encode`, `decode`, `store`,
//! `reward` and `version`.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use luncheon_ledger::config::{BASE_BLOCK_SUBSIDY, DEFAULT_STORE_ROOT, DEFAULT_TX_STORE};

/// Luncheon ledger operator tool.
///
/// Computes transaction identities, converts between the JSON and binary
/// encodings, and reads or writes the local transaction store.
#[derive(Parser, Debug)]
#[command(
    name = "luncheon-node",
    about = "Luncheon ledger operator tool",
    version,
    propagate_version = true
)]
pub struct LuncheonNodeCli {
    /// Log output format: "pretty" or "json". Logs go to stderr.
    #[arg(long, global = true, env = "LUNCHEON_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the identity hash of a JSON-encoded transaction.
    Hash(HashArgs),
    /// Convert a JSON-encoded transaction to its binary form.
    Encode(EncodeArgs),
    /// Convert a binary-encoded transaction to JSON.
    Decode(DecodeArgs),
    /// Read or write the local transaction store.
    #[command(subcommand)]
    Store(StoreCommand),
    /// Build a reward transaction and report its weight.
    Reward(RewardArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `hash` subcommand.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// JSON transaction file.
    pub input: PathBuf,
}

/// Arguments for the `encode` subcommand.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// JSON transaction file.
    pub input: PathBuf,

    /// Where to write the binary form. Prints hex to stdout when omitted.
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

/// Arguments for the `decode` subcommand.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Binary transaction file.
    pub input: PathBuf,

    /// Treat the file contents as hex text instead of raw bytes.
    #[arg(long)]
    pub hex: bool,
}

/// Location of the transaction store.
#[derive(Args, Debug)]
pub struct StoreLocation {
    /// Root directory holding the named stores.
    #[arg(long, short = 'd', env = "LUNCHEON_DATA_DIR", default_value = DEFAULT_STORE_ROOT)]
    pub data_dir: PathBuf,

    /// Store name under the data directory.
    #[arg(long, default_value = DEFAULT_TX_STORE)]
    pub store: String,
}

/// `store` subcommands.
#[derive(Subcommand, Debug)]
pub enum StoreCommand {
    /// Store a JSON transaction under its identity hash.
    Put {
        /// JSON transaction file.
        input: PathBuf,

        #[command(flatten)]
        location: StoreLocation,
    },
    /// Print the stored transaction with the given identity hash as JSON.
    Get {
        /// Identity hash, 64 hex characters.
        id: String,

        #[command(flatten)]
        location: StoreLocation,
    },
}

/// Arguments for the `reward` subcommand.
#[derive(Args, Debug)]
pub struct RewardArgs {
    /// Starting subsidy before fees.
    #[arg(long, default_value_t = BASE_BLOCK_SUBSIDY)]
    pub base: u64,

    /// Fee to credit. Repeatable.
    #[arg(long = "fee")]
    pub fees: Vec<u64>,

    /// JSON transaction file whose fee is credited. Repeatable.
    #[arg(long = "tx")]
    pub transactions: Vec<PathBuf>,

    /// Hex-encoded recipient address. The reward is left unfinalized when
    /// omitted.
    #[arg(long)]
    pub miner: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli_structure() {
        // Ensures the derive macros produce a valid CLI definition.
        LuncheonNodeCli::command().debug_assert();
    }

    #[test]
    fn parses_reward_flags() {
        let cli = LuncheonNodeCli::try_parse_from([
            "luncheon-node",
            "reward",
            "--base",
            "10",
            "--fee",
            "1",
            "--fee",
            "2",
            "--miner",
            "ab",
        ])
        .unwrap();
        match cli.command {
            Commands::Reward(args) => {
                assert_eq!(args.base, 10);
                assert_eq!(args.fees, vec![1, 2]);
                assert_eq!(args.miner.as_deref(), Some("ab"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn store_defaults() {
        let cli =
            LuncheonNodeCli::try_parse_from(["luncheon-node", "store", "get", "00"]).unwrap();
        match cli.command {
            Commands::Store(StoreCommand::Get { location, .. }) => {
                assert_eq!(location.store, DEFAULT_TX_STORE);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
