// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Luncheon Node
//!
//! Entry point for the `luncheon-node` binary. Parses CLI arguments,
//! initializes logging, and dispatches to the subcommand handlers.
//!
//! - `hash`   : identity hash of a JSON transaction
//! - `encode` : JSON to binary
//! - `decode` : binary to JSON
//! - `store`  : put/get transactions in the local sled store
//! - `reward` : accumulate a block reward and report its weight
//! - `version`: print build version information

mod cli;
mod commands;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{Commands, LuncheonNodeCli};
use logging::LogFormat;

fn main() -> Result<()> {
    let cli = LuncheonNodeCli::parse();

    logging::init_logging(
        "luncheon_node=info,luncheon_ledger=warn",
        LogFormat::from_str_lossy(&cli.log_format),
    );

    let output = match &cli.command {
        Commands::Hash(args) => commands::hash(args)?,
        Commands::Encode(args) => commands::encode(args)?,
        Commands::Decode(args) => commands::decode(args)?,
        Commands::Store(command) => commands::store(command)?,
        Commands::Reward(args) => commands::reward(args)?,
        Commands::Version => version_string(),
    };

    println!("{output}");
    Ok(())
}

fn version_string() -> String {
    format!(
        "luncheon-node {}\nhash function: {}\nwire format: v{}\nidentity preimage: v{}",
        env!("CARGO_PKG_VERSION"),
        luncheon_ledger::config::PRIMARY_HASH_FUNCTION,
        luncheon_ledger::config::WIRE_FORMAT_VERSION,
        luncheon_ledger::config::IDENTITY_PREIMAGE_VERSION,
    )
}
