//! Subcommand handlers.
//!
//! Each handler returns the text destined for stdout and leaves printing to
//! `main`, so handlers can be tested without capturing output.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use luncheon_ledger::storage::{KeyValueStore, LedgerDb};
use luncheon_ledger::{Hash, RewardTransaction, Transaction};

use crate::cli::{DecodeArgs, EncodeArgs, HashArgs, RewardArgs, StoreCommand, StoreLocation};

fn read_json_transaction(path: &Path) -> Result<Transaction> {
    let bytes =
        fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Transaction::from_json(&bytes)
        .with_context(|| format!("{} is not a JSON transaction", path.display()))
}

fn open_store(location: &StoreLocation) -> Result<LedgerDb> {
    fs::create_dir_all(&location.data_dir).with_context(|| {
        format!(
            "failed to create data directory: {}",
            location.data_dir.display()
        )
    })?;
    LedgerDb::open_named(&location.data_dir, &location.store).with_context(|| {
        format!(
            "failed to open store {} under {}",
            location.store,
            location.data_dir.display()
        )
    })
}

pub fn hash(args: &HashArgs) -> Result<String> {
    let tx = read_json_transaction(&args.input)?;
    Ok(tx.identity_hash().to_hex())
}

/// Writes the binary form to `--output` and returns its length, or returns
/// the binary form as hex.
pub fn encode(args: &EncodeArgs) -> Result<String> {
    let tx = read_json_transaction(&args.input)?;
    let bytes = tx.encode().context("failed to encode transaction")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), len = bytes.len(), "binary transaction written");
            Ok(format!("{} bytes", bytes.len()))
        }
        None => Ok(hex::encode(bytes)),
    }
}

pub fn decode(args: &DecodeArgs) -> Result<String> {
    let raw = fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let bytes = if args.hex {
        let text = String::from_utf8(raw).context("hex input is not UTF-8")?;
        hex::decode(text.trim()).context("invalid hex input")?
    } else {
        raw
    };

    let tx = Transaction::decode(&bytes)
        .with_context(|| format!("{} is not a binary transaction", args.input.display()))?;
    let json = tx.to_json().context("failed to render transaction as JSON")?;
    String::from_utf8(json).context("JSON output is not UTF-8")
}

pub fn store(command: &StoreCommand) -> Result<String> {
    match command {
        StoreCommand::Put { input, location } => {
            let tx = read_json_transaction(input)?;
            let db = open_store(location)?;
            let id = db
                .put_transaction(&tx)
                .context("failed to store transaction")?;
            db.flush().context("failed to flush store")?;
            tracing::info!(id = %id, store = %location.store, "transaction stored");
            Ok(id.to_hex())
        }
        StoreCommand::Get { id, location } => {
            let id: Hash = id
                .parse()
                .with_context(|| format!("invalid identity hash: {id}"))?;
            let db = open_store(location)?;
            let Some(tx) = db
                .get_transaction(&id)
                .context("failed to load transaction")?
            else {
                bail!("no transaction with identity {id}");
            };
            let json = tx.to_json().context("failed to render transaction as JSON")?;
            String::from_utf8(json).context("JSON output is not UTF-8")
        }
    }
}

/// Credits every fee and transaction, optionally finalizes, and reports the
/// reward as JSON together with its weight and wire size.
pub fn reward(args: &RewardArgs) -> Result<String> {
    let mut reward = RewardTransaction::new(args.base);

    for fee in &args.fees {
        reward.credit(*fee).context("failed to credit fee")?;
    }
    for path in &args.transactions {
        let tx = read_json_transaction(path)?;
        reward
            .credit_transaction(&tx)
            .with_context(|| format!("failed to credit {}", path.display()))?;
    }
    if let Some(miner) = &args.miner {
        let miner = hex::decode(miner).context("invalid miner address hex")?;
        reward.finalize(miner).context("failed to finalize reward")?;
    }

    let json = reward.to_json().context("failed to render reward as JSON")?;
    let summary = serde_json::json!({
        "reward": serde_json::from_slice::<serde_json::Value>(&json)?,
        "finalized": reward.is_finalized(),
        "weight": reward.weight()?,
        "wire_size": reward.wire_size()?,
    });
    Ok(serde_json::to_string_pretty(&summary)?)
}
