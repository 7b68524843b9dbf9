use std::fmt::Write;

use alloy::{hex, primitives::{Address, U256}};
use watcher::{
    chain::ChainConfig,
    config::{Connector, Explorer},
    view::shorten,
};

use crate::contracts::WriteOutcome;

/// Account line plus the network warning when the wallet sits on another chain.
pub fn render_connection(account: Address, chain_id: Option<u64>, chain: &ChainConfig) -> String {
    let mut out = format!("Connected: {}\n", shorten(&account.to_checksum(None)));
    if chain_id.is_some_and(|id| id != chain.id) {
        let _ = writeln!(out, "Please switch to the {} network", chain.name);
    }
    out
}

pub fn render_counter(value: Option<U256>) -> String {
    let value = value.map(|v| v.to_string()).unwrap_or_else(|| "0".to_string());
    format!("Counter value: {value}\n")
}

pub fn render_registry(name: Option<&str>, owner: Option<Address>) -> String {
    let mut out = format!("Current Name: {}\n", name.unwrap_or("Loading..."));
    if let Some(owner) = owner {
        let _ = writeln!(out, "Contract Owner: {}", shorten(&owner.to_checksum(None)));
    }
    out
}

/// Result of a write. A switch request tells the user what makes the next run land on `chain`,
/// which depends on who controls the wallet's endpoint.
pub fn render_outcome(
    outcome: &WriteOutcome,
    chain: &ChainConfig,
    explorer: &Explorer,
    connector: Connector,
) -> String {
    match outcome {
        WriteOutcome::Submitted(tx_hash) => {
            let tx_hash = hex::encode_prefixed(tx_hash);
            format!(
                "Transaction submitted: {}\n{}\n",
                shorten(&tx_hash),
                explorer.tx_url(&tx_hash)
            )
        }
        WriteOutcome::SwitchRequested { from, to } => {
            let next_step = match connector {
                Connector::Injected => format!(
                    "Set [wallet] rpc_url to {} and run the command again.",
                    chain.rpc_url
                ),
                Connector::Remote => {
                    "Approve the switch on the node's wallet and run the command again."
                        .to_string()
                }
            };
            format!(
                "Wallet is on chain {from}; the {} network is chain {to}. {next_step}\n",
                chain.name
            )
        }
    }
}
