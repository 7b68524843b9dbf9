use std::{fmt, str::FromStr};

use alloy::primitives::{Address, B256, U256};

use crate::{abi, errors::WatcherError};

/// The two contracts the client knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContractType {
    Counter,
    NameRegistry,
}

impl ContractType {
    pub fn to_str(&self) -> &'static str {
        match self {
            ContractType::Counter => "counter",
            ContractType::NameRegistry => "nameRegistry",
        }
    }

    /// Events whose logs make up this contract's history.
    pub fn event_names(&self) -> &'static [&'static str] {
        match self {
            ContractType::Counter => &["CounterIncremented", "CounterDecremented"],
            ContractType::NameRegistry => &["NameChanged"],
        }
    }

    pub fn abi(&self) -> Result<alloy::json_abi::JsonAbi, WatcherError> {
        match self {
            ContractType::Counter => abi::load_abi(abi::COUNTER_ABI),
            ContractType::NameRegistry => abi::load_abi(abi::NAME_REGISTRY_ABI),
        }
    }
}

impl fmt::Display for ContractType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

impl FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "counter" => Ok(ContractType::Counter),
            "registry" | "name-registry" | "nameRegistry" => Ok(ContractType::NameRegistry),
            other => Err(format!("unknown contract type: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Increment { value: U256 },
    Decrement { value: U256 },
    NameChange { old_name: String, new_name: String },
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Increment { .. } => "increment",
            EventKind::Decrement { .. } => "decrement",
            EventKind::NameChange { .. } => "name change",
        }
    }
}

/// A decoded contract event joined with the timestamp of the block it landed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEvent {
    pub kind: EventKind,
    pub transaction_hash: B256,
    pub block_number: u64,
    /// Seconds since the unix epoch.
    pub timestamp: u64,
    pub from: Address,
}

/// Orders events newest block first. Events of the same block keep their relative order.
pub fn sort_newest_first(events: &mut [DomainEvent]) {
    events.sort_by(|a, b| b.block_number.cmp(&a.block_number));
}
