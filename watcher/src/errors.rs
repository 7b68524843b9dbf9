use alloy::{primitives::B256, transports::TransportError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
    #[error("Invalid contract interface: {0}")]
    Abi(#[from] serde_json::Error),
    #[error("Failed to decode {event} log: {source}")]
    Decode {
        event: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
    #[error("Block not found: {0}")]
    BlockNotFound(u64),
    #[error("Log is missing {0}")]
    MissingField(&'static str),
    #[error("Event {0} is not declared in the contract interface")]
    UnknownEvent(String),
    #[error("Log topic {0} does not match the requested event")]
    UnexpectedTopic(B256),
    #[error("{event}: expected {expected} for parameter `{param}`")]
    UnexpectedValue {
        event: String,
        param: &'static str,
        expected: &'static str,
    },
    #[error("Invalid settings: {0}")]
    Config(#[from] config::ConfigError),
}
