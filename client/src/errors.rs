use alloy::{primitives::utils::UnitsError, transports::TransportError};
use thiserror::Error;
use watcher::errors::WatcherError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("RPC error: {0}")]
    Rpc(#[from] TransportError),
    #[error("Contract call failed: {0}")]
    Contract(#[from] alloy::contract::Error),
    #[error("Invalid private key: {0}")]
    Signer(#[from] alloy::signers::local::LocalSignerError),
    #[error("Invalid amount: {0}")]
    Units(#[from] UnitsError),
    #[error(transparent)]
    Watcher(#[from] WatcherError),
    #[error("No account available at {0}")]
    NoAccount(String),
    #[error("Name must not be empty")]
    EmptyName,
    #[error("{function} returned an unexpected value, expected {expected}")]
    UnexpectedOutput {
        function: &'static str,
        expected: &'static str,
    },
}
