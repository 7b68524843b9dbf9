use alloy::{
    primitives::{Address, B256},
    rpc::types::Log,
};
use async_trait::async_trait;

use crate::errors::WatcherError;

/// Read-only access to the chain data the event history is rebuilt from.
#[async_trait]
pub trait LogSource: Send + Sync {
    async fn latest_block(&self) -> Result<u64, WatcherError>;

    /// All logs emitted by `address` whose topic 0 is `selector`, in `[from_block, to_block]`.
    async fn get_logs(
        &self,
        address: Address,
        selector: B256,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<Log>, WatcherError>;

    async fn get_block_timestamp(&self, block_number: u64) -> Result<u64, WatcherError>;
}
