use alloy::{
    eips::BlockNumberOrTag,
    primitives::{Address, B256},
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::{Filter, Log},
};
use async_trait::async_trait;
use tracing::debug;

use crate::{chains::traits::LogSource, errors::WatcherError};

/// JSON-RPC backed [`LogSource`].
#[derive(Clone)]
pub struct EthereumChain {
    client: DynProvider,
}

impl EthereumChain {
    pub async fn new(rpc_url: &str) -> Result<Self, WatcherError> {
        let provider = ProviderBuilder::new().connect(rpc_url).await?;
        Ok(Self {
            client: provider.erased(),
        })
    }

    pub fn client(&self) -> &DynProvider {
        &self.client
    }
}

#[async_trait]
impl LogSource for EthereumChain {
    async fn latest_block(&self) -> Result<u64, WatcherError> {
        Ok(self.client.get_block_number().await?)
    }

    async fn get_logs(
        &self,
        address: Address,
        selector: B256,
        from_block: u64,
        to_block: u64,
    ) -> Result<Vec<Log>, WatcherError> {
        let filter = Filter::new()
            .address(address)
            .event_signature(selector)
            .from_block(from_block)
            .to_block(to_block);

        let logs = self.client.get_logs(&filter).await?;
        debug!(
            "Fetched {} logs for {} on {} in blocks {}..={}",
            logs.len(),
            selector,
            address,
            from_block,
            to_block
        );
        Ok(logs)
    }

    async fn get_block_timestamp(&self, block_number: u64) -> Result<u64, WatcherError> {
        let block = self
            .client
            .get_block_by_number(BlockNumberOrTag::Number(block_number))
            .await?
            .ok_or(WatcherError::BlockNotFound(block_number))?;
        Ok(block.header.timestamp)
    }
}
