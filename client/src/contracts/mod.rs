pub mod counter;
pub mod name_registry;

use alloy::{
    contract::{ContractInstance, Interface},
    dyn_abi::DynSolValue,
    primitives::{Address, B256, U256},
    providers::DynProvider,
};
use async_trait::async_trait;
use tracing::warn;
use watcher::chain::ChainConfig;

use crate::{errors::ClientError, wallet::Wallet};

/// One function invocation against a contract interface.
#[derive(Debug, Clone)]
pub struct ContractCall {
    pub to: Address,
    pub interface: Interface,
    pub function: &'static str,
    pub args: Vec<DynSolValue>,
    /// Native currency attached to the call, in base units.
    pub value: U256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Submitted(B256),
    /// The wallet was on another chain; a switch was requested and nothing was sent.
    SwitchRequested { from: u64, to: u64 },
}

#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn call(&self, call: &ContractCall) -> Result<Vec<DynSolValue>, ClientError>;
}

/// Read-only calls over the chain's public RPC endpoint.
pub struct RpcReader {
    client: DynProvider,
}

impl RpcReader {
    pub fn new(client: DynProvider) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChainReader for RpcReader {
    async fn call(&self, call: &ContractCall) -> Result<Vec<DynSolValue>, ClientError> {
        let contract: ContractInstance<DynProvider> =
            ContractInstance::new(call.to, self.client.clone(), call.interface.clone());
        Ok(contract.function(call.function, &call.args)?.call().await?)
    }
}

/// Sends `call` through `wallet` if it is on `chain`; otherwise asks the wallet to switch.
pub async fn guarded_write(
    wallet: &mut dyn Wallet,
    chain: &ChainConfig,
    call: ContractCall,
) -> Result<WriteOutcome, ClientError> {
    let current = wallet.chain_id().await?;
    if current != chain.id {
        warn!(
            "Wallet is on chain {}, requesting switch to {} ({}) instead of calling {}",
            current, chain.name, chain.id, call.function
        );
        wallet.switch_chain(chain).await?;
        return Ok(WriteOutcome::SwitchRequested {
            from: current,
            to: chain.id,
        });
    }

    let tx_hash = wallet.send(&call).await?;
    Ok(WriteOutcome::Submitted(tx_hash))
}

#[cfg(test)]
pub(crate) mod mocks {
    use std::{collections::HashMap, sync::Mutex};

    use super::*;

    pub struct MockWallet {
        pub chain_id: u64,
        pub switched_to: Vec<u64>,
        pub sent: Mutex<Vec<ContractCall>>,
    }

    impl MockWallet {
        pub fn on_chain(chain_id: u64) -> Self {
            Self {
                chain_id,
                switched_to: Vec::new(),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub fn sent(&self) -> Vec<ContractCall> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Wallet for MockWallet {
        fn account(&self) -> Address {
            Address::repeat_byte(0x11)
        }

        async fn chain_id(&self) -> Result<u64, ClientError> {
            Ok(self.chain_id)
        }

        async fn switch_chain(&mut self, chain: &ChainConfig) -> Result<(), ClientError> {
            self.switched_to.push(chain.id);
            Ok(())
        }

        async fn send(&self, call: &ContractCall) -> Result<B256, ClientError> {
            let mut sent = self.sent.lock().unwrap();
            sent.push(call.clone());
            Ok(B256::with_last_byte(sent.len() as u8))
        }
    }

    /// Answers reads with canned outputs keyed by function name.
    #[derive(Default)]
    pub struct MockReader {
        pub outputs: HashMap<&'static str, Vec<DynSolValue>>,
    }

    #[async_trait]
    impl ChainReader for MockReader {
        async fn call(&self, call: &ContractCall) -> Result<Vec<DynSolValue>, ClientError> {
            Ok(self.outputs.get(call.function).cloned().unwrap_or_default())
        }
    }
}
