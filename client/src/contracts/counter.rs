use alloy::{
    contract::Interface,
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};
use watcher::{chain::ChainConfig, types::ContractType};

use super::{ChainReader, ContractCall, WriteOutcome, guarded_write};
use crate::{errors::ClientError, wallet::Wallet};

pub struct Counter {
    address: Address,
    interface: Interface,
}

impl Counter {
    pub fn new(address: Address) -> Result<Self, ClientError> {
        let abi = ContractType::Counter.abi()?;
        Ok(Self {
            address,
            interface: Interface::new(abi),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn call(&self, function: &'static str) -> ContractCall {
        ContractCall {
            to: self.address,
            interface: self.interface.clone(),
            function,
            args: Vec::new(),
            value: U256::ZERO,
        }
    }

    pub async fn value(&self, reader: &dyn ChainReader) -> Result<U256, ClientError> {
        match reader.call(&self.call("getValue")).await?.as_slice() {
            [DynSolValue::Uint(value, _)] => Ok(*value),
            _ => Err(ClientError::UnexpectedOutput {
                function: "getValue",
                expected: "uint256",
            }),
        }
    }

    pub async fn increment(
        &self,
        wallet: &mut dyn Wallet,
        chain: &ChainConfig,
    ) -> Result<WriteOutcome, ClientError> {
        guarded_write(wallet, chain, self.call("increment")).await
    }

    pub async fn decrement(
        &self,
        wallet: &mut dyn Wallet,
        chain: &ChainConfig,
    ) -> Result<WriteOutcome, ClientError> {
        guarded_write(wallet, chain, self.call("decrement")).await
    }
}
