use alloy::{
    contract::Interface,
    dyn_abi::DynSolValue,
    primitives::{Address, U256},
};
use watcher::{chain::ChainConfig, types::ContractType};

use super::{ChainReader, ContractCall, WriteOutcome, guarded_write};
use crate::{errors::ClientError, wallet::Wallet};

/// Price of `changeName`, in the chain's native currency.
pub const NAME_CHANGE_FEE: &str = "0.001";

pub struct NameRegistry {
    address: Address,
    interface: Interface,
}

impl NameRegistry {
    pub fn new(address: Address) -> Result<Self, ClientError> {
        let abi = ContractType::NameRegistry.abi()?;
        Ok(Self {
            address,
            interface: Interface::new(abi),
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    fn call(&self, function: &'static str, args: Vec<DynSolValue>, value: U256) -> ContractCall {
        ContractCall {
            to: self.address,
            interface: self.interface.clone(),
            function,
            args,
            value,
        }
    }

    pub async fn name(&self, reader: &dyn ChainReader) -> Result<String, ClientError> {
        let call = self.call("getName", Vec::new(), U256::ZERO);
        match reader.call(&call).await?.as_slice() {
            [DynSolValue::String(name)] => Ok(name.clone()),
            _ => Err(ClientError::UnexpectedOutput {
                function: "getName",
                expected: "string",
            }),
        }
    }

    pub async fn owner(&self, reader: &dyn ChainReader) -> Result<Address, ClientError> {
        let call = self.call("owner", Vec::new(), U256::ZERO);
        match reader.call(&call).await?.as_slice() {
            [DynSolValue::Address(owner)] => Ok(*owner),
            _ => Err(ClientError::UnexpectedOutput {
                function: "owner",
                expected: "address",
            }),
        }
    }

    /// Calls `changeName(new_name)` with the fixed fee attached.
    pub async fn change_name(
        &self,
        wallet: &mut dyn Wallet,
        chain: &ChainConfig,
        new_name: &str,
    ) -> Result<WriteOutcome, ClientError> {
        if new_name.is_empty() {
            return Err(ClientError::EmptyName);
        }

        let fee = chain.parse_native(NAME_CHANGE_FEE)?;
        let call = self.call(
            "changeName",
            vec![DynSolValue::String(new_name.to_string())],
            fee,
        );
        guarded_write(wallet, chain, call).await
    }
}
