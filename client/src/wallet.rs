use std::str::FromStr;

use alloy::{
    contract::ContractInstance,
    primitives::{Address, B256},
    providers::{DynProvider, Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::info;
use watcher::{
    chain::ChainConfig,
    config::{Connector, WalletSettings},
};

use crate::{contracts::ContractCall, errors::ClientError};

/// An account session able to sign and submit contract calls.
#[async_trait]
pub trait Wallet: Send + Sync {
    fn account(&self) -> Address;

    /// Chain the session is currently connected to.
    async fn chain_id(&self) -> Result<u64, ClientError>;

    /// Asks the session to move to `chain`.
    async fn switch_chain(&mut self, chain: &ChainConfig) -> Result<(), ClientError>;

    async fn send(&self, call: &ContractCall) -> Result<B256, ClientError>;
}

enum Signer {
    Local(PrivateKeySigner),
    Remote,
}

/// Wallet session over JSON-RPC, either holding the key itself (`injected`) or delegating
/// signing to the endpoint's own account (`remote`).
pub struct RpcWallet {
    signer: Signer,
    account: Address,
    provider: DynProvider,
}

impl RpcWallet {
    pub async fn connect(settings: &WalletSettings) -> Result<Self, ClientError> {
        match settings.connector {
            Connector::Injected => {
                let signer = PrivateKeySigner::from_str(&settings.private_key)?;
                let provider = Self::signing_provider(&signer, &settings.rpc_url).await?;
                let account = signer.address();
                info!("Connected injected wallet {} at {}", account, settings.rpc_url);

                Ok(Self {
                    signer: Signer::Local(signer),
                    account,
                    provider,
                })
            }
            Connector::Remote => {
                let provider = ProviderBuilder::new()
                    .connect(&settings.rpc_url)
                    .await?
                    .erased();
                let account = provider
                    .get_accounts()
                    .await?
                    .first()
                    .copied()
                    .ok_or_else(|| ClientError::NoAccount(settings.rpc_url.clone()))?;
                info!("Connected remote wallet {} at {}", account, settings.rpc_url);

                Ok(Self {
                    signer: Signer::Remote,
                    account,
                    provider,
                })
            }
        }
    }

    async fn signing_provider(
        signer: &PrivateKeySigner,
        rpc_url: &str,
    ) -> Result<DynProvider, ClientError> {
        let provider = ProviderBuilder::new()
            .wallet(signer.clone())
            .connect(rpc_url)
            .await?;
        Ok(provider.erased())
    }
}

#[async_trait]
impl Wallet for RpcWallet {
    fn account(&self) -> Address {
        self.account
    }

    async fn chain_id(&self) -> Result<u64, ClientError> {
        Ok(self.provider.get_chain_id().await?)
    }

    async fn switch_chain(&mut self, chain: &ChainConfig) -> Result<(), ClientError> {
        info!("Switching wallet to {} ({})", chain.name, chain.id);
        match &self.signer {
            Signer::Local(signer) => {
                // only lasts for this session; the configured endpoint is used on the next run
                self.provider = Self::signing_provider(signer, chain.rpc_url).await?;
            }
            Signer::Remote => {
                let _: Value = self
                    .provider
                    .raw_request(
                        "wallet_switchEthereumChain".into(),
                        (json!({ "chainId": chain.hex_id() }),),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    async fn send(&self, call: &ContractCall) -> Result<B256, ClientError> {
        let contract: ContractInstance<DynProvider> =
            ContractInstance::new(call.to, self.provider.clone(), call.interface.clone());

        let pending = contract
            .function(call.function, &call.args)?
            .from(self.account)
            .value(call.value)
            .send()
            .await?;
        let tx_hash = *pending.tx_hash();

        info!("Submitted {} to {}: {}", call.function, call.to, tx_hash);
        Ok(tx_hash)
    }
}
