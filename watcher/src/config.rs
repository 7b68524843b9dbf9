use alloy::primitives::{Address, address};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::{chain::LOCAL_CHAIN, errors::WatcherError};

/// Client and watcher settings, read from a TOML file. Every section is optional.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Settings {
    #[serde(default)]
    pub core: Core,
    #[serde(default)]
    pub contracts: Contracts,
    #[serde(default)]
    pub wallet: WalletSettings,
    #[serde(default)]
    pub explorer: Explorer,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Core {
    /// How often the chain head is polled for new blocks.
    pub block_poll_interval_ms: u64,
    /// How often contract values are re-read while a panel is live.
    pub value_poll_interval_ms: u64,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            block_poll_interval_ms: 1000,
            value_poll_interval_ms: 1000,
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Contracts {
    pub counter: Address,
    pub name_registry: Address,
}

impl Default for Contracts {
    fn default() -> Self {
        Self {
            counter: address!("5FbDB2315678afecb367f032d93F642f64180aa3"),
            name_registry: address!("Cf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9"),
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Connector {
    /// Key held by the client, transactions signed locally.
    #[default]
    Injected,
    /// Account managed by the RPC endpoint, transactions signed remotely.
    Remote,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct WalletSettings {
    pub connector: Connector,
    /// Endpoint the wallet session is opened against.
    pub rpc_url: String,
    /// Only used by the injected connector.
    pub private_key: String,
}

impl Default for WalletSettings {
    fn default() -> Self {
        Self {
            connector: Connector::Injected,
            rpc_url: LOCAL_CHAIN.rpc_url.to_string(),
            // anvil's first dev account
            private_key: "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
                .to_string(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct Explorer {
    pub url: String,
}

impl Default for Explorer {
    fn default() -> Self {
        Self {
            url: "https://etherscan.io".to_string(),
        }
    }
}

impl Explorer {
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.url.trim_end_matches('/'), tx_hash)
    }
}

impl Settings {
    /// Loads settings from a TOML file. A missing file yields the defaults.
    pub fn from_toml(path: &str) -> Result<Self, WatcherError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn from_str(toml_str: &str) -> Result<Self, WatcherError> {
        let config = Config::builder()
            .add_source(File::from_str(toml_str, FileFormat::Toml))
            .build()?;
        Ok(config.try_deserialize()?)
    }
}
