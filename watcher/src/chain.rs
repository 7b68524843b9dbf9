use alloy::primitives::{
    U256,
    utils::{UnitsError, parse_units},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Static description of the network the client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainConfig {
    pub id: u64,
    pub name: &'static str,
    pub rpc_url: &'static str,
    pub native_currency: NativeCurrency,
}

/// The local development chain (anvil defaults).
pub const LOCAL_CHAIN: ChainConfig = ChainConfig {
    id: 31_337,
    name: "Anvil",
    rpc_url: "http://127.0.0.1:8545",
    native_currency: NativeCurrency {
        name: "Ether",
        symbol: "ETH",
        decimals: 18,
    },
};

impl ChainConfig {
    /// Chain id in the `0x`-prefixed form wallets expect.
    pub fn hex_id(&self) -> String {
        format!("0x{:x}", self.id)
    }

    /// Converts a human amount of the native currency (e.g. `"0.001"`) to base units.
    pub fn parse_native(&self, amount: &str) -> Result<U256, UnitsError> {
        parse_units(amount, self.native_currency.decimals).map(|units| units.get_absolute())
    }
}
