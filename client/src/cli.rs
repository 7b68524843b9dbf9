use clap::{Args, Parser, Subcommand, ValueEnum};
use watcher::config::Connector;

#[derive(Debug, Parser)]
#[command(name = "dapp-client")]
#[command(about = "Interact with the Counter and NameRegistry contracts on a local chain")]
#[command(version)]
pub struct Cli {
    /// Settings file; defaults apply when it does not exist.
    #[arg(long, default_value = "Settings.toml")]
    pub config: String,

    /// Overrides the wallet connector from the settings file.
    #[arg(long, value_enum)]
    pub connector: Option<ConnectorArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Counter contract.
    #[command(subcommand)]
    Counter(CounterCommand),
    /// NameRegistry contract.
    #[command(subcommand)]
    Registry(RegistryCommand),
}

#[derive(Debug, Subcommand)]
pub enum CounterCommand {
    /// Print the current value and the event history.
    Show,
    /// Send `increment()`.
    Increment,
    /// Send `decrement()`.
    Decrement,
    /// Keep the value and event history on screen, refreshed as the chain moves.
    Watch,
}

#[derive(Debug, Subcommand)]
pub enum RegistryCommand {
    /// Print the current name, owner and the event history.
    Show,
    /// Send `changeName(name)` with the 0.001 ETH fee.
    ChangeName(ChangeNameArgs),
    /// Keep the name and event history on screen, refreshed as the chain moves.
    Watch,
}

#[derive(Debug, Args)]
pub struct ChangeNameArgs {
    pub name: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConnectorArg {
    /// Sign with the private key from the settings file.
    Injected,
    /// Let the RPC endpoint sign with its own account.
    Remote,
}

impl From<ConnectorArg> for Connector {
    fn from(arg: ConnectorArg) -> Self {
        match arg {
            ConnectorArg::Injected => Connector::Injected,
            ConnectorArg::Remote => Connector::Remote,
        }
    }
}
