use std::{sync::Arc, time::Duration};

use anyhow::Result;
use chrono::Utc;
use tokio::time::interval;
use tracing::{info, warn};
use watcher::{
    chain::LOCAL_CHAIN,
    chains::ethereum::EthereumChain,
    config::Settings,
    reconstruct::EventReconstructor,
    types::ContractType,
    view::render_events,
    watcher::{EventFeed, Watcher},
};

use crate::{
    cli::{Cli, Commands, CounterCommand, RegistryCommand},
    contracts::{RpcReader, counter::Counter, name_registry::NameRegistry},
    ui,
    wallet::{RpcWallet, Wallet},
};

/// Everything a command needs: the wallet session plus read access to the local chain.
pub struct Session {
    settings: Settings,
    wallet: RpcWallet,
    reader: RpcReader,
    source: Arc<EthereumChain>,
    counter: Counter,
    registry: NameRegistry,
}

impl Session {
    pub async fn connect(settings: Settings) -> Result<Self> {
        let source = Arc::new(EthereumChain::new(LOCAL_CHAIN.rpc_url).await?);
        let reader = RpcReader::new(source.client().clone());
        let wallet = RpcWallet::connect(&settings.wallet).await?;
        let counter = Counter::new(settings.contracts.counter)?;
        let registry = NameRegistry::new(settings.contracts.name_registry)?;

        Ok(Self {
            settings,
            wallet,
            reader,
            source,
            counter,
            registry,
        })
    }

    fn contract_address(&self, contract_type: ContractType) -> alloy::primitives::Address {
        match contract_type {
            ContractType::Counter => self.counter.address(),
            ContractType::NameRegistry => self.registry.address(),
        }
    }

    fn event_feed(&self, contract_type: ContractType) -> Result<Arc<EventFeed>> {
        let reconstructor = EventReconstructor::for_contract(
            self.source.clone(),
            self.contract_address(contract_type),
            contract_type,
        )?;
        Ok(Arc::new(EventFeed::new(reconstructor)))
    }

    /// Connection line and current contract values. Failed reads render as placeholders.
    async fn render_panel(&self, contract_type: ContractType) -> String {
        let chain_id = match self.wallet.chain_id().await {
            Ok(id) => Some(id),
            Err(e) => {
                warn!("Error reading wallet chain id: {}", e);
                None
            }
        };
        let mut out = ui::render_connection(self.wallet.account(), chain_id, &LOCAL_CHAIN);

        match contract_type {
            ContractType::Counter => {
                let value = self
                    .counter
                    .value(&self.reader)
                    .await
                    .inspect_err(|e| warn!("Error reading counter value: {}", e))
                    .ok();
                out.push_str(&ui::render_counter(value));
            }
            ContractType::NameRegistry => {
                let name = self
                    .registry
                    .name(&self.reader)
                    .await
                    .inspect_err(|e| warn!("Error reading name: {}", e))
                    .ok();
                let owner = self
                    .registry
                    .owner(&self.reader)
                    .await
                    .inspect_err(|e| warn!("Error reading owner: {}", e))
                    .ok();
                out.push_str(&ui::render_registry(name.as_deref(), owner));
            }
        }
        out
    }

    fn render_table(&self, feed: &EventFeed, contract_type: ContractType) -> String {
        render_events(
            &feed.events(),
            contract_type,
            &self.settings.explorer,
            Utc::now(),
        )
    }

    async fn show(&self, contract_type: ContractType) -> Result<()> {
        let feed = self.event_feed(contract_type)?;
        feed.refresh().await;
        println!("{}", self.render_panel(contract_type).await);
        println!("{}", self.render_table(&feed, contract_type));
        Ok(())
    }

    /// Live panel: values are re-read on a timer, the table is redrawn whenever the feed
    /// publishes a new list. Runs until Ctrl-C.
    async fn watch(&self, contract_type: ContractType) -> Result<()> {
        let feed = self.event_feed(contract_type)?;
        let mut updates = feed.subscribe();

        let mut watcher = Watcher::new(
            feed.clone(),
            self.source.clone(),
            Duration::from_millis(self.settings.core.block_poll_interval_ms),
        );
        let watcher_handle = tokio::spawn(async move { watcher.start().await });

        let mut ticker = interval(Duration::from_millis(
            self.settings.core.value_poll_interval_ms,
        ));
        let mut panel = String::new();
        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let latest = self.render_panel(contract_type).await;
                    if latest == panel {
                        continue;
                    }
                    panel = latest;
                }
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    updates.borrow_and_update();
                }
                _ = &mut shutdown => {
                    info!("Shutting down...");
                    break;
                }
            }
            redraw(&panel, &self.render_table(&feed, contract_type));
        }

        watcher_handle.abort();
        Ok(())
    }
}

fn redraw(panel: &str, table: &str) {
    // clear screen, cursor home
    print!("\x1B[2J\x1B[H");
    println!("{panel}\n{table}");
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::from_toml(&cli.config)?;
    if let Some(connector) = cli.connector {
        settings.wallet.connector = connector.into();
    }

    let mut session = Session::connect(settings).await?;

    match cli.command {
        Commands::Counter(command) => match command {
            CounterCommand::Show => session.show(ContractType::Counter).await?,
            CounterCommand::Increment => {
                let outcome = session
                    .counter
                    .increment(&mut session.wallet, &LOCAL_CHAIN)
                    .await?;
                print!(
                    "{}",
                    ui::render_outcome(
                        &outcome,
                        &LOCAL_CHAIN,
                        &session.settings.explorer,
                        session.settings.wallet.connector,
                    )
                );
            }
            CounterCommand::Decrement => {
                let outcome = session
                    .counter
                    .decrement(&mut session.wallet, &LOCAL_CHAIN)
                    .await?;
                print!(
                    "{}",
                    ui::render_outcome(
                        &outcome,
                        &LOCAL_CHAIN,
                        &session.settings.explorer,
                        session.settings.wallet.connector,
                    )
                );
            }
            CounterCommand::Watch => session.watch(ContractType::Counter).await?,
        },
        Commands::Registry(command) => match command {
            RegistryCommand::Show => session.show(ContractType::NameRegistry).await?,
            RegistryCommand::ChangeName(args) => {
                let outcome = session
                    .registry
                    .change_name(&mut session.wallet, &LOCAL_CHAIN, &args.name)
                    .await?;
                print!(
                    "{}",
                    ui::render_outcome(
                        &outcome,
                        &LOCAL_CHAIN,
                        &session.settings.explorer,
                        session.settings.wallet.connector,
                    )
                );
            }
            RegistryCommand::Watch => session.watch(ContractType::NameRegistry).await?,
        },
    }

    Ok(())
}
