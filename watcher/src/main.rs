use std::{env, sync::Arc, time::Duration};

use chrono::Utc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};
use watcher::{
    chain::LOCAL_CHAIN,
    chains::ethereum::EthereumChain,
    config::Settings,
    reconstruct::EventReconstructor,
    types::ContractType,
    view::render_events,
    watcher::{EventFeed, Watcher},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    let args: Vec<String> = env::args().collect();

    let local_config = if args.contains(&"--local".to_string()) {
        "local_config.toml"
    } else {
        "Settings.toml"
    };

    let contract_type: ContractType = args
        .iter()
        .skip(1)
        .find(|arg| !arg.starts_with("--"))
        .map(|arg| arg.parse::<ContractType>())
        .transpose()
        .map_err(|e: String| anyhow::anyhow!(e))?
        .unwrap_or(ContractType::Counter);

    let settings = Settings::from_toml(local_config)?;
    info!("Loaded configuration: {:#?}", settings);

    let contract_address = match contract_type {
        ContractType::Counter => settings.contracts.counter,
        ContractType::NameRegistry => settings.contracts.name_registry,
    };

    let source = Arc::new(EthereumChain::new(LOCAL_CHAIN.rpc_url).await?);
    let reconstructor =
        EventReconstructor::for_contract(source.clone(), contract_address, contract_type)?;
    let feed = Arc::new(EventFeed::new(reconstructor));
    let mut updates = feed.subscribe();

    let mut watcher = Watcher::new(
        feed,
        source,
        Duration::from_millis(settings.core.block_poll_interval_ms),
    );
    tokio::spawn(async move { watcher.start().await });

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let events = updates.borrow_and_update().clone();
                println!(
                    "{}",
                    render_events(&events, contract_type, &settings.explorer, Utc::now())
                );
            }
            _ = &mut shutdown => {
                info!("Shutting down...");
                break;
            }
        }
    }

    Ok(())
}
