use alloy::json_abi::{Event, JsonAbi};

use crate::errors::WatcherError;

pub const COUNTER_ABI: &str = include_str!("counter.json");
pub const NAME_REGISTRY_ABI: &str = include_str!("name_registry.json");

pub fn load_abi(abi_content: &str) -> Result<JsonAbi, WatcherError> {
    Ok(serde_json::from_str(abi_content)?)
}

/// Looks up the named events in `abi`, failing on the first one the interface does not declare.
pub fn event_signatures(abi: &JsonAbi, names: &[&str]) -> Result<Vec<Event>, WatcherError> {
    names
        .iter()
        .map(|name| {
            abi.event(name)
                .and_then(|overloads| overloads.first())
                .cloned()
                .ok_or_else(|| WatcherError::UnknownEvent(name.to_string()))
        })
        .collect()
}
