pub mod counter;
pub mod name_changed;

use alloy::{
    dyn_abi::{DecodedEvent, DynSolValue, EventExt},
    json_abi::Event,
    primitives::Address,
    rpc::types::Log,
};

use crate::{
    errors::WatcherError,
    types::{DomainEvent, EventKind},
};

use self::{counter::CounterEvent, name_changed::NameChangedEvent};

/// Decodes `log` against `event`: indexed arguments come from topics 1.., the rest from the data payload.
pub fn decode_log_with_event(event: &Event, log: &Log) -> Result<DecodedEvent, WatcherError> {
    let topics = log.topics();
    let selector = topics.first().ok_or(WatcherError::MissingField("topics"))?;
    if *selector != event.selector() {
        return Err(WatcherError::UnexpectedTopic(*selector));
    }

    event
        .decode_log(log.data())
        .map_err(|source| WatcherError::Decode {
            event: event.name.clone(),
            source,
        })
}

/// Builds the domain event for one log, given the timestamp of its block.
pub fn to_domain_event(
    event: &Event,
    log: &Log,
    timestamp: u64,
) -> Result<DomainEvent, WatcherError> {
    let block_number = log
        .block_number
        .ok_or(WatcherError::MissingField("block_number"))?;
    let transaction_hash = log
        .transaction_hash
        .ok_or(WatcherError::MissingField("transaction_hash"))?;

    let decoded = decode_log_with_event(event, log)?;
    let from = first_indexed_address(&event.name, &decoded)?;

    let kind = match event.name.as_str() {
        "CounterIncremented" => EventKind::Increment {
            value: CounterEvent::from_decoded_body(&event.name, &decoded.body)?.value,
        },
        "CounterDecremented" => EventKind::Decrement {
            value: CounterEvent::from_decoded_body(&event.name, &decoded.body)?.value,
        },
        "NameChanged" => {
            let changed = NameChangedEvent::from_decoded_body(&event.name, &decoded.body)?;
            EventKind::NameChange {
                old_name: changed.old_name,
                new_name: changed.new_name,
            }
        }
        other => return Err(WatcherError::UnknownEvent(other.to_string())),
    };

    Ok(DomainEvent {
        kind,
        transaction_hash,
        block_number,
        timestamp,
        from,
    })
}

fn first_indexed_address(event: &str, decoded: &DecodedEvent) -> Result<Address, WatcherError> {
    match decoded.indexed.first() {
        Some(DynSolValue::Address(address)) => Ok(*address),
        _ => Err(WatcherError::UnexpectedValue {
            event: event.to_string(),
            param: "from",
            expected: "an indexed address",
        }),
    }
}
