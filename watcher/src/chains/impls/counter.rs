use alloy::{dyn_abi::DynSolValue, primitives::U256};

use crate::errors::WatcherError;

/// Non-indexed part of `CounterIncremented` / `CounterDecremented`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterEvent {
    pub value: U256,
}

impl CounterEvent {
    pub fn from_decoded_body(event: &str, body: &[DynSolValue]) -> Result<Self, WatcherError> {
        match body {
            [DynSolValue::Uint(value, _)] => Ok(CounterEvent { value: *value }),
            _ => Err(WatcherError::UnexpectedValue {
                event: event.to_string(),
                param: "value",
                expected: "a single uint256",
            }),
        }
    }
}
