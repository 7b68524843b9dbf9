use std::sync::Arc;

use alloy::{json_abi::Event, primitives::Address, rpc::types::Log};
use futures::future::try_join_all;
use tracing::debug;

use crate::{
    abi::event_signatures,
    chains::{impls::to_domain_event, traits::LogSource},
    errors::WatcherError,
    types::{ContractType, DomainEvent, sort_newest_first},
};

/// First block of every scan. Local chains are short, so the whole history is read each time.
pub const GENESIS_BLOCK: u64 = 0;

/// Rebuilds one contract's event history from raw logs.
pub struct EventReconstructor {
    source: Arc<dyn LogSource>,
    contract_address: Address,
    events: Vec<Event>,
}

impl EventReconstructor {
    pub fn new(source: Arc<dyn LogSource>, contract_address: Address, events: Vec<Event>) -> Self {
        Self {
            source,
            contract_address,
            events,
        }
    }

    /// Reconstructor for the events `contract_type` declares in its interface.
    pub fn for_contract(
        source: Arc<dyn LogSource>,
        contract_address: Address,
        contract_type: ContractType,
    ) -> Result<Self, WatcherError> {
        let abi = contract_type.abi()?;
        let events = event_signatures(&abi, contract_type.event_names())?;
        Ok(Self::new(source, contract_address, events))
    }

    pub fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Fetches every matching log up to the current head, stamps it with its block time and
    /// returns the decoded events newest block first. The first failed request or decode
    /// aborts the whole run.
    pub async fn reconstruct(&self) -> Result<Vec<DomainEvent>, WatcherError> {
        let latest_block = self.source.latest_block().await?;

        let batches = try_join_all(
            self.events
                .iter()
                .map(|event| self.fetch_event(event, latest_block)),
        )
        .await?;

        let mut events: Vec<DomainEvent> = batches.into_iter().flatten().collect();
        sort_newest_first(&mut events);

        debug!(
            "Reconstructed {} events for {} up to block {}",
            events.len(),
            self.contract_address,
            latest_block
        );
        Ok(events)
    }

    async fn fetch_event(
        &self,
        event: &Event,
        to_block: u64,
    ) -> Result<Vec<DomainEvent>, WatcherError> {
        let logs = self
            .source
            .get_logs(
                self.contract_address,
                event.selector(),
                GENESIS_BLOCK,
                to_block,
            )
            .await?;

        try_join_all(logs.iter().map(|log| self.process_log(event, log))).await
    }

    async fn process_log(&self, event: &Event, log: &Log) -> Result<DomainEvent, WatcherError> {
        let block_number = log
            .block_number
            .ok_or(WatcherError::MissingField("block_number"))?;
        let timestamp = self.source.get_block_timestamp(block_number).await?;
        to_domain_event(event, log, timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        chains::fixtures::{
            COUNTER_ADDRESS, GENESIS_TIMESTAMP, MockSource, counter_log, name_changed_log,
        },
        types::EventKind,
    };
    use alloy::primitives::{U256, address};
    use std::sync::atomic::Ordering;

    const ALICE: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn counter_events() -> Vec<Event> {
        let abi = ContractType::Counter.abi().unwrap();
        event_signatures(&abi, ContractType::Counter.event_names()).unwrap()
    }

    fn reconstructor(source: Arc<MockSource>) -> EventReconstructor {
        EventReconstructor::for_contract(source, COUNTER_ADDRESS, ContractType::Counter).unwrap()
    }

    #[tokio::test]
    async fn test_orders_events_by_block_descending() {
        let events = counter_events();
        let source = Arc::new(MockSource::with_logs(vec![
            counter_log(&events[0], ALICE, 1, 5, 1),
            counter_log(&events[0], ALICE, 2, 3, 2),
            counter_log(&events[0], ALICE, 3, 9, 3),
        ]));

        let reconstructed = reconstructor(source).reconstruct().await.unwrap();

        let blocks: Vec<u64> = reconstructed.iter().map(|e| e.block_number).collect();
        assert_eq!(blocks, vec![9, 5, 3]);
    }

    #[tokio::test]
    async fn test_merges_increments_and_decrements() {
        let events = counter_events();
        let source = Arc::new(MockSource::with_logs(vec![
            counter_log(&events[0], ALICE, 1, 10, 0x10),
            counter_log(&events[0], ALICE, 2, 12, 0x12),
            counter_log(&events[1], ALICE, 1, 11, 0x11),
        ]));

        let reconstructed = reconstructor(source.clone()).reconstruct().await.unwrap();

        let summary: Vec<(&str, u64)> = reconstructed
            .iter()
            .map(|e| (e.kind.label(), e.block_number))
            .collect();
        assert_eq!(
            summary,
            vec![("increment", 12), ("decrement", 11), ("increment", 10)]
        );
        assert_eq!(reconstructed[0].timestamp, GENESIS_TIMESTAMP + 12);
        assert_eq!(reconstructed[1].kind, EventKind::Decrement { value: U256::from(1) });

        // one getLogs per signature, one block lookup per log
        assert_eq!(source.log_requests.load(Ordering::SeqCst), 2);
        assert_eq!(source.block_requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_ignores_logs_after_head_and_other_contracts() {
        let events = counter_events();
        let mut foreign = counter_log(&events[0], ALICE, 1, 2, 0x02);
        foreign.inner.address = address!("Cf7Ed3AccA5a467e9e704C703E8D87F634fB0Fc9");
        let source = Arc::new(MockSource::with_logs(vec![
            counter_log(&events[0], ALICE, 1, 1, 0x01),
            foreign,
            counter_log(&events[0], ALICE, 1, 8, 0x08),
        ]));
        source.set_head(4);

        let reconstructed = reconstructor(source).reconstruct().await.unwrap();

        assert_eq!(reconstructed.len(), 1);
        assert_eq!(reconstructed[0].block_number, 1);
    }

    #[tokio::test]
    async fn test_empty_history() {
        let source = Arc::new(MockSource::default());
        let reconstructed = reconstructor(source).reconstruct().await.unwrap();
        assert!(reconstructed.is_empty());
    }

    #[tokio::test]
    async fn test_log_fetch_failure_aborts() {
        let events = counter_events();
        let source = Arc::new(MockSource::with_logs(vec![counter_log(
            &events[0], ALICE, 1, 1, 1,
        )]));
        source.set_failing(true);

        let err = reconstructor(source).reconstruct().await.unwrap_err();
        assert!(matches!(err, WatcherError::Rpc(_)));
    }

    #[tokio::test]
    async fn test_head_fetch_failure_aborts() {
        let events = counter_events();
        let source = Arc::new(MockSource::with_logs(vec![counter_log(
            &events[0], ALICE, 1, 1, 1,
        )]));
        source.set_head_failing(true);

        let err = reconstructor(source.clone()).reconstruct().await.unwrap_err();
        assert!(matches!(err, WatcherError::Rpc(_)));
        assert_eq!(source.log_requests.load(Ordering::SeqCst), 0);
        assert_eq!(source.block_requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_block_aborts() {
        let events = counter_events();
        let mut source = MockSource::with_logs(vec![
            counter_log(&events[0], ALICE, 1, 1, 1),
            counter_log(&events[1], ALICE, 0, 2, 2),
        ]);
        source.missing_blocks.insert(2);

        let err = reconstructor(Arc::new(source)).reconstruct().await.unwrap_err();
        assert!(matches!(err, WatcherError::BlockNotFound(2)));
    }

    #[tokio::test]
    async fn test_name_registry_history() {
        let abi = ContractType::NameRegistry.abi().unwrap();
        let name_changed = event_signatures(&abi, &["NameChanged"]).unwrap().remove(0);
        let source = Arc::new(MockSource::with_logs(vec![
            name_changed_log(&name_changed, ALICE, "", "alice", 2, 0x02),
            name_changed_log(&name_changed, ALICE, "alice", "bob", 6, 0x06),
        ]));

        let reconstructed =
            EventReconstructor::for_contract(source, COUNTER_ADDRESS, ContractType::NameRegistry)
                .unwrap()
                .reconstruct()
                .await
                .unwrap();

        assert_eq!(
            reconstructed
                .iter()
                .map(|e| e.kind.clone())
                .collect::<Vec<_>>(),
            vec![
                EventKind::NameChange {
                    old_name: "alice".to_string(),
                    new_name: "bob".to_string()
                },
                EventKind::NameChange {
                    old_name: String::new(),
                    new_name: "alice".to_string()
                },
            ]
        );
    }
}
