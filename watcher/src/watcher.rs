use std::{sync::Arc, time::Duration};

use tokio::{sync::watch, time::interval};
use tracing::{error, info};

use crate::{chains::traits::LogSource, reconstruct::EventReconstructor, types::DomainEvent};

pub type EventList = Arc<Vec<DomainEvent>>;

/// Holds the event list shown to the user. A refresh replaces it wholesale; a failed refresh
/// leaves the previous list in place.
pub struct EventFeed {
    reconstructor: EventReconstructor,
    events: watch::Sender<EventList>,
}

impl EventFeed {
    pub fn new(reconstructor: EventReconstructor) -> Self {
        let (events, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            reconstructor,
            events,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<EventList> {
        self.events.subscribe()
    }

    pub fn events(&self) -> EventList {
        self.events.borrow().clone()
    }

    /// Returns whether the displayed list was replaced.
    pub async fn refresh(&self) -> bool {
        match self.reconstructor.reconstruct().await {
            Ok(events) => {
                self.events.send_replace(Arc::new(events));
                true
            }
            Err(e) => {
                error!(
                    "Error fetching events for {}: {}",
                    self.reconstructor.contract_address(),
                    e
                );
                false
            }
        }
    }
}

/// Re-runs the feed's reconstruction once on start and again for every new chain head.
pub struct Watcher {
    feed: Arc<EventFeed>,
    source: Arc<dyn LogSource>,
    polling_interval: Duration,
    last_block: Option<u64>,
}

impl Watcher {
    pub fn new(feed: Arc<EventFeed>, source: Arc<dyn LogSource>, polling_interval: Duration) -> Self {
        Self {
            feed,
            source,
            polling_interval,
            last_block: None,
        }
    }

    pub async fn start(&mut self) {
        info!(
            "Starting event watcher for contract: {}",
            self.feed.reconstructor.contract_address()
        );

        self.spawn_refresh();

        let mut ticker = interval(self.polling_interval);
        loop {
            ticker.tick().await;
            match self.poll_head().await {
                Ok(true) => self.spawn_refresh(),
                Ok(false) => {}
                Err(e) => error!("Error polling chain head: {}", e),
            }
        }
    }

    /// Reads the chain head and reports whether it moved since the last poll.
    pub async fn poll_head(&mut self) -> Result<bool, crate::errors::WatcherError> {
        let latest_block = self.source.latest_block().await?;
        let is_new = self.last_block != Some(latest_block);
        if is_new {
            info!("New block: {}", latest_block);
            self.last_block = Some(latest_block);
        }
        Ok(is_new)
    }

    // Refreshes are not cancelled or sequenced: whichever finishes last wins.
    fn spawn_refresh(&self) {
        let feed = self.feed.clone();
        tokio::spawn(async move {
            feed.refresh().await;
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abi::event_signatures,
        chains::fixtures::{COUNTER_ADDRESS, MockSource, counter_log},
        types::ContractType,
    };
    use alloy::primitives::Address;
    use std::sync::atomic::Ordering;
    use tokio::time::timeout;

    fn counter_feed(source: Arc<MockSource>) -> EventFeed {
        EventFeed::new(
            EventReconstructor::for_contract(source, COUNTER_ADDRESS, ContractType::Counter)
                .unwrap(),
        )
    }

    fn counter_source(blocks: &[u64]) -> Arc<MockSource> {
        let abi = ContractType::Counter.abi().unwrap();
        let events = event_signatures(&abi, ContractType::Counter.event_names()).unwrap();
        let logs = blocks
            .iter()
            .map(|&block| counter_log(&events[0], Address::ZERO, block, block, block as u8))
            .collect();
        Arc::new(MockSource::with_logs(logs))
    }

    #[tokio::test]
    async fn test_refresh_replaces_events() {
        let source = counter_source(&[1, 2]);
        let feed = counter_feed(source);
        let mut updates = feed.subscribe();

        assert!(feed.events().is_empty());
        assert!(feed.refresh().await);

        assert!(updates.has_changed().unwrap());
        let blocks: Vec<u64> = updates
            .borrow_and_update()
            .iter()
            .map(|e| e.block_number)
            .collect();
        assert_eq!(blocks, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_events() {
        let source = counter_source(&[3, 4]);
        let feed = counter_feed(source.clone());
        assert!(feed.refresh().await);
        let before = feed.events();
        let mut updates = feed.subscribe();

        source.set_failing(true);
        assert!(!feed.refresh().await);

        assert!(!updates.has_changed().unwrap());
        assert_eq!(feed.events(), before);
        assert_eq!(feed.events().len(), 2);
    }

    #[tokio::test]
    async fn test_poll_head_reports_new_blocks_only() {
        let source = counter_source(&[5]);
        let feed = Arc::new(counter_feed(source.clone()));
        let mut watcher = Watcher::new(feed, source.clone(), Duration::from_millis(10));

        assert!(watcher.poll_head().await.unwrap());
        assert!(!watcher.poll_head().await.unwrap());

        source.set_head(6);
        assert!(watcher.poll_head().await.unwrap());
        assert!(!watcher.poll_head().await.unwrap());
    }

    #[tokio::test]
    async fn test_start_refreshes_on_mount() {
        let source = counter_source(&[7]);
        let feed = Arc::new(counter_feed(source.clone()));
        let mut updates = feed.subscribe();
        let mut watcher = Watcher::new(feed.clone(), source, Duration::from_secs(60));

        let handle = tokio::spawn(async move { watcher.start().await });
        updates.changed().await.unwrap();
        handle.abort();

        assert_eq!(feed.events().len(), 1);
        assert_eq!(feed.events()[0].block_number, 7);
    }

    #[tokio::test]
    async fn test_start_refreshes_on_new_head() {
        let source = counter_source(&[7, 8]);
        source.set_head(7);
        let feed = Arc::new(counter_feed(source.clone()));
        let mut updates = feed.subscribe();
        let mut watcher = Watcher::new(feed.clone(), source.clone(), Duration::from_millis(10));

        let handle = tokio::spawn(async move { watcher.start().await });
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow_and_update().len(), 1);
        let log_requests = source.log_requests.load(Ordering::SeqCst);

        source.set_head(8);
        let refreshed = timeout(Duration::from_secs(5), async {
            loop {
                updates.changed().await.unwrap();
                if updates.borrow_and_update().len() == 2 {
                    break;
                }
            }
        })
        .await;
        handle.abort();

        assert!(refreshed.is_ok());
        assert!(source.log_requests.load(Ordering::SeqCst) > log_requests);
    }

    #[tokio::test]
    async fn test_start_retries_after_head_failures() {
        let source = counter_source(&[9]);
        source.set_head_failing(true);
        let feed = Arc::new(counter_feed(source.clone()));
        let mut updates = feed.subscribe();
        let mut watcher = Watcher::new(feed.clone(), source.clone(), Duration::from_millis(10));

        let handle = tokio::spawn(async move { watcher.start().await });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!updates.has_changed().unwrap());
        assert!(feed.events().is_empty());

        source.set_head_failing(false);
        let refreshed = timeout(Duration::from_secs(5), updates.changed()).await;
        handle.abort();

        assert!(refreshed.is_ok());
        assert_eq!(feed.events().len(), 1);
        assert_eq!(feed.events()[0].block_number, 9);
    }
}
