//! Due-observation scheduling.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::domain::event::DueItem;
use crate::domain::horizon::Horizon;
use crate::error::Result;
use crate::port::outbound::store::EventStore;

/// Read-only query for (event, horizon) pairs awaiting observation.
pub struct TimeframeScheduler {
    store: Arc<dyn EventStore>,
    batch_limit: Option<usize>,
}

impl TimeframeScheduler {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            batch_limit: None,
        }
    }

    /// Cap the number of items returned per call.
    #[must_use]
    pub fn with_batch_limit(mut self, limit: usize) -> Self {
        self.batch_limit = Some(limit);
        self
    }

    /// Events whose `horizon` is unobserved, at least `horizon` old and at
    /// most `max_age` old, oldest baseline first.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn get_due(&self, horizon: Horizon, max_age: Duration) -> Result<Vec<DueItem>> {
        self.get_due_at(horizon, max_age, Utc::now())
    }

    /// [`get_due`](Self::get_due) with an explicit clock.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the query fails.
    pub fn get_due_at(
        &self,
        horizon: Horizon,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<DueItem>> {
        self.store.due(horizon, now, max_age, self.batch_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::registry::EventRegistry;
    use crate::testkit::domain::event_at;
    use crate::testkit::store::memory_store;

    #[test]
    fn due_items_are_oldest_first() {
        let store = memory_store();
        let registry = EventRegistry::new(store.clone());
        let now = Utc::now();
        let newer = registry
            .record(event_at("AAPL", 100.0, now - Duration::hours(2)))
            .unwrap();
        let older = registry
            .record(event_at("MSFT", 300.0, now - Duration::hours(5)))
            .unwrap();

        let due = TimeframeScheduler::new(store)
            .get_due_at(Horizon::H1, Duration::days(7), now)
            .unwrap();

        assert_eq!(due.len(), 2);
        assert_eq!(due[0].event_id, older);
        assert_eq!(due[0].ticker, "MSFT");
        assert_eq!(due[1].event_id, newer);
    }

    #[test]
    fn nothing_is_due_before_the_horizon_elapses() {
        let store = memory_store();
        let registry = EventRegistry::new(store.clone());
        let now = Utc::now();
        registry
            .record(event_at("AAPL", 100.0, now - Duration::minutes(10)))
            .unwrap();

        let scheduler = TimeframeScheduler::new(store);
        assert!(scheduler
            .get_due_at(Horizon::M15, Duration::days(7), now)
            .unwrap()
            .is_empty());
        assert_eq!(
            scheduler
                .get_due_at(Horizon::M15, Duration::days(7), now + Duration::minutes(5))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn batch_limit_caps_results() {
        let store = memory_store();
        let registry = EventRegistry::new(store.clone());
        let now = Utc::now();
        for i in 0..4 {
            registry
                .record(event_at("AAPL", 100.0, now - Duration::hours(i + 1)))
                .unwrap();
        }
        let due = TimeframeScheduler::new(store)
            .with_batch_limit(3)
            .get_due_at(Horizon::M30, Duration::days(7), now)
            .unwrap();
        assert_eq!(due.len(), 3);
    }
}
