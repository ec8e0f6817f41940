//! Tracker ticks against a static price provider.

use std::sync::Arc;

use chrono::{Duration, Utc};

use hindsight::adapter::outbound::price::fixed::StaticPriceProvider;
use hindsight::application::registry::EventRegistry;
use hindsight::application::tracker::service::Tracker;
use hindsight::domain::horizon::Horizon;
use hindsight::domain::outcome::Outcome;
use hindsight::port::outbound::store::EventStore;
use hindsight::testkit::config::fast_tracker;
use hindsight::testkit::domain::event_at;
use hindsight::testkit::store::memory_store;

#[tokio::test]
async fn tick_fills_every_due_horizon_then_goes_quiet() {
    let store: Arc<dyn EventStore> = memory_store();
    let id = EventRegistry::new(store.clone())
        .record(event_at("AAPL", 100.0, Utc::now() - Duration::hours(5)))
        .unwrap();
    let prices = Arc::new(StaticPriceProvider::new().with_price("AAPL", 104.0));
    let tracker = Tracker::new(store.clone(), prices, fast_tracker());

    let summary = tracker.tick().await;
    assert_eq!(summary.due, 4);
    assert_eq!(summary.recorded, 4);

    let event = store.get(&id).unwrap().unwrap();
    for horizon in [Horizon::M15, Horizon::M30, Horizon::H1, Horizon::H4] {
        assert_eq!(event.observation(horizon).unwrap().outcome, Outcome::Win);
    }
    assert!(!event.is_observed(Horizon::D1));
    assert!(event.momentum_score.is_some());

    let second = tracker.tick().await;
    assert_eq!(second.due, 0);
}

#[tokio::test]
async fn unavailable_ticker_stays_due() {
    let store: Arc<dyn EventStore> = memory_store();
    EventRegistry::new(store.clone())
        .record(event_at("DELISTED", 10.0, Utc::now() - Duration::minutes(20)))
        .unwrap();
    let tracker = Tracker::new(
        store.clone(),
        Arc::new(StaticPriceProvider::new()),
        fast_tracker(),
    );

    let summary = tracker.tick().await;
    assert_eq!(summary.due, 1);
    assert_eq!(summary.unavailable, 1);
    assert_eq!(summary.recorded, 0);

    let again = tracker.tick().await;
    assert_eq!(again.due, 1);
}

#[tokio::test]
async fn started_tracker_stops_on_shutdown() {
    let store: Arc<dyn EventStore> = memory_store();
    let tracker = Tracker::new(
        store,
        Arc::new(StaticPriceProvider::new()),
        fast_tracker(),
    );

    let handle = tracker.start();
    tokio::time::timeout(std::time::Duration::from_secs(5), handle.shutdown())
        .await
        .expect("tracker should stop promptly");
}
