//! Concurrent writers against a file-backed WAL database.

use std::sync::{Arc, Barrier};
use std::thread;

use chrono::{Duration, Utc};

use hindsight::application::registry::EventRegistry;
use hindsight::application::updater::ObservationUpdater;
use hindsight::domain::horizon::Horizon;
use hindsight::port::outbound::store::EventStore;
use hindsight::testkit::domain::event_at;
use hindsight::testkit::store::file_store;

const WRITERS: usize = 8;

#[test]
fn concurrent_updates_commit_exactly_once() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn EventStore> = Arc::new(file_store(dir.path(), WRITERS as u32));
    let registry = EventRegistry::new(store.clone());
    let id = registry
        .record(event_at("AAPL", 100.0, Utc::now() - Duration::hours(2)))
        .unwrap();

    let barrier = Arc::new(Barrier::new(WRITERS));
    let handles: Vec<_> = (0..WRITERS)
        .map(|i| {
            let updater = ObservationUpdater::new(store.clone());
            let barrier = barrier.clone();
            let id = id.clone();
            thread::spawn(move || {
                barrier.wait();
                updater.update(&id, Horizon::H1, 100.0 + i as f64).unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let committed: Vec<_> = results.iter().filter(|r| !r.already_recorded).collect();
    assert_eq!(committed.len(), 1, "exactly one writer should commit");

    let winner = committed[0];
    for result in &results {
        assert_eq!(result.change_pct, winner.change_pct);
        assert_eq!(result.outcome, winner.outcome);
    }

    let event = store.get(&id).unwrap().unwrap();
    assert_eq!(
        event.observation(Horizon::H1).unwrap().change_pct,
        winner.change_pct
    );
}

#[test]
fn concurrent_updates_on_different_horizons_all_land() {
    let dir = tempfile::tempdir().unwrap();
    let store: Arc<dyn EventStore> = Arc::new(file_store(dir.path(), 6));
    let registry = EventRegistry::new(store.clone());
    let id = registry
        .record(event_at("MSFT", 50.0, Utc::now() - Duration::days(8)))
        .unwrap();

    let handles: Vec<_> = Horizon::ALL
        .into_iter()
        .map(|horizon| {
            let updater = ObservationUpdater::new(store.clone());
            let id = id.clone();
            thread::spawn(move || updater.update(&id, horizon, 51.0).unwrap())
        })
        .collect();
    for handle in handles {
        assert!(!handle.join().unwrap().already_recorded);
    }

    let event = store.get(&id).unwrap().unwrap();
    assert!(Horizon::ALL.iter().all(|h| event.is_observed(*h)));
    assert!(event.momentum_score.is_some());
    assert!(event.final_outcome.is_some());
}
