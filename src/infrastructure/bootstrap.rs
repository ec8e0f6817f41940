//! Composition root: wire adapters into application services.

use std::sync::Arc;

use crate::application::aggregation::engine::AggregationEngine;
use crate::application::registry::EventRegistry;
use crate::application::scheduler::TimeframeScheduler;
use crate::application::tracker::service::Tracker;
use crate::application::updater::ObservationUpdater;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::persistence::build_store;
use crate::infrastructure::factory::price::build_price_provider;
use crate::port::outbound::store::EventStore;

/// Application services sharing one event store.
pub struct Services {
    pub store: Arc<dyn EventStore>,
    pub registry: EventRegistry,
    pub updater: ObservationUpdater,
    pub scheduler: TimeframeScheduler,
    pub aggregation: AggregationEngine,
}

impl Services {
    /// Build every service around `store` using `config`.
    #[must_use]
    pub fn with_store(store: Arc<dyn EventStore>, config: &Config) -> Self {
        Self {
            registry: EventRegistry::new(store.clone()),
            updater: ObservationUpdater::new(store.clone())
                .with_retry(config.tracker.retry_policy()),
            scheduler: TimeframeScheduler::new(store.clone())
                .with_batch_limit(config.tracker.batch_limit),
            aggregation: AggregationEngine::new(store.clone()),
            store,
        }
    }

    /// Open the configured database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store: Arc<dyn EventStore> = Arc::new(build_store(config)?);
        Ok(Self::with_store(store, config))
    }

    /// Build the periodic tracker with the configured price provider.
    ///
    /// # Errors
    ///
    /// Returns an error if the price provider cannot be built.
    pub fn tracker(&self, config: &Config) -> Result<Tracker> {
        let prices = build_price_provider(config)?;
        Ok(Tracker::new(
            self.store.clone(),
            prices,
            config.tracker.clone(),
        ))
    }
}
