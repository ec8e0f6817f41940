//! Price provider factory.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::price::fixed::StaticPriceProvider;
use crate::adapter::outbound::price::yahoo::YahooPriceProvider;
use crate::error::Result;
use crate::infrastructure::config::price::PriceSource;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::price::PriceProvider;

/// Build the configured price provider.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_price_provider(config: &Config) -> Result<Arc<dyn PriceProvider>> {
    let provider: Arc<dyn PriceProvider> = match config.price.provider {
        PriceSource::Yahoo => Arc::new(YahooPriceProvider::new(
            &config.price.base_url,
            config.tracker.fetch_timeout(),
        )?),
        PriceSource::Static => Arc::new(
            config
                .price
                .static_prices
                .iter()
                .map(|(ticker, value)| (ticker.clone(), *value))
                .collect::<StaticPriceProvider>(),
        ),
    };

    info!(provider = provider.name(), "Price provider initialized");
    Ok(provider)
}
