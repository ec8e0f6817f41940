//! Scripted price providers.

use std::sync::Arc;

use crate::adapter::outbound::price::fixed::StaticPriceProvider;
use crate::port::outbound::price::PriceProvider;

/// Provider serving `entries`; every other ticker reports no value.
pub fn fixed_prices(entries: &[(&str, f64)]) -> Arc<dyn PriceProvider> {
    let provider = StaticPriceProvider::new();
    for (ticker, value) in entries {
        provider.set(ticker, *value);
    }
    Arc::new(provider)
}
