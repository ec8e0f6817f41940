//! Fixed-map price provider.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::Result;
use crate::port::outbound::price::PriceProvider;

/// Serves prices from an in-memory map keyed by upper-case ticker.
///
/// Missing tickers report `None`. Prices can be changed while the tracker
/// is running, which the integration tests use to script market moves.
#[derive(Debug, Default)]
pub struct StaticPriceProvider {
    prices: RwLock<HashMap<String, f64>>,
}

impl StaticPriceProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with_price(self, ticker: &str, value: f64) -> Self {
        self.set(ticker, value);
        self
    }

    pub fn set(&self, ticker: &str, value: f64) {
        if let Ok(mut prices) = self.prices.write() {
            prices.insert(ticker.trim().to_ascii_uppercase(), value);
        }
    }

    pub fn remove(&self, ticker: &str) {
        if let Ok(mut prices) = self.prices.write() {
            prices.remove(&ticker.trim().to_ascii_uppercase());
        }
    }
}

impl FromIterator<(String, f64)> for StaticPriceProvider {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let provider = Self::new();
        for (ticker, value) in iter {
            provider.set(&ticker, value);
        }
        provider
    }
}

#[async_trait]
impl PriceProvider for StaticPriceProvider {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn current_value(&self, ticker: &str) -> Result<Option<f64>> {
        Ok(self
            .prices
            .read()
            .ok()
            .and_then(|prices| prices.get(&ticker.trim().to_ascii_uppercase()).copied()))
    }
}
