//! Price provider configuration.

use std::collections::HashMap;

use serde::Deserialize;

use crate::adapter::outbound::price::yahoo::DEFAULT_BASE_URL;

/// Which [`PriceProvider`](crate::port::outbound::price::PriceProvider) to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    /// Yahoo Finance chart endpoint.
    #[default]
    Yahoo,
    /// Fixed prices from `[price.static_prices]`, for dry runs.
    Static,
}

/// Price provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceConfig {
    /// Provider to use. Defaults to Yahoo.
    #[serde(default)]
    pub provider: PriceSource,

    /// Base URL of the HTTP provider.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Ticker to price map served by the static provider.
    #[serde(default)]
    pub static_prices: HashMap<String, f64>,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            provider: PriceSource::default(),
            base_url: default_base_url(),
            static_prices: HashMap::new(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
