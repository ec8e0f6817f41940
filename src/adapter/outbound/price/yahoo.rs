//! Yahoo Finance chart client.
//!
//! Reads `chart.result[0].meta.regularMarketPrice` from the public v8 chart
//! endpoint. Unknown symbols and empty results map to `Ok(None)`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::outbound::price::PriceProvider;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// Yahoo rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; hindsight/0.1)";

/// Yahoo Finance price client.
#[derive(Debug, Clone)]
pub struct YahooPriceProvider {
    client: Client,
    base_url: String,
}

impl YahooPriceProvider {
    /// Create a client against `base_url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Connection(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}?interval=1m&range=1d",
            self.base_url,
            ticker.trim()
        )
    }
}

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

impl ChartEnvelope {
    fn price(&self) -> Option<f64> {
        self.chart
            .result
            .as_ref()?
            .first()?
            .meta
            .regular_market_price
            .filter(|p| p.is_finite() && *p > 0.0)
    }
}

#[async_trait]
impl PriceProvider for YahooPriceProvider {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn current_value(&self, ticker: &str) -> Result<Option<f64>> {
        let response = self.client.get(self.chart_url(ticker)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(ticker = %ticker, "Symbol not found");
            return Ok(None);
        }

        let envelope = response
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<ChartEnvelope>()
            .await?;

        Ok(envelope.price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_url_uses_trimmed_base_and_ticker() {
        let provider =
            YahooPriceProvider::new("https://example.test/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            provider.chart_url(" AAPL "),
            "https://example.test/v8/finance/chart/AAPL?interval=1m&range=1d"
        );
    }

    #[test]
    fn parses_regular_market_price() {
        let json = r#"{
            "chart": {
                "result": [
                    {"meta": {"currency": "USD", "symbol": "AAPL", "regularMarketPrice": 189.25}}
                ],
                "error": null
            }
        }"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.price(), Some(189.25));
    }

    #[test]
    fn null_result_is_unavailable() {
        let json = r#"{"chart": {"result": null, "error": {"code": "Not Found"}}}"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.price(), None);
    }

    #[test]
    fn missing_or_zero_price_is_unavailable() {
        let json = r#"{"chart": {"result": [{"meta": {"symbol": "X"}}]}}"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.price(), None);

        let json = r#"{"chart": {"result": [{"meta": {"regularMarketPrice": 0.0}}]}}"#;
        let envelope: ChartEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.price(), None);
    }
}
