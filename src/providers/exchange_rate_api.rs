use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::rates::{RateSnapshot, RateSource, RateTable};

/// Client for the exchangerate-api.com v6 `latest/USD` endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fxpick/1.0")
            .timeout(timeout)
            .build()?;
        Ok(ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }
}

/// The request URL carries the API key, so it never reaches the message.
fn transport_error(e: reqwest::Error) -> anyhow::Error {
    if e.is_timeout() {
        anyhow!("Request timed out fetching conversion rates")
    } else {
        anyhow!("Request error: {} fetching conversion rates", e.without_url())
    }
}

#[derive(Deserialize, Debug)]
struct LatestRatesResponse {
    result: Option<String>,
    #[serde(rename = "error-type")]
    error_type: Option<String>,
    time_next_update_unix: Option<i64>,
    conversion_rates: Option<HashMap<String, f64>>,
}

impl LatestRatesResponse {
    fn into_snapshot(self) -> Result<RateSnapshot> {
        if self.result.as_deref() == Some("error") {
            return Err(anyhow!(
                "Provider error: {}",
                self.error_type.as_deref().unwrap_or("unknown")
            ));
        }

        let next_update_unix = self
            .time_next_update_unix
            .ok_or_else(|| anyhow!("Response is missing time_next_update_unix"))?;
        let conversion_rates = self
            .conversion_rates
            .ok_or_else(|| anyhow!("Response is missing conversion_rates"))?;

        let rates: RateTable = conversion_rates
            .into_iter()
            .filter(|(symbol, rate)| {
                let usable = rate.is_finite() && *rate > 0.0;
                if !usable {
                    warn!("Dropping unusable rate {} for {}", rate, symbol);
                }
                usable
            })
            .collect();

        Ok(RateSnapshot {
            rates,
            next_update_unix,
        })
    }
}

#[async_trait]
impl RateSource for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base_url = %self.base_url))]
    async fn fetch_latest(&self) -> Result<RateSnapshot> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured for exchange rates (set providers.exchange_rate_api.api_key or {})",
                crate::core::config::API_KEY_ENV
            )
        })?;

        let url = format!("{}/v6/{}/latest/USD", self.base_url, api_key);
        debug!("Requesting latest USD rates from {}", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let detail = serde_json::from_str::<LatestRatesResponse>(&text)
                .ok()
                .and_then(|r| r.error_type)
                .map(|t| format!(" ({t})"))
                .unwrap_or_default();
            return Err(anyhow!(
                "HTTP error: {} fetching conversion rates{}",
                status,
                detail
            ));
        }

        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for conversion rates: {}", e))?;

        let snapshot = data.into_snapshot()?;
        debug!(
            entries = snapshot.rates.len(),
            next_update_unix = snapshot.next_update_unix,
            "Received conversion rates"
        );
        Ok(snapshot)
    }
}
