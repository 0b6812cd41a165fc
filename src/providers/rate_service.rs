use async_trait::async_trait;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::model::RatePoint;
use crate::core::rate::RateProvider;

/// Adapter for the internal rate service.
///
/// The service answers `GET /rate/{CODE}` with a mapping from currency code
/// to rate. The response may carry entries for other currencies; only the
/// requested one is read, the rest are ignored.
pub struct RateService {
    base_url: String,
}

impl RateService {
    pub fn new(base_url: &str) -> Self {
        RateService {
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl RateProvider for RateService {
    #[instrument(
        name = "RateFetch",
        skip(self),
        fields(currency = %currency)
    )]
    async fn fetch_rate(&self, currency: CurrencyCode) -> Result<RatePoint, FeedError> {
        let url = format!("{}/rate/{}", self.base_url, currency);
        debug!("Requesting exchange rate from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .build()
            .map_err(|e| FeedError::rate_unavailable(currency, e))?;

        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::rate_unavailable(currency, format!("request error: {e}")))?;

        if !response.status().is_success() {
            return Err(FeedError::rate_unavailable(
                currency,
                format!("HTTP {}", response.status()),
            ));
        }

        let rates: HashMap<String, f64> = response
            .json()
            .await
            .map_err(|e| FeedError::rate_unavailable(currency, format!("malformed payload: {e}")))?;

        let rate = rates
            .get(&currency.to_string())
            .copied()
            .ok_or_else(|| FeedError::rate_unavailable(currency, "no entry in rate response"))?;

        if !rate.is_finite() || rate <= 0.0 {
            return Err(FeedError::rate_unavailable(
                currency,
                format!("non-positive rate {rate}"),
            ));
        }

        debug!("Fetched rate for {}: {}", currency, rate);

        Ok(RatePoint {
            currency,
            rate_to_reference: rate,
        })
    }
}
