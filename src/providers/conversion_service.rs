use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::convert::ConversionProvider;
use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::model::ConversionResult;

/// Adapter for the internal conversion service.
///
/// Input is validated locally before any request is issued; validation
/// failures never touch the network. The service performs the arithmetic and
/// its `converted_amount` is returned verbatim.
pub struct ConversionService {
    base_url: String,
}

impl ConversionService {
    pub fn new(base_url: &str) -> Self {
        ConversionService {
            base_url: base_url.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    converted_amount: f64,
}

#[async_trait]
impl ConversionProvider for ConversionService {
    #[instrument(
        name = "ConversionRequest",
        skip(self),
        fields(from = %from, to = %to, amount)
    )]
    async fn convert(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: f64,
    ) -> Result<ConversionResult, FeedError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(FeedError::InvalidAmount { amount });
        }
        if from == to {
            return Err(FeedError::SameCurrency { currency: from });
        }

        let url = format!("{}/convert", self.base_url);
        debug!("Requesting conversion from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .build()
            .map_err(|e| FeedError::conversion_failed(e))?;

        let response = client
            .get(&url)
            .query(&[
                ("from_currency", from.to_string()),
                ("to_currency", to.to_string()),
                ("amount", amount.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::conversion_failed(format!("request error: {e}")))?;

        if !response.status().is_success() {
            return Err(FeedError::conversion_failed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let payload: ConversionResponse = response
            .json()
            .await
            .map_err(|e| FeedError::conversion_failed(format!("malformed payload: {e}")))?;

        debug!(
            "Converted {} {} to {} {}",
            amount, from, payload.converted_amount, to
        );

        Ok(ConversionResult {
            from,
            to,
            input_amount: amount,
            converted_amount: payload.converted_amount,
        })
    }
}
