use async_trait::async_trait;
use chrono::DateTime;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::history::HistoryProvider;
use crate::core::model::{HistoryPoint, HistorySeries};

/// Adapter for the external crypto market-data service (CoinGecko shape).
///
/// `GET /coins/{id}/market_chart?vs_currency={ref}&days={n}` answers
/// `{"prices": [[timestamp_ms, price], ...]}`. The service documents
/// ascending order but that is not relied upon; tuples are re-sorted before
/// normalization.
pub struct MarketDataService {
    base_url: String,
    reference: CurrencyCode,
}

impl MarketDataService {
    pub fn new(base_url: &str, reference: CurrencyCode) -> Self {
        MarketDataService {
            base_url: base_url.to_string(),
            reference,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartResponse {
    prices: Vec<(i64, f64)>,
}

#[async_trait]
impl HistoryProvider for MarketDataService {
    #[instrument(
        name = "MarketChartFetch",
        skip(self),
        fields(currency = %currency, days)
    )]
    async fn fetch_history(
        &self,
        currency: CurrencyCode,
        days: u32,
    ) -> Result<HistorySeries, FeedError> {
        let coin_id = currency.coin_id().ok_or_else(|| {
            FeedError::history_unavailable(currency, "not a crypto currency")
        })?;

        let url = format!("{}/coins/{}/market_chart", self.base_url, coin_id);
        debug!("Requesting market chart from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .build()
            .map_err(|e| FeedError::history_unavailable(currency, e))?;

        let response = client
            .get(&url)
            .query(&[
                ("vs_currency", self.reference.to_string().to_lowercase()),
                ("days", days.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::history_unavailable(currency, format!("request error: {e}")))?;

        if !response.status().is_success() {
            return Err(FeedError::history_unavailable(
                currency,
                format!("HTTP {}", response.status()),
            ));
        }

        let chart: MarketChartResponse = response.json().await.map_err(|e| {
            FeedError::history_unavailable(currency, format!("malformed payload: {e}"))
        })?;

        // Sort by sample time first so same-date collapse keeps the latest
        // sample of each day.
        let mut prices = chart.prices;
        prices.sort_by_key(|(timestamp_ms, _)| *timestamp_ms);

        let mut points = Vec::with_capacity(prices.len());
        for (timestamp_ms, price) in prices {
            let date = DateTime::from_timestamp_millis(timestamp_ms)
                .ok_or_else(|| {
                    FeedError::history_unavailable(
                        currency,
                        format!("invalid timestamp {timestamp_ms}"),
                    )
                })?
                .date_naive();

            if !price.is_finite() || price <= 0.0 {
                return Err(FeedError::history_unavailable(
                    currency,
                    format!("non-positive price for {date}: {price}"),
                ));
            }

            points.push(HistoryPoint { date, rate: price });
        }

        debug!("Fetched {} market chart points for {}", points.len(), currency);
        Ok(HistorySeries::from_points(points, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart"))
            .and(query_param("vs_currency", "brl"))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_descending_tuples_are_normalized_ascending() {
        // 1700000000000 is 2023-11-14, 1699900000000 is 2023-11-13
        let mock_response = r#"{"prices": [[1700000000000, 50000], [1699900000000, 49000]]}"#;
        let mock_server = create_mock_server(mock_response).await;

        let provider = MarketDataService::new(&mock_server.uri(), CurrencyCode::Brl);
        let series = provider
            .fetch_history(CurrencyCode::Btc, 30)
            .await
            .unwrap();

        let rates: Vec<_> = series.points().iter().map(|p| p.rate).collect();
        assert_eq!(rates, vec![49000.0, 50000.0]);
        assert!(series.points()[0].date < series.points()[1].date);
    }

    #[tokio::test]
    async fn test_intraday_samples_collapse_to_latest_per_day() {
        // Three samples on 2023-11-13, one on 2023-11-14.
        let mock_response = r#"{"prices": [
            [1699840000000, 48000],
            [1699870000000, 48500],
            [1699900000000, 49000],
            [1700000000000, 50000]
        ]}"#;
        let mock_server = create_mock_server(mock_response).await;

        let provider = MarketDataService::new(&mock_server.uri(), CurrencyCode::Brl);
        let series = provider
            .fetch_history(CurrencyCode::Btc, 30)
            .await
            .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].rate, 49000.0);
        assert_eq!(series.points()[1].rate, 50000.0);
    }

    #[tokio::test]
    async fn test_non_crypto_currency_is_rejected_locally() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let provider = MarketDataService::new(&mock_server.uri(), CurrencyCode::Brl);
        let result = provider.fetch_history(CurrencyCode::Usd, 30).await;

        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("not a crypto currency")
        );
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/coins/bitcoin/market_chart"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let provider = MarketDataService::new(&mock_server.uri(), CurrencyCode::Brl);
        let result = provider.fetch_history(CurrencyCode::Btc, 30).await;

        assert!(matches!(
            result,
            Err(FeedError::HistoryUnavailable {
                currency: CurrencyCode::Btc,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_malformed_payload_is_an_error() {
        let mock_server = create_mock_server(r#"{"prices": "oops"}"#).await;

        let provider = MarketDataService::new(&mock_server.uri(), CurrencyCode::Brl);
        let result = provider.fetch_history(CurrencyCode::Btc, 30).await;

        assert!(result.unwrap_err().to_string().contains("malformed payload"));
    }
}
