use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::history::HistoryProvider;
use crate::core::model::{HistoryPoint, HistorySeries};

/// Adapter for the internal history service.
///
/// The service answers `GET /history?base={CODE}&days={n}` with an object
/// keyed by `YYYY-MM-DD` date, each value an object holding the reference
/// currency rate as a string or number:
/// `{"2024-01-05": {"BRL": "5.12"}, ...}`. Key iteration order carries no
/// chronological meaning, so the series is sorted before returning.
pub struct HistoryService {
    base_url: String,
    reference: CurrencyCode,
}

impl HistoryService {
    pub fn new(base_url: &str, reference: CurrencyCode) -> Self {
        HistoryService {
            base_url: base_url.to_string(),
            reference,
        }
    }
}

/// Accepts `5.12` and `"5.12"`; anything else is malformed.
fn parse_rate(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[async_trait]
impl HistoryProvider for HistoryService {
    #[instrument(
        name = "HistoryFetch",
        skip(self),
        fields(currency = %currency, days)
    )]
    async fn fetch_history(
        &self,
        currency: CurrencyCode,
        days: u32,
    ) -> Result<HistorySeries, FeedError> {
        let url = format!("{}/history", self.base_url);
        debug!("Requesting rate history from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .build()
            .map_err(|e| FeedError::history_unavailable(currency, e))?;

        let response = client
            .get(&url)
            .query(&[("base", currency.to_string()), ("days", days.to_string())])
            .send()
            .await
            .map_err(|e| FeedError::history_unavailable(currency, format!("request error: {e}")))?;

        if !response.status().is_success() {
            return Err(FeedError::history_unavailable(
                currency,
                format!("HTTP {}", response.status()),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| FeedError::history_unavailable(currency, format!("request error: {e}")))?;

        let payload: HashMap<String, HashMap<String, Value>> = serde_json::from_str(&text)
            .map_err(|e| {
                FeedError::history_unavailable(currency, format!("malformed payload: {e}"))
            })?;

        let reference_key = self.reference.to_string();
        let mut points = Vec::with_capacity(payload.len());
        for (date_str, entry) in &payload {
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                FeedError::history_unavailable(currency, format!("bad date '{date_str}': {e}"))
            })?;

            let raw = entry.get(&reference_key).ok_or_else(|| {
                FeedError::history_unavailable(
                    currency,
                    format!("no {reference_key} rate for {date_str}"),
                )
            })?;

            // A single bad point fails the whole call; a silently shortened
            // chart is worse than an error.
            let rate = parse_rate(raw).ok_or_else(|| {
                FeedError::history_unavailable(
                    currency,
                    format!("unparsable rate for {date_str}: {raw}"),
                )
            })?;

            if !rate.is_finite() || rate <= 0.0 {
                return Err(FeedError::history_unavailable(
                    currency,
                    format!("non-positive rate for {date_str}: {rate}"),
                ));
            }

            points.push(HistoryPoint { date, rate });
        }

        debug!("Fetched {} history points for {}", points.len(), currency);
        Ok(HistorySeries::from_points(points, days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(base: &str, days: u32, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/history"))
            .and(query_param("base", base))
            .and(query_param("days", days.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    #[tokio::test]
    async fn test_unordered_payload_is_sorted_ascending() {
        let mock_response = r#"{
            "2024-01-03": {"BRL": "5.30"},
            "2024-01-01": {"BRL": "5.10"},
            "2024-01-02": {"BRL": "5.20"}
        }"#;
        let mock_server = create_mock_server("USD", 30, mock_response).await;

        let provider = HistoryService::new(&mock_server.uri(), CurrencyCode::Brl);
        let series = provider
            .fetch_history(CurrencyCode::Usd, 30)
            .await
            .unwrap();

        let rates: Vec<_> = series.points().iter().map(|p| p.rate).collect();
        assert_eq!(rates, vec![5.10, 5.20, 5.30]);
    }

    #[tokio::test]
    async fn test_string_and_number_rates_both_parse() {
        let mock_response = r#"{
            "2024-01-01": {"BRL": "5.10"},
            "2024-01-02": {"BRL": 5.20}
        }"#;
        let mock_server = create_mock_server("EUR", 30, mock_response).await;

        let provider = HistoryService::new(&mock_server.uri(), CurrencyCode::Brl);
        let series = provider
            .fetch_history(CurrencyCode::Eur, 30)
            .await
            .unwrap();

        assert_eq!(series.len(), 2);
    }

    #[tokio::test]
    async fn test_one_unparsable_rate_fails_the_whole_call() {
        let mock_response = r#"{
            "2024-01-01": {"BRL": "5.10"},
            "2024-01-02": {"BRL": "not-a-number"}
        }"#;
        let mock_server = create_mock_server("USD", 30, mock_response).await;

        let provider = HistoryService::new(&mock_server.uri(), CurrencyCode::Brl);
        let result = provider.fetch_history(CurrencyCode::Usd, 30).await;

        assert!(matches!(
            &result,
            Err(FeedError::HistoryUnavailable { .. })
        ));
        assert!(result.unwrap_err().to_string().contains("unparsable rate"));
    }

    #[tokio::test]
    async fn test_missing_reference_currency_entry_fails() {
        let mock_response = r#"{"2024-01-01": {"USD": "1.00"}}"#;
        let mock_server = create_mock_server("GBP", 30, mock_response).await;

        let provider = HistoryService::new(&mock_server.uri(), CurrencyCode::Brl);
        let result = provider.fetch_history(CurrencyCode::Gbp, 30).await;

        assert!(result.unwrap_err().to_string().contains("no BRL rate"));
    }

    #[tokio::test]
    async fn test_server_error_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/history"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&mock_server)
            .await;

        let provider = HistoryService::new(&mock_server.uri(), CurrencyCode::Brl);
        let result = provider.fetch_history(CurrencyCode::Usd, 30).await;

        assert!(result.unwrap_err().to_string().contains("HTTP 502"));
    }

    #[tokio::test]
    async fn test_series_is_capped_at_requested_days() {
        let mut entries: Vec<String> = (1..=9)
            .map(|d| format!(r#""2024-01-0{d}": {{"BRL": "5.0{d}"}}"#))
            .collect();
        entries.sort();
        let mock_response = format!("{{{}}}", entries.join(","));
        let mock_server = create_mock_server("USD", 7, &mock_response).await;

        let provider = HistoryService::new(&mock_server.uri(), CurrencyCode::Brl);
        let series = provider.fetch_history(CurrencyCode::Usd, 7).await.unwrap();

        assert_eq!(series.len(), 7);
        assert_eq!(series.latest().unwrap().date.to_string(), "2024-01-09");
    }
}
