//! Typed failures raised by the data-source adapters.
//!
//! Every variant is terminal for its fetch attempt; there is no retry. The
//! orchestrator converts these into per-feed error messages at the feed
//! boundary, so they never reach the presentation layer as errors.

use thiserror::Error;

use crate::core::currency::CurrencyCode;

#[derive(Debug, Error)]
pub enum FeedError {
    /// Network failure, malformed payload, or the requested currency is
    /// absent from the rate service response.
    #[error("exchange rate unavailable for {currency}: {reason}")]
    RateUnavailable {
        currency: CurrencyCode,
        reason: String,
    },

    /// Network failure or malformed payload from either history source. A
    /// single unparsable point fails the whole call.
    #[error("history unavailable for {currency}: {reason}")]
    HistoryUnavailable {
        currency: CurrencyCode,
        reason: String,
    },

    /// Conversion service or network failure.
    #[error("conversion failed: {reason}")]
    ConversionFailed { reason: String },

    /// Local validation: the amount is not a positive finite number. Raised
    /// before any request is issued.
    #[error("amount must be a positive number, got {amount}")]
    InvalidAmount { amount: f64 },

    /// Local validation: source and target currency are identical. Raised
    /// before any request is issued.
    #[error("source and target currency are both {currency}")]
    SameCurrency { currency: CurrencyCode },
}

impl FeedError {
    pub fn rate_unavailable(currency: CurrencyCode, reason: impl ToString) -> Self {
        FeedError::RateUnavailable {
            currency,
            reason: reason.to_string(),
        }
    }

    pub fn history_unavailable(currency: CurrencyCode, reason: impl ToString) -> Self {
        FeedError::HistoryUnavailable {
            currency,
            reason: reason.to_string(),
        }
    }

    pub fn conversion_failed(reason: impl ToString) -> Self {
        FeedError::ConversionFailed {
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_currency() {
        let err = FeedError::rate_unavailable(CurrencyCode::Eur, "HTTP 500");
        assert_eq!(
            err.to_string(),
            "exchange rate unavailable for EUR: HTTP 500"
        );

        let err = FeedError::SameCurrency {
            currency: CurrencyCode::Usd,
        };
        assert_eq!(err.to_string(), "source and target currency are both USD");
    }
}
