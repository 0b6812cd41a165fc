//! Point-rate fetch abstraction.

use async_trait::async_trait;

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::model::RatePoint;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the current rate of `currency` against the reference
    /// currency. Single attempt, no retry.
    async fn fetch_rate(&self, currency: CurrencyCode) -> Result<RatePoint, FeedError>;
}
