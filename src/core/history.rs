//! Rate-history fetch abstraction.

use async_trait::async_trait;

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::model::HistorySeries;

#[async_trait]
pub trait HistoryProvider: Send + Sync {
    /// Fetches up to `days` daily rate points for `currency` against the
    /// reference currency. The returned series is ascending by date with no
    /// duplicates regardless of upstream ordering.
    async fn fetch_history(
        &self,
        currency: CurrencyCode,
        days: u32,
    ) -> Result<HistorySeries, FeedError>;
}
