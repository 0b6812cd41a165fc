use async_trait::async_trait;
use tracing::debug;

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::history::HistoryProvider;
use crate::core::model::HistorySeries;

/// Routes history fetches by currency family: crypto codes go to the
/// external market-data service, everything else to the internal history
/// service. The single dispatch point for the two payload shapes.
pub struct HistoryRouter<I, C> {
    internal: I,
    crypto: C,
}

impl<I, C> HistoryRouter<I, C> {
    pub fn new(internal: I, crypto: C) -> Self {
        HistoryRouter { internal, crypto }
    }
}

#[async_trait]
impl<I, C> HistoryProvider for HistoryRouter<I, C>
where
    I: HistoryProvider,
    C: HistoryProvider,
{
    async fn fetch_history(
        &self,
        currency: CurrencyCode,
        days: u32,
    ) -> Result<HistorySeries, FeedError> {
        if currency.is_crypto() {
            debug!("Routing {} history to market-data service", currency);
            self.crypto.fetch_history(currency, days).await
        } else {
            debug!("Routing {} history to internal history service", currency);
            self.internal.fetch_history(currency, days).await
        }
    }
}
