//! Feed orchestration: owns the rate, history and conversion feeds, triggers
//! the data sources on currency changes and keeps out-of-order responses
//! from clobbering newer state.
//!
//! Every trigger bumps an epoch counter and the fetch carries the epoch it
//! was issued under. On settlement the result is applied only if the epoch
//! is still current, so a slow response for a previous selection is
//! discarded instead of overwriting the newer selection's state. In-flight
//! requests are never aborted; the comparison alone is enough.

use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::convert::ConversionProvider;
use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::feed::FeedState;
use crate::core::history::HistoryProvider;
use crate::core::model::{ConversionResult, HistorySeries, RatePoint};
use crate::core::rate::RateProvider;

/// Read-only view of every feed, handed to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub selected: CurrencyCode,
    pub rate: FeedState<RatePoint>,
    pub history: FeedState<HistorySeries>,
    pub conversion: FeedState<ConversionResult>,
}

struct Feeds {
    selected: CurrencyCode,
    selection_epoch: u64,
    conversion_epoch: u64,
    rate: FeedState<RatePoint>,
    history: FeedState<HistorySeries>,
    conversion: FeedState<ConversionResult>,
}

pub struct Dashboard {
    rates: Arc<dyn RateProvider>,
    history: Arc<dyn HistoryProvider>,
    conversions: Arc<dyn ConversionProvider>,
    history_days: u32,
    feeds: Arc<Mutex<Feeds>>,
}

impl Dashboard {
    pub fn new(
        rates: Arc<dyn RateProvider>,
        history: Arc<dyn HistoryProvider>,
        conversions: Arc<dyn ConversionProvider>,
        initial_currency: CurrencyCode,
        history_days: u32,
    ) -> Self {
        Dashboard {
            rates,
            history,
            conversions,
            history_days,
            feeds: Arc::new(Mutex::new(Feeds {
                selected: initial_currency,
                selection_epoch: 0,
                conversion_epoch: 0,
                rate: FeedState::Idle,
                history: FeedState::Idle,
                conversion: FeedState::Idle,
            })),
        }
    }

    /// Changes the selection and triggers the rate and history feeds
    /// concurrently. Returns once both have settled (or been discarded as
    /// stale).
    pub async fn select_currency(&self, currency: CurrencyCode) {
        let epoch = {
            let mut feeds = self.feeds.lock().await;
            feeds.selected = currency;
            feeds.selection_epoch += 1;
            feeds.rate = FeedState::Loading;
            feeds.history = FeedState::Loading;
            feeds.selection_epoch
        };
        debug!("Selected {} (epoch {})", currency, epoch);
        self.run_selection_fetches(currency, epoch).await;
    }

    /// Re-triggers the rate and history feeds for the current selection.
    /// Counts as a new trigger: an older in-flight fetch cannot overwrite
    /// the refreshed result.
    pub async fn refresh(&self) {
        let (currency, epoch) = {
            let mut feeds = self.feeds.lock().await;
            feeds.selection_epoch += 1;
            feeds.rate = FeedState::Loading;
            feeds.history = FeedState::Loading;
            (feeds.selected, feeds.selection_epoch)
        };
        debug!("Refreshing {} (epoch {})", currency, epoch);
        self.run_selection_fetches(currency, epoch).await;
    }

    /// Issues a conversion request, independent of the selected-currency
    /// feeds. Validation failures from the requestor surface immediately as
    /// the conversion feed's error without any network traffic.
    pub async fn request_conversion(&self, from: CurrencyCode, to: CurrencyCode, amount: f64) {
        let epoch = {
            let mut feeds = self.feeds.lock().await;
            feeds.conversion_epoch += 1;
            feeds.conversion = FeedState::Loading;
            feeds.conversion_epoch
        };

        let result = self.conversions.convert(from, to, amount).await;

        let mut feeds = self.feeds.lock().await;
        if feeds.conversion_epoch != epoch {
            debug!("Discarding stale conversion result (epoch {})", epoch);
            return;
        }
        feeds.conversion = settle(result);
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let feeds = self.feeds.lock().await;
        DashboardSnapshot {
            selected: feeds.selected,
            rate: feeds.rate.clone(),
            history: feeds.history.clone(),
            conversion: feeds.conversion.clone(),
        }
    }

    /// Runs the rate and history fetches concurrently, applying each result
    /// independently as it settles. A failure in one feed leaves the other
    /// untouched.
    async fn run_selection_fetches(&self, currency: CurrencyCode, epoch: u64) {
        let rate_fetch = async {
            let result = self.rates.fetch_rate(currency).await;
            let mut feeds = self.feeds.lock().await;
            if feeds.selection_epoch == epoch {
                feeds.rate = settle(result);
            } else {
                debug!("Discarding stale rate result for {} (epoch {})", currency, epoch);
            }
        };

        let history_fetch = async {
            let result = self.history.fetch_history(currency, self.history_days).await;
            let mut feeds = self.feeds.lock().await;
            if feeds.selection_epoch == epoch {
                feeds.history = settle(result);
            } else {
                debug!(
                    "Discarding stale history result for {} (epoch {})",
                    currency, epoch
                );
            }
        };

        tokio::join!(rate_fetch, history_fetch);
    }
}

/// Absorbs adapter failures at the feed boundary; nothing propagates past
/// the orchestrator.
fn settle<T>(result: Result<T, FeedError>) -> FeedState<T> {
    match result {
        Ok(value) => FeedState::Ready(value),
        Err(err) => {
            warn!(error = %err, "Feed request failed");
            FeedState::Failed(err.to_string())
        }
    }
}
