//! Cross-currency conversion abstraction.

use async_trait::async_trait;

use crate::core::currency::CurrencyCode;
use crate::core::error::FeedError;
use crate::core::model::ConversionResult;

#[async_trait]
pub trait ConversionProvider: Send + Sync {
    /// Converts `amount` of `from` into `to`. Implementations validate the
    /// input locally (positive finite amount, `from != to`) before issuing
    /// any request.
    async fn convert(
        &self,
        from: CurrencyCode,
        to: CurrencyCode,
        amount: f64,
    ) -> Result<ConversionResult, FeedError>;
}
