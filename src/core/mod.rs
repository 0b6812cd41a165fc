//! Core business logic abstractions

pub mod config;
pub mod convert;
pub mod currency;
pub mod error;
pub mod feed;
pub mod history;
pub mod log;
pub mod model;
pub mod rate;

// Re-export main types for cleaner imports
pub use convert::ConversionProvider;
pub use currency::CurrencyCode;
pub use error::FeedError;
pub use feed::FeedState;
pub use history::HistoryProvider;
pub use model::{ConversionResult, HistoryPoint, HistorySeries, RatePoint};
pub use rate::RateProvider;
