pub mod conversion_service;
pub mod history_router;
pub mod history_service;
pub mod market_data;
pub mod rate_service;
