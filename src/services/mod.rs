pub mod analysis_service;
pub mod holding_service;
pub mod insight_service;
pub mod portfolio_service;
pub mod ticker_metadata_service;
pub mod user_service;
