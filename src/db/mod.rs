pub mod holding_queries;
pub mod portfolio_queries;
pub mod ticker_metadata_queries;
pub mod user_queries;
