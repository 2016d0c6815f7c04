pub mod finnhub;
pub mod market_data;
