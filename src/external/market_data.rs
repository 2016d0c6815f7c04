use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Latest quote for a ticker. The provider may answer with a payload that
/// carries no price at all (unknown symbol), hence the Option.
#[derive(Debug, Clone)]
pub struct Quote {
    pub current_price: Option<f64>,
}

/// Company classification data. Sub-fields are optional; callers decide
/// what to substitute when they are missing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CompanyProfile {
    pub industry: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

/// Read-only market data lookups. Both calls are keyed by ticker symbol,
/// passed through verbatim with no normalization.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, MarketDataError>;

    /// Returns `None` when the provider answers with an empty body for the
    /// symbol, which is how unknown tickers show up.
    async fn fetch_profile(&self, ticker: &str) -> Result<Option<CompanyProfile>, MarketDataError>;
}
