use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Cached classification data for a ticker, maintained by hand through the
// metadata endpoints. The analysis pipeline always asks the provider live.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct TickerMetadata {
    pub id: uuid::Uuid,
    pub ticker: String,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
    pub last_updated: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertTickerMetadata {
    pub ticker: String,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub industry: Option<String>,
}
