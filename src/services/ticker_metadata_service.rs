use sqlx::PgPool;

use crate::db;
use crate::errors::AppError;
use crate::models::{TickerMetadata, UpsertTickerMetadata};

pub async fn upsert(pool: &PgPool, input: UpsertTickerMetadata) -> Result<TickerMetadata, AppError> {
    if input.ticker.trim().is_empty() {
        return Err(AppError::Validation("Ticker cannot be empty".into()));
    }
    let metadata = db::ticker_metadata_queries::upsert(pool, input).await?;
    Ok(metadata)
}

pub async fn fetch_by_ticker(pool: &PgPool, ticker: &str) -> Result<TickerMetadata, AppError> {
    let metadata = db::ticker_metadata_queries::fetch_by_ticker(pool, ticker)
        .await?
        .ok_or_else(|| AppError::NotFound("Ticker metadata".to_string()))?;
    Ok(metadata)
}
