use sqlx::PgPool;

use crate::models::{TickerMetadata, UpsertTickerMetadata};

pub async fn upsert(
    pool: &PgPool,
    input: UpsertTickerMetadata,
) -> Result<TickerMetadata, sqlx::Error> {
    sqlx::query_as::<_, TickerMetadata>(
        "INSERT INTO ticker_metadata (id, ticker, sector, country, industry, last_updated)
         VALUES ($1, $2, $3, $4, $5, NOW())
         ON CONFLICT (ticker) DO UPDATE
         SET sector = EXCLUDED.sector,
             country = EXCLUDED.country,
             industry = EXCLUDED.industry,
             last_updated = NOW()
         RETURNING id, ticker, sector, country, industry, last_updated",
    )
    .bind(uuid::Uuid::new_v4())
    .bind(input.ticker)
    .bind(input.sector)
    .bind(input.country)
    .bind(input.industry)
    .fetch_one(pool)
    .await
}

pub async fn fetch_by_ticker(
    pool: &PgPool,
    ticker: &str,
) -> Result<Option<TickerMetadata>, sqlx::Error> {
    sqlx::query_as::<_, TickerMetadata>(
        "SELECT id, ticker, sector, country, industry, last_updated
         FROM ticker_metadata
         WHERE ticker = $1",
    )
    .bind(ticker)
    .fetch_optional(pool)
    .await
}
