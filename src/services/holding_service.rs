use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateHolding, Holding};

// Quantity is intentionally not validated here; zero and negative
// quantities flow through the analysis unchanged.
pub async fn add_many(
    pool: &PgPool,
    portfolio_id: Uuid,
    inputs: Vec<CreateHolding>,
) -> Result<Vec<Holding>, AppError> {
    db::portfolio_queries::fetch_one(pool, portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio".to_string()))?;

    let mut results = Vec::with_capacity(inputs.len());
    for input in inputs {
        if input.ticker.trim().is_empty() {
            return Err(AppError::Validation("Ticker cannot be empty".into()));
        }
        let holding = db::holding_queries::insert(pool, Holding::new(portfolio_id, input)).await?;
        results.push(holding);
    }
    Ok(results)
}

pub async fn fetch_for_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
) -> Result<Vec<Holding>, AppError> {
    let holdings = db::holding_queries::fetch_for_portfolio(pool, portfolio_id).await?;
    if holdings.is_empty() {
        return Err(AppError::NotFound("Holdings for this portfolio".to_string()));
    }
    Ok(holdings)
}
