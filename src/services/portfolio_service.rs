use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreatePortfolio, Portfolio};

pub async fn create(
    pool: &PgPool,
    user_id: Uuid,
    input: CreatePortfolio,
) -> Result<Portfolio, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Portfolio name cannot be empty".into()));
    }
    if input.cash < 0.0 {
        return Err(AppError::Validation("Cash cannot be negative".into()));
    }
    db::user_queries::fetch_one(pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;

    let portfolio = db::portfolio_queries::insert(pool, Portfolio::new(user_id, input)).await?;
    Ok(portfolio)
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Portfolio, AppError> {
    let portfolio = db::portfolio_queries::fetch_one(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio".to_string()))?;
    Ok(portfolio)
}

pub async fn fetch_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Portfolio>, AppError> {
    let portfolios = db::portfolio_queries::fetch_for_user(pool, user_id).await?;
    Ok(portfolios)
}
