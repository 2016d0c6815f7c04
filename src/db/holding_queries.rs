use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Holding;

pub async fn insert(pool: &PgPool, input: Holding) -> Result<Holding, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "INSERT INTO holdings (id, portfolio_id, ticker, quantity)
         VALUES ($1, $2, $3, $4)
         RETURNING id, portfolio_id, ticker, quantity",
    )
    .bind(input.id)
    .bind(input.portfolio_id)
    .bind(input.ticker)
    .bind(input.quantity)
    .fetch_one(pool)
    .await
}

pub async fn fetch_for_portfolio(
    pool: &PgPool,
    portfolio_id: Uuid,
) -> Result<Vec<Holding>, sqlx::Error> {
    sqlx::query_as::<_, Holding>(
        "SELECT id, portfolio_id, ticker, quantity
         FROM holdings
         WHERE portfolio_id = $1
         ORDER BY id",
    )
    .bind(portfolio_id)
    .fetch_all(pool)
    .await
}
