use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;

pub async fn insert(pool: &PgPool, input: User) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "INSERT INTO users (id, name, risk_appetite, investment_horizon, investment_goal, created_at)
         VALUES ($1, $2, $3, $4, $5, $6)
         RETURNING id, name, risk_appetite, investment_horizon, investment_goal, created_at",
    )
    .bind(input.id)
    .bind(input.name)
    .bind(input.risk_appetite)
    .bind(input.investment_horizon)
    .bind(input.investment_goal)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, risk_appetite, investment_horizon, investment_goal, created_at
         FROM users
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn fetch_all(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(
        "SELECT id, name, risk_appetite, investment_horizon, investment_goal, created_at
         FROM users
         ORDER BY created_at DESC
         OFFSET $1 LIMIT $2",
    )
    .bind(offset)
    .bind(limit)
    .fetch_all(pool)
    .await
}
