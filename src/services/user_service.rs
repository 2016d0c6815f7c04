use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateUser, User};

pub async fn create(pool: &PgPool, input: CreateUser) -> Result<User, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("User name cannot be empty".into()));
    }
    let user = db::user_queries::insert(pool, User::new(input)).await?;
    Ok(user)
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    let user = db::user_queries::fetch_one(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("User".to_string()))?;
    Ok(user)
}

pub async fn fetch_all(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<User>, AppError> {
    let users = db::user_queries::fetch_all(pool, offset, limit).await?;
    Ok(users)
}
