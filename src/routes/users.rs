use axum::extract::{Path, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateUser, User};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_user).get(list_users))
        .route("/:id", get(get_user))
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    10
}

#[axum::debug_handler]
pub async fn create_user(
    State(state): State<AppState>,
    Json(data): Json<CreateUser>,
) -> Result<(StatusCode, Json<User>), AppError> {
    info!("POST /users - Creating new user");
    let user = services::user_service::create(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to create user: {}", e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<User>>, AppError> {
    info!("GET /users - Listing users (skip {}, limit {})", params.skip, params.limit);
    let users = services::user_service::fetch_all(&state.pool, params.skip, params.limit).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    info!("GET /users/{} - Fetching user", id);
    let user = services::user_service::fetch_one(&state.pool, id).await?;
    Ok(Json(user))
}
