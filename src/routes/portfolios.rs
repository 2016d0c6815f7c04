use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreatePortfolio, Portfolio};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/user/:user_id", post(create_portfolio).get(list_user_portfolios))
        .route("/:id", get(get_portfolio))
}

#[axum::debug_handler]
pub async fn create_portfolio(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(data): Json<CreatePortfolio>,
) -> Result<(StatusCode, Json<Portfolio>), AppError> {
    info!("POST /portfolios/user/{} - Creating portfolio", user_id);
    let portfolio = services::portfolio_service::create(&state.pool, user_id, data)
        .await
        .map_err(|e| {
            error!("Failed to create portfolio for user {}: {}", user_id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(portfolio)))
}

pub async fn list_user_portfolios(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<Portfolio>>, AppError> {
    info!("GET /portfolios/user/{} - Listing portfolios", user_id);
    let portfolios = services::portfolio_service::fetch_for_user(&state.pool, user_id).await?;
    Ok(Json(portfolios))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Portfolio>, AppError> {
    info!("GET /portfolios/{} - Fetching portfolio", id);
    let portfolio = services::portfolio_service::fetch_one(&state.pool, id)
        .await
        .map_err(|e| {
            error!("Failed to fetch portfolio {}: {}", id, e);
            e
        })?;
    Ok(Json(portfolio))
}
