use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use http::StatusCode;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Holding, HoldingsList};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/portfolio/:portfolio_id",
        post(add_holdings).get(list_portfolio_holdings),
    )
}

#[axum::debug_handler]
pub async fn add_holdings(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
    Json(data): Json<HoldingsList>,
) -> Result<(StatusCode, Json<Vec<Holding>>), AppError> {
    info!(
        "POST /holdings/portfolio/{} - Adding {} holdings",
        portfolio_id,
        data.holdings.len()
    );
    let holdings = services::holding_service::add_many(&state.pool, portfolio_id, data.holdings)
        .await
        .map_err(|e| {
            error!("Failed to add holdings to portfolio {}: {}", portfolio_id, e);
            e
        })?;
    Ok((StatusCode::CREATED, Json(holdings)))
}

pub async fn list_portfolio_holdings(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<Vec<Holding>>, AppError> {
    info!("GET /holdings/portfolio/{} - Listing holdings", portfolio_id);
    let holdings =
        services::holding_service::fetch_for_portfolio(&state.pool, portfolio_id).await?;
    Ok(Json(holdings))
}
