use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::{error, info};

use crate::errors::AppError;
use crate::models::{TickerMetadata, UpsertTickerMetadata};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(upsert_ticker_metadata))
        .route("/:ticker", get(get_ticker_metadata))
}

#[axum::debug_handler]
pub async fn upsert_ticker_metadata(
    State(state): State<AppState>,
    Json(data): Json<UpsertTickerMetadata>,
) -> Result<Json<TickerMetadata>, AppError> {
    info!("POST /ticker-metadata - Upserting {}", data.ticker);
    let metadata = services::ticker_metadata_service::upsert(&state.pool, data)
        .await
        .map_err(|e| {
            error!("Failed to upsert ticker metadata: {}", e);
            e
        })?;
    Ok(Json(metadata))
}

pub async fn get_ticker_metadata(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<TickerMetadata>, AppError> {
    info!("GET /ticker-metadata/{} - Fetching metadata", ticker);
    let metadata = services::ticker_metadata_service::fetch_by_ticker(&state.pool, &ticker).await?;
    Ok(Json(metadata))
}
