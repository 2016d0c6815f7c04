use axum::extract::{Path, State};
use axum::routing::post;
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{
    AiInsightsResponse, AnalyzeRequest, InvalidTickerPolicy, PortfolioReport,
};
use crate::services::{analysis_service, holding_service, portfolio_service};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/portfolio", post(analyze_portfolio))
        .route("/portfolio/:id", post(analyze_saved_portfolio))
        .route("/ai/:portfolio_id", post(analyze_portfolio_ai))
}

#[axum::debug_handler]
pub async fn analyze_portfolio(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<PortfolioReport>, AppError> {
    info!(
        "POST /analyze/portfolio - {} holdings, cash {:.2}",
        request.holdings.len(),
        request.cash
    );
    let report = analysis_service::analyze(
        state.market_data.as_ref(),
        request.cash,
        &request.holdings,
        request.profile,
        request.on_invalid,
    )
    .await
    .map_err(|e| {
        error!("Ad-hoc analysis failed: {}", e);
        e
    })?;
    Ok(Json(report))
}

pub async fn analyze_saved_portfolio(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PortfolioReport>, AppError> {
    info!("POST /analyze/portfolio/{} - Analyzing saved portfolio", id);
    let report = analysis_service::analyze_saved(
        &state.pool,
        state.market_data.as_ref(),
        id,
        InvalidTickerPolicy::Drop,
    )
    .await
    .map_err(|e| {
        error!("Saved-portfolio analysis failed for {}: {}", id, e);
        e
    })?;
    Ok(Json(report))
}

pub async fn analyze_portfolio_ai(
    State(state): State<AppState>,
    Path(portfolio_id): Path<Uuid>,
) -> Result<Json<AiInsightsResponse>, AppError> {
    info!("POST /analyze/ai/{} - Generating insights", portfolio_id);

    let portfolio = portfolio_service::fetch_one(&state.pool, portfolio_id).await?;
    // A portfolio with no holdings still gets a cash-only summary.
    let holdings = match holding_service::fetch_for_portfolio(&state.pool, portfolio_id).await {
        Ok(holdings) => holdings,
        Err(AppError::NotFound(_)) => Vec::new(),
        Err(e) => return Err(e),
    };

    let summary = serde_json::json!({
        "cash": portfolio.cash,
        "holdings": holdings
            .iter()
            .map(|h| serde_json::json!({"ticker": h.ticker, "quantity": h.quantity}))
            .collect::<Vec<_>>(),
    });

    let ai_insights = state
        .insights
        .generate_portfolio_insights(&summary)
        .await
        .map_err(|e| {
            error!("Insight generation failed for {}: {}", portfolio_id, e);
            AppError::from(e)
        })?;

    Ok(Json(AiInsightsResponse {
        portfolio_id,
        ai_insights,
    }))
}
