use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{analysis, health, holdings, portfolios, ticker_metadata, users};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/users", users::router())
        .nest("/api/portfolios", portfolios::router())
        .nest("/api/holdings", holdings::router())
        .nest("/api/ticker-metadata", ticker_metadata::router())
        .nest("/api/analyze", analysis::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
