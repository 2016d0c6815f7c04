mod app;
mod db;
mod errors;
mod external;
mod logging;
mod models;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;

use crate::external::finnhub::FinnhubProvider;
use crate::external::market_data::MarketDataProvider;
use crate::services::insight_service::{InsightConfig, InsightService};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    logging::init_logging(logging::LoggingConfig::from_env())?;

    let database_url = std::env::var("DATABASE_URL")?;
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    let market_data: Arc<dyn MarketDataProvider> = Arc::new(
        FinnhubProvider::from_env()
            .expect("Failed to create FinnhubProvider (check FINNHUB_API_KEY)"),
    );

    let insights = Arc::new(InsightService::new(InsightConfig::from_env()));

    let state = AppState {
        pool,
        market_data,
        insights,
    };
    let app = app::create_app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Portfolio analyzer backend running at http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
