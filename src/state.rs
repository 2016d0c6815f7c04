use std::sync::Arc;

use sqlx::PgPool;

use crate::external::market_data::MarketDataProvider;
use crate::services::insight_service::InsightService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub market_data: Arc<dyn MarketDataProvider>,
    pub insights: Arc<InsightService>,
}
