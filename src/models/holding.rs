use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Shares of one ticker held within a portfolio. Quantity is deliberately
// unvalidated; fractional and short (negative) positions pass through.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Holding {
    pub id: uuid::Uuid,
    pub portfolio_id: uuid::Uuid,
    pub ticker: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHolding {
    pub ticker: String,
    pub quantity: f64,
}

#[derive(Debug, Deserialize)]
pub struct HoldingsList {
    pub holdings: Vec<CreateHolding>,
}

impl Holding {
    pub(crate) fn new(portfolio_id: uuid::Uuid, input: CreateHolding) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            portfolio_id,
            ticker: input.ticker,
            quantity: input.quantity,
        }
    }
}
