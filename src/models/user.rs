use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// An investor profile. Risk appetite and horizon feed the AI insight prompt.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: uuid::Uuid,
    pub name: String,
    pub risk_appetite: String,
    pub investment_horizon: String,
    pub investment_goal: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub risk_appetite: String,
    pub investment_horizon: String,
    pub investment_goal: String,
}

impl User {
    pub(crate) fn new(input: CreateUser) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: input.name,
            risk_appetite: input.risk_appetite,
            investment_horizon: input.investment_horizon,
            investment_goal: input.investment_goal,
            created_at: chrono::Utc::now(),
        }
    }
}
