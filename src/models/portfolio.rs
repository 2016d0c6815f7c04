use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// A named bucket of holdings plus uninvested cash, owned by one user.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Portfolio {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub name: String,
    pub cash: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePortfolio {
    pub name: String,
    #[serde(default)]
    pub cash: f64,
}

impl Portfolio {
    pub(crate) fn new(user_id: uuid::Uuid, input: CreatePortfolio) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            user_id,
            name: input.name,
            cash: input.cash,
            created_at: chrono::Utc::now(),
        }
    }
}
