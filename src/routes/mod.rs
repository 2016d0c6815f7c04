pub(crate) mod analysis;
pub(crate) mod health;
pub(crate) mod holdings;
pub(crate) mod portfolios;
pub(crate) mod ticker_metadata;
pub(crate) mod users;
