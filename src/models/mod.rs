mod analysis;
mod holding;
mod portfolio;
mod ticker_metadata;
mod user;

pub use analysis::{
    AiInsightsResponse, AnalyzeRequest, AnalyzedHolding, HoldingInput, InvalidTickerPolicy,
    PortfolioReport, UserProfile,
};
pub use holding::{CreateHolding, Holding, HoldingsList};
pub use portfolio::{CreatePortfolio, Portfolio};
pub use ticker_metadata::{TickerMetadata, UpsertTickerMetadata};
pub use user::{CreateUser, User};
