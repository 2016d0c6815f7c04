use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One (ticker, quantity) pair submitted for analysis. Tickers are passed to
/// the market data provider verbatim; any normalization is its concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldingInput {
    pub ticker: String,
    pub quantity: f64,
}

/// Optional investor context echoed into the report and forwarded to the
/// insight prompt. All fields are free-form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub risk_tolerance: Option<String>,
    pub investment_horizon: Option<String>,
    pub goal: Option<String>,
    pub country_preference: Option<String>,
}

/// What to do with a holding whose quote or profile lookup yields no usable
/// data. `Drop` omits it from the report; `Fail` rejects the whole request
/// naming the offending ticker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvalidTickerPolicy {
    #[default]
    Drop,
    Fail,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub cash: f64,
    pub profile: Option<UserProfile>,
    pub holdings: Vec<HoldingInput>,
    #[serde(default)]
    pub on_invalid: InvalidTickerPolicy,
}

/// A holding that survived validation, enriched with live market data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedHolding {
    pub ticker: String,
    pub quantity: f64,
    pub price: f64,
    pub sector: String,
    pub country: String,
    pub value: f64,
}

/// The full composition report. Distribution values are percentages of
/// `portfolio_value`, rounded to two decimals independently per key, so
/// their sum may drift from the exact invested share by a few hundredths.
#[derive(Debug, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub portfolio_value: f64,
    pub cash_value: f64,
    pub cash_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    pub holdings: Vec<AnalyzedHolding>,
    pub sector_distribution: HashMap<String, f64>,
    pub country_exposure: HashMap<String, f64>,
}

#[derive(Debug, Serialize)]
pub struct AiInsightsResponse {
    pub portfolio_id: uuid::Uuid,
    pub ai_insights: String,
}
