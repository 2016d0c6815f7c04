use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::external::market_data::{CompanyProfile, MarketDataError, MarketDataProvider, Quote};

const DEFAULT_BASE_URL: &str = "https://finnhub.io/api/v1";

// One slow symbol must not stall the whole analysis batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub struct FinnhubProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FinnhubProvider {
    pub fn from_env() -> Result<Self, MarketDataError> {
        let api_key = std::env::var("FINNHUB_API_KEY")
            .map_err(|_| MarketDataError::BadResponse("FINNHUB_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn get(&self, path: &str, ticker: &str) -> Result<reqwest::Response, MarketDataError> {
        let url = format!("{}/{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .query(&[("symbol", ticker), ("token", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(MarketDataError::BadResponse(format!(
                "HTTP {} for {}",
                resp.status(),
                ticker
            )));
        }
        Ok(resp)
    }
}

#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    // Finnhub's current-price field; absent for unknown symbols.
    c: Option<f64>,
}

fn profile_from_value(body: Value) -> Result<Option<CompanyProfile>, MarketDataError> {
    let obj = body
        .as_object()
        .ok_or_else(|| MarketDataError::Parse("profile body is not an object".into()))?;

    // Finnhub answers unknown symbols with an empty object.
    if obj.is_empty() {
        return Ok(None);
    }

    let field = |key: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .map(|s| s.to_string())
    };

    Ok(Some(CompanyProfile {
        industry: field("finnhubIndustry"),
        country: field("country"),
    }))
}

#[async_trait]
impl MarketDataProvider for FinnhubProvider {
    async fn fetch_quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
        let resp = self.get("quote", ticker).await?;

        let body: FinnhubQuote = resp
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        Ok(Quote {
            current_price: body.c,
        })
    }

    async fn fetch_profile(&self, ticker: &str) -> Result<Option<CompanyProfile>, MarketDataError> {
        let resp = self.get("stock/profile2", ticker).await?;

        let body: Value = resp
            .json()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))?;

        profile_from_value(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_payload_with_price() {
        let q: FinnhubQuote =
            serde_json::from_str(r#"{"c":175.35,"h":178.0,"l":174.2,"o":176.1,"pc":174.9}"#)
                .unwrap();
        assert_eq!(q.c, Some(175.35));
    }

    #[test]
    fn quote_payload_without_price() {
        let q: FinnhubQuote = serde_json::from_str(r#"{"error":"no data"}"#).unwrap();
        assert_eq!(q.c, None);
    }

    #[test]
    fn empty_profile_is_none() {
        let profile = profile_from_value(serde_json::json!({})).unwrap();
        assert!(profile.is_none());
    }

    #[test]
    fn profile_fields_extracted() {
        let profile = profile_from_value(serde_json::json!({
            "name": "Apple Inc",
            "finnhubIndustry": "Technology",
            "country": "US"
        }))
        .unwrap()
        .unwrap();
        assert_eq!(profile.industry.as_deref(), Some("Technology"));
        assert_eq!(profile.country.as_deref(), Some("US"));
    }

    #[test]
    fn profile_with_other_fields_is_not_empty() {
        let profile = profile_from_value(serde_json::json!({"name": "Mystery Corp"}))
            .unwrap()
            .unwrap();
        assert!(profile.industry.is_none());
        assert!(profile.country.is_none());
    }

    #[test]
    fn non_object_profile_is_parse_error() {
        let result = profile_from_value(serde_json::json!([1, 2, 3]));
        assert!(matches!(result, Err(MarketDataError::Parse(_))));
    }
}
