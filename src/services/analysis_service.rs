use std::collections::HashMap;

use futures::future::join_all;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::external::market_data::MarketDataProvider;
use crate::models::{
    AnalyzedHolding, HoldingInput, InvalidTickerPolicy, PortfolioReport, UserProfile,
};

const UNKNOWN: &str = "Unknown";

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes the composition report for a set of holdings plus cash.
///
/// All 2N lookups (quote + profile per ticker) go out in a single concurrent
/// wave with one join point; results are paired back to holdings by index.
/// Per-ticker failures never abort the batch: depending on `policy` the
/// holding is either dropped from the report or the whole request is
/// rejected naming the ticker.
pub async fn analyze(
    provider: &dyn MarketDataProvider,
    cash: f64,
    holdings: &[HoldingInput],
    profile: Option<UserProfile>,
    policy: InvalidTickerPolicy,
) -> Result<PortfolioReport, AppError> {
    info!(
        "Analyzing portfolio: {} holdings, cash {:.2}, policy {:?}",
        holdings.len(),
        cash,
        policy
    );

    let quote_futures = holdings.iter().map(|h| provider.fetch_quote(&h.ticker));
    let profile_futures = holdings.iter().map(|h| provider.fetch_profile(&h.ticker));
    let (quotes, profiles) = tokio::join!(join_all(quote_futures), join_all(profile_futures));

    let mut total_value = cash;
    let mut analyzed = Vec::with_capacity(holdings.len());
    let mut sector_values: HashMap<String, f64> = HashMap::new();
    let mut country_values: HashMap<String, f64> = HashMap::new();

    for ((holding, quote), company) in holdings.iter().zip(quotes).zip(profiles) {
        let price = match quote {
            Ok(q) => q.current_price,
            Err(e) => {
                warn!("Quote lookup failed for {}: {}", holding.ticker, e);
                None
            }
        };
        let company = match company {
            Ok(p) => p,
            Err(e) => {
                warn!("Profile lookup failed for {}: {}", holding.ticker, e);
                None
            }
        };

        let (price, company) = match (price, company) {
            (Some(price), Some(company)) => (price, company),
            _ => match policy {
                InvalidTickerPolicy::Drop => {
                    warn!("Skipping invalid ticker {}", holding.ticker);
                    continue;
                }
                InvalidTickerPolicy::Fail => {
                    return Err(AppError::Validation(format!(
                        "Invalid ticker: {}",
                        holding.ticker
                    )));
                }
            },
        };

        let sector = company.industry.unwrap_or_else(|| UNKNOWN.to_string());
        let country = company.country.unwrap_or_else(|| UNKNOWN.to_string());
        let value = holding.quantity * price;

        total_value += value;
        *sector_values.entry(sector.clone()).or_insert(0.0) += value;
        *country_values.entry(country.clone()).or_insert(0.0) += value;

        analyzed.push(AnalyzedHolding {
            ticker: holding.ticker.clone(),
            quantity: holding.quantity,
            price,
            sector,
            country,
            value,
        });
    }

    let (sector_distribution, country_exposure, cash_percent) = if total_value > 0.0 {
        (
            to_percentages(sector_values, total_value),
            to_percentages(country_values, total_value),
            round2(cash / total_value * 100.0),
        )
    } else {
        // Nothing to attribute; an all-zero portfolio must not divide.
        (HashMap::new(), HashMap::new(), 0.0)
    };

    info!(
        "Analysis complete: {}/{} holdings valid, portfolio value {:.2}",
        analyzed.len(),
        holdings.len(),
        total_value
    );

    Ok(PortfolioReport {
        portfolio_value: total_value,
        cash_value: cash,
        cash_percent,
        profile,
        holdings: analyzed,
        sector_distribution,
        country_exposure,
    })
}

fn to_percentages(values: HashMap<String, f64>, total: f64) -> HashMap<String, f64> {
    values
        .into_iter()
        .map(|(key, value)| (key, round2(value / total * 100.0)))
        .collect()
}

/// Loads a persisted portfolio and runs the same pipeline over its holdings.
pub async fn analyze_saved(
    pool: &PgPool,
    provider: &dyn MarketDataProvider,
    portfolio_id: Uuid,
    policy: InvalidTickerPolicy,
) -> Result<PortfolioReport, AppError> {
    let portfolio = db::portfolio_queries::fetch_one(pool, portfolio_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Portfolio".to_string()))?;
    let holdings = db::holding_queries::fetch_for_portfolio(pool, portfolio_id).await?;

    let inputs: Vec<HoldingInput> = holdings
        .into_iter()
        .map(|h| HoldingInput {
            ticker: h.ticker,
            quantity: h.quantity,
        })
        .collect();

    analyze(provider, portfolio.cash, &inputs, None, policy).await
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use async_trait::async_trait;

    use super::*;
    use crate::external::market_data::{CompanyProfile, MarketDataError, Quote};

    #[derive(Default)]
    struct MockProvider {
        prices: HashMap<String, f64>,
        profiles: HashMap<String, (Option<String>, Option<String>)>,
        priceless: HashSet<String>,
        quote_failures: HashSet<String>,
    }

    impl MockProvider {
        fn with_stock(mut self, ticker: &str, price: f64, sector: &str, country: &str) -> Self {
            self.prices.insert(ticker.to_string(), price);
            self.profiles.insert(
                ticker.to_string(),
                (Some(sector.to_string()), Some(country.to_string())),
            );
            self
        }

        fn with_priceless(mut self, ticker: &str) -> Self {
            self.priceless.insert(ticker.to_string());
            self.profiles
                .insert(ticker.to_string(), (None, None));
            self
        }

        fn with_quote_failure(mut self, ticker: &str) -> Self {
            self.quote_failures.insert(ticker.to_string());
            self.profiles
                .insert(ticker.to_string(), (None, None));
            self
        }

        fn with_bare_profile(mut self, ticker: &str, price: f64) -> Self {
            self.prices.insert(ticker.to_string(), price);
            self.profiles.insert(ticker.to_string(), (None, None));
            self
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        async fn fetch_quote(&self, ticker: &str) -> Result<Quote, MarketDataError> {
            if self.quote_failures.contains(ticker) {
                return Err(MarketDataError::Network("connection reset".into()));
            }
            if self.priceless.contains(ticker) {
                return Ok(Quote {
                    current_price: None,
                });
            }
            Ok(Quote {
                current_price: self.prices.get(ticker).copied(),
            })
        }

        async fn fetch_profile(
            &self,
            ticker: &str,
        ) -> Result<Option<CompanyProfile>, MarketDataError> {
            Ok(self.profiles.get(ticker).map(|(industry, country)| {
                CompanyProfile {
                    industry: industry.clone(),
                    country: country.clone(),
                }
            }))
        }
    }

    fn input(ticker: &str, quantity: f64) -> HoldingInput {
        HoldingInput {
            ticker: ticker.to_string(),
            quantity,
        }
    }

    #[tokio::test]
    async fn empty_holdings_report_is_cash_only() {
        let provider = MockProvider::default();
        let report = analyze(&provider, 1000.0, &[], None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.portfolio_value, 1000.0);
        assert_eq!(report.cash_value, 1000.0);
        assert_eq!(report.cash_percent, 100.0);
        assert!(report.holdings.is_empty());
        assert!(report.sector_distribution.is_empty());
        assert!(report.country_exposure.is_empty());
    }

    #[tokio::test]
    async fn single_holding_matches_reference_numbers() {
        let provider = MockProvider::default().with_stock("AAPL", 175.35, "Technology", "US");
        let holdings = [input("AAPL", 10.0)];
        let report = analyze(&provider, 5000.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].value, 1753.5);
        assert_eq!(report.portfolio_value, 6753.5);

        let expected = round2(1753.5 / 6753.5 * 100.0);
        assert_eq!(report.sector_distribution["Technology"], expected);
        assert_eq!(report.country_exposure["US"], expected);
        assert_eq!(report.cash_percent, round2(5000.0 / 6753.5 * 100.0));
    }

    #[tokio::test]
    async fn priceless_ticker_is_dropped_from_everything() {
        let provider = MockProvider::default()
            .with_stock("MSFT", 100.0, "Technology", "US")
            .with_priceless("BOGUS");
        let holdings = [input("MSFT", 2.0), input("BOGUS", 50.0)];
        let report = analyze(&provider, 0.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].ticker, "MSFT");
        assert_eq!(report.portfolio_value, 200.0);
        assert_eq!(report.sector_distribution["Technology"], 100.0);
        assert!(!report
            .holdings
            .iter()
            .any(|h| h.ticker == "BOGUS"));
    }

    #[tokio::test]
    async fn missing_profile_drops_the_holding() {
        // Quote resolves but the provider knows nothing about the company.
        let mut provider = MockProvider::default().with_stock("NVDA", 500.0, "Technology", "US");
        provider.prices.insert("GHOST".to_string(), 10.0);
        let holdings = [input("NVDA", 1.0), input("GHOST", 1.0)];
        let report = analyze(&provider, 0.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.portfolio_value, 500.0);
    }

    #[tokio::test]
    async fn transport_failure_is_localized_to_one_ticker() {
        let provider = MockProvider::default()
            .with_stock("AAPL", 175.35, "Technology", "US")
            .with_quote_failure("TSLA");
        let holdings = [input("AAPL", 10.0), input("TSLA", 5.0)];
        let report = analyze(&provider, 100.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].ticker, "AAPL");
        assert_eq!(report.portfolio_value, 100.0 + 1753.5);
    }

    #[tokio::test]
    async fn fail_policy_rejects_with_the_ticker_name() {
        let provider = MockProvider::default()
            .with_stock("AAPL", 175.35, "Technology", "US")
            .with_priceless("BOGUS");
        let holdings = [input("AAPL", 10.0), input("BOGUS", 1.0)];
        let result = analyze(&provider, 0.0, &holdings, None, InvalidTickerPolicy::Fail).await;

        match result {
            Err(AppError::Validation(msg)) => assert!(msg.contains("BOGUS")),
            other => panic!("expected validation error, got {:?}", other.map(|r| r.portfolio_value)),
        }
    }

    #[tokio::test]
    async fn zero_value_portfolio_does_not_divide() {
        let provider = MockProvider::default();
        let report = analyze(&provider, 0.0, &[], None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.portfolio_value, 0.0);
        assert_eq!(report.cash_percent, 0.0);
        assert!(report.sector_distribution.is_empty());
        assert!(report.country_exposure.is_empty());
    }

    #[tokio::test]
    async fn input_order_is_preserved() {
        let provider = MockProvider::default()
            .with_stock("ZM", 70.0, "Communication", "US")
            .with_stock("AAPL", 175.35, "Technology", "US");
        // ZM first despite sorting lower alphabetically and by value.
        let holdings = [input("ZM", 1.0), input("AAPL", 100.0)];
        let report = analyze(&provider, 0.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        let tickers: Vec<&str> = report.holdings.iter().map(|h| h.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["ZM", "AAPL"]);
    }

    #[tokio::test]
    async fn distribution_sums_track_the_invested_share() {
        let provider = MockProvider::default()
            .with_stock("AAPL", 175.35, "Technology", "US")
            .with_stock("JPM", 150.10, "Banking", "US")
            .with_stock("SAP", 120.33, "Technology", "DE");
        let holdings = [input("AAPL", 7.0), input("JPM", 3.0), input("SAP", 11.0)];
        let report = analyze(&provider, 2500.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        let invested_share =
            (report.portfolio_value - report.cash_value) / report.portfolio_value * 100.0;
        let sector_sum: f64 = report.sector_distribution.values().sum();
        let country_sum: f64 = report.country_exposure.values().sum();

        assert!((sector_sum - invested_share).abs() < 0.1);
        assert!((country_sum - invested_share).abs() < 0.1);
    }

    #[tokio::test]
    async fn missing_profile_fields_fall_back_to_unknown() {
        let provider = MockProvider::default().with_bare_profile("XYZ", 40.0);
        let holdings = [input("XYZ", 2.0)];
        let report = analyze(&provider, 0.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        assert_eq!(report.holdings[0].sector, "Unknown");
        assert_eq!(report.holdings[0].country, "Unknown");
        assert_eq!(report.sector_distribution["Unknown"], 100.0);
    }

    #[tokio::test]
    async fn quantity_is_never_validated() {
        let provider = MockProvider::default().with_stock("AAPL", 175.35, "Technology", "US");
        let holdings = [input("AAPL", 0.0)];
        let report = analyze(&provider, 100.0, &holdings, None, InvalidTickerPolicy::Drop)
            .await
            .unwrap();

        // Zero quantity survives validation and contributes zero value.
        assert_eq!(report.holdings.len(), 1);
        assert_eq!(report.holdings[0].value, 0.0);
        assert_eq!(report.portfolio_value, 100.0);
    }
}
