use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1";
const DEFAULT_MODEL: &str = "openai/gpt-oss-20b:together";

#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Insight generation is disabled")]
    Disabled,
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("api error: {0}")]
    Api(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Configuration for the narrative insight collaborator.
#[derive(Debug, Clone)]
pub struct InsightConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_tokens: usize,
    pub temperature: f32,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 800,
            temperature: 0.7,
        }
    }
}

impl InsightConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: std::env::var("LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("LLM_MODEL").unwrap_or(defaults.model),
            max_tokens: defaults.max_tokens,
            temperature: defaults.temperature,
        }
    }
}

/// Trait for chat-completion backends.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    async fn generate_completion(&self, prompt: String) -> Result<String, InsightError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

/// Provider speaking the OpenAI chat-completions wire format. The base URL
/// is configurable so OpenAI-compatible routers work too.
pub struct ChatCompletionsProvider {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
    client: Client,
}

impl ChatCompletionsProvider {
    pub fn new(api_key: String, config: &InsightConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            api_key,
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        }
    }

    async fn call_with_retry(&self, request: ChatRequest) -> Result<ChatResponse, InsightError> {
        let max_retries = 3;
        let mut delay = Duration::from_secs(1);

        let mut attempt = 0;
        loop {
            match self.call(&request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    attempt += 1;
                    if attempt >= max_retries {
                        error!("Chat completion failed after {} retries: {}", max_retries, e);
                        return Err(e);
                    }
                    warn!(
                        "Chat completion failed (attempt {}/{}): {}. Retrying in {:?}...",
                        attempt, max_retries, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                }
            }
        }
    }

    async fn call(&self, request: &ChatRequest) -> Result<ChatResponse, InsightError> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InsightError::Timeout
                } else {
                    InsightError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == 429 {
            return Err(InsightError::RateLimited);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(InsightError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| InsightError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl InsightProvider for ChatCompletionsProvider {
    async fn generate_completion(&self, prompt: String) -> Result<String, InsightError> {
        info!(
            "Generating insight completion (model: {}, max_tokens: {})",
            self.model, self.max_tokens
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.call_with_retry(request).await?;

        let content = response
            .choices
            .first()
            .ok_or_else(|| InsightError::InvalidResponse("No choices in response".to_string()))?
            .message
            .content
            .clone();

        if let Some(usage) = response.usage {
            info!(
                "Insight generated. Tokens: {} prompt + {} completion = {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        Ok(content)
    }
}

/// Narrative insight service. Disabled (every call fails with
/// `InsightError::Disabled`) when no API key is configured.
pub struct InsightService {
    provider: Option<Arc<dyn InsightProvider>>,
}

impl InsightService {
    pub fn new(config: InsightConfig) -> Self {
        let provider = match &config.api_key {
            Some(api_key) => {
                info!("Initializing insight service ({})", config.base_url);
                Some(Arc::new(ChatCompletionsProvider::new(api_key.clone(), &config))
                    as Arc<dyn InsightProvider>)
            }
            None => {
                warn!("LLM_API_KEY not configured. Insight generation disabled.");
                None
            }
        };

        Self { provider }
    }

    #[cfg(test)]
    fn with_provider(provider: Arc<dyn InsightProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Sends the portfolio summary to the collaborator and returns its reply
    /// as an opaque text blob, unparsed.
    pub async fn generate_portfolio_insights(
        &self,
        summary: &serde_json::Value,
    ) -> Result<String, InsightError> {
        let provider = self.provider.as_ref().ok_or(InsightError::Disabled)?;
        provider.generate_completion(build_prompt(summary)).await
    }
}

fn build_prompt(summary: &serde_json::Value) -> String {
    format!(
        r#"You are an AI financial analyst.
Your job is to analyze a stock portfolio and give clear insights, risks, and recommendations.

### Input:
- Cash available
- Holdings
- Sector Distribution
- Country Exposure
- User Profile (optional): risk tolerance, investment horizon, goal, country preference

### Instructions:
1. Summarize the portfolio in plain English (easy for a beginner).
2. Identify risks (overexposure to sector, country, cash imbalance, etc.).
3. Suggest diversification strategies tailored to the user's profile.
4. Recommend 2-3 specific sectors to invest in and explain why.
5. Suggest 2-3 potential stocks (with reasoning) that match the user's profile.
6. Keep the response concise but insightful.
7. Use numbers where possible (percentages, values).

### Output Format:
Return the results as JSON with the keys summary, risks, recommendations,
and suggested_allocation (table with asset, target %, reason).

{}"#,
        summary
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = InsightConfig::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn service_disabled_without_api_key() {
        let service = InsightService::new(InsightConfig::default());
        assert!(!service.is_enabled());
    }

    #[tokio::test]
    async fn disabled_service_returns_disabled_error() {
        let service = InsightService::new(InsightConfig::default());
        let result = service
            .generate_portfolio_insights(&serde_json::json!({"cash": 100.0}))
            .await;
        assert!(matches!(result, Err(InsightError::Disabled)));
    }

    #[tokio::test]
    async fn response_is_passed_through_verbatim() {
        struct Canned;

        #[async_trait]
        impl InsightProvider for Canned {
            async fn generate_completion(&self, prompt: String) -> Result<String, InsightError> {
                assert!(prompt.contains("\"cash\":5000"));
                Ok("not json at all, and that is fine".to_string())
            }
        }

        let service = InsightService::with_provider(Arc::new(Canned));
        let content = service
            .generate_portfolio_insights(&serde_json::json!({"cash": 5000}))
            .await
            .unwrap();
        assert_eq!(content, "not json at all, and that is fine");
    }

    #[test]
    fn prompt_embeds_the_summary() {
        let prompt = build_prompt(&serde_json::json!({"cash": 1.5, "holdings": []}));
        assert!(prompt.contains("financial analyst"));
        assert!(prompt.contains("\"holdings\":[]"));
    }
}
