//! OpenAI-compatible chat backend for the summarisation oracle.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use super::config::SummarizeConfig;
use super::provider::{build_prompt, SummaryProvider};

/// Summarisation provider backed by an OpenAI-compatible chat completion
/// endpoint.
pub struct OpenAiSummaryProvider {
    client: Client,
    api_key: String,
    config: SummarizeConfig,
}

impl OpenAiSummaryProvider {
    pub fn new(api_key: String, config: SummarizeConfig) -> Self {
        Self {
            client: Client::new(),
            api_key,
            config,
        }
    }

    /// Creates a provider from `OPENAI_API_KEY` and `SUMMARY_*` environment
    /// variables.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        Ok(Self::new(api_key, SummarizeConfig::from_env()))
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatRequestMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl SummaryProvider for OpenAiSummaryProvider {
    async fn summarize(&self, code: &str) -> Result<String> {
        let start = Instant::now();
        let url = format!("{}/chat/completions", self.config.api_base);

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatRequestMessage {
                role: "user".to_string(),
                content: build_prompt(code),
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(model = %self.config.model, "sending summarisation request");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("failed to send summarisation request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!(
                "summarisation request failed with status {status}: {error_text}"
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .context("failed to parse summarisation response")?;

        let content = chat_response
            .choices
            .first()
            .context("no choices in summarisation response")?
            .message
            .content
            .clone();

        debug!(latency_ms = start.elapsed().as_millis() as u64, "summary received");

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/models", self.config.api_base);
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                warn!("summarisation health check failed: {e}");
                Ok(false)
            }
        }
    }
}
