//! Ollama chat client for posting enrichment and query suggestions.

use crate::config::ModelConfig;
use crate::enrich::prompts::{
    enrichment_prompt, parse_enrichment, parse_suggestions, suggestion_prompt,
    ENRICH_SYSTEM_PROMPT, SUGGEST_SYSTEM_PROMPT,
};
use crate::models::{Enrichment, JobRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Shortest query that gets suggestions.
pub const MIN_SUGGEST_CHARS: usize = 3;

/// Whether a query is long enough to ask for suggestions.
///
/// Counts characters as typed, whitespace included.
pub fn wants_suggestions(query: &str) -> bool {
    query.chars().count() >= MIN_SUGGEST_CHARS
}

/// Configuration for the enricher.
#[derive(Debug, Clone)]
pub struct EnricherConfig {
    pub ollama_url: String,
    pub model_name: String,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl Default for EnricherConfig {
    fn default() -> Self {
        Self::from(&ModelConfig::default())
    }
}

impl From<&ModelConfig> for EnricherConfig {
    fn from(model: &ModelConfig) -> Self {
        Self {
            ollama_url: model.ollama_url.trim_end_matches('/').to_string(),
            model_name: model.name.clone(),
            temperature: model.temperature,
            timeout_seconds: model.timeout_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Ollama chat API request.
#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
    format: &'static str,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Ollama chat API response.
#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Asks a local model to fill in what a posting leaves out.
pub struct JobEnricher {
    config: EnricherConfig,
    http_client: reqwest::Client,
}

impl JobEnricher {
    pub fn new(config: EnricherConfig) -> Result<Self> {
        info!("Using model {} at {}", config.model_name, config.ollama_url);

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Suggested salary range, company rating and perks for `job`.
    pub async fn enrich(&self, job: &JobRecord) -> Result<Enrichment> {
        info!("Enriching job {}", job.id);
        let response = self
            .send_prompt(ENRICH_SYSTEM_PROMPT, &enrichment_prompt(job))
            .await?;
        debug!("Enrichment response: {} chars", response.len());
        parse_enrichment(&response)
    }

    /// Autocomplete suggestions for a partial query.
    ///
    /// Short queries are answered locally with nothing. Model failures are
    /// logged and also yield an empty list.
    pub async fn suggest(&self, query: &str) -> Vec<String> {
        if !wants_suggestions(query) {
            return Vec::new();
        }

        match self.send_prompt(SUGGEST_SYSTEM_PROMPT, &suggestion_prompt(query)).await {
            Ok(response) => parse_suggestions(&response).unwrap_or_else(|| {
                warn!("Model returned no usable suggestions for '{}'", query);
                Vec::new()
            }),
            Err(e) => {
                warn!("Suggestion request failed: {:#}", e);
                Vec::new()
            }
        }
    }

    async fn send_prompt(&self, system: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.config.ollama_url);

        let request = OllamaChatRequest {
            model: self.config.model_name.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
            stream: false,
            format: "json",
            options: OllamaOptions {
                temperature: self.config.temperature,
            },
        };

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    anyhow::anyhow!("Request timed out after {}s", self.config.timeout_seconds)
                } else if e.is_connect() {
                    anyhow::anyhow!("Cannot connect to Ollama at {}", self.config.ollama_url)
                } else {
                    anyhow::anyhow!("Failed to send request: {}", e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("Ollama API error {}: {}", status, body));
        }

        let chat_response: OllamaChatResponse = response
            .json()
            .await
            .context("Failed to parse Ollama response")?;

        Ok(chat_response.message.content)
    }
}
