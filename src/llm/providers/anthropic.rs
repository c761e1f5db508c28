//! Anthropic provider implementation

use crate::error::{DomainMuseError, Result};
use crate::llm::LlmProvider;
use crate::types::{DomainSuggestion, GenerationRequest, LlmConfig, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{build_domain_prompt, http_error, parse_domain_suggestions};

/// Anthropic provider implementation
pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl AnthropicProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DomainMuseError::config("Anthropic API key is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| DomainMuseError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "https://api.anthropic.com/v1".to_string()),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn suggest_domains(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
        let body = AnthropicRequest {
            model: self.model.clone(),
            messages: vec![AnthropicMessage {
                role: "user".to_string(),
                content: build_domain_prompt(request),
            }],
            temperature: self.temperature,
            max_tokens: 2000,
        };

        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainMuseError::network(
                    format!("Failed to connect to Anthropic API: {}", e),
                    None,
                    Some(url.clone()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(http_error(ProviderKind::Anthropic, status, &error_text));
        }

        let anthropic_response: AnthropicResponse = response
            .json()
            .await
            .map_err(|e| DomainMuseError::parse(e.to_string(), None))?;

        let content: String = anthropic_response
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect();
        if content.is_empty() {
            return Err(DomainMuseError::llm_provider(
                ProviderKind::Anthropic,
                "No text in Anthropic API response",
                None,
            ));
        }

        parse_domain_suggestions(&content, request)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Anthropic
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// Anthropic API structures
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    messages: Vec<AnthropicMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct AnthropicMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    text: Option<String>,
}
