//! OpenAI provider implementation
//!
//! Supports OpenAI API and OpenAI-compatible APIs (OpenRouter, OneAPI, etc.)

use crate::error::{DomainMuseError, Result};
use crate::llm::LlmProvider;
use crate::types::{DomainSuggestion, GenerationRequest, LlmConfig, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{build_domain_prompt, http_error, parse_domain_suggestions};

/// OpenAI provider implementation
pub struct OpenAiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OpenAiProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(DomainMuseError::config("OpenAI API key is required"));
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
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            temperature: config.temperature,
        })
    }

    /// Intelligently constructs the full API URL
    fn build_url(&self, endpoint: &str) -> String {
        let base_url = self.base_url.trim_end_matches('/');
        if base_url.ends_with("/v1") {
            format!("{}{}", base_url, endpoint)
        } else {
            format!("{}/v1{}", base_url, endpoint)
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn suggest_domains(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
        let prompt = build_domain_prompt(request);

        let body = OpenAiRequest {
            model: self.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_string(),
                    content: "You are a domain name generator. Return suggestions as a JSON array.".to_string(),
                },
                OpenAiMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: 2000,
        };

        let url = self.build_url("/chat/completions");
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainMuseError::network(format!("Failed to connect to API: {}", e), None, Some(url.clone()))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(http_error(ProviderKind::OpenAi, status, &error_text));
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| DomainMuseError::parse(e.to_string(), None))?;

        let content = openai_response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| DomainMuseError::llm_provider(ProviderKind::OpenAi, "No response from OpenAI API", None))?;

        parse_domain_suggestions(&content, request)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }
}

// OpenAI API structures
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<OpenAiMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct OpenAiMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> OpenAiProvider {
        let mut config = LlmConfig::new(ProviderKind::OpenAi, "sk-test");
        config.base_url = Some(base_url.to_string());
        OpenAiProvider::new(&config).unwrap()
    }

    #[test]
    fn test_build_url_adds_version_once() {
        assert_eq!(
            provider("https://api.openai.com/v1/").build_url("/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            provider("https://openrouter.ai/api").build_url("/chat/completions"),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }
}
