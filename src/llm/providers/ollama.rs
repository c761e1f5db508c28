//! Ollama provider implementation
//!
//! Supports local Ollama API for running LLMs locally

use crate::error::{DomainMuseError, Result};
use crate::llm::LlmProvider;
use crate::types::{DomainSuggestion, GenerationRequest, LlmConfig, ProviderKind};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{build_domain_prompt, http_error, parse_domain_suggestions};

/// Ollama provider implementation for local LLM inference
pub struct OllamaProvider {
    client: Client,
    model: String,
    base_url: String,
    temperature: f32,
}

impl OllamaProvider {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60)) // local inference is slow
            .build()
            .map_err(|e| DomainMuseError::network(e.to_string(), None, None))?;

        Ok(Self {
            client,
            model: config.model.clone(),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| "http://localhost:11434".to_string()),
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn suggest_domains(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
        let body = OllamaRequest {
            model: self.model.clone(),
            prompt: build_domain_prompt(request),
            format: "json",
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainMuseError::network(format!("Failed to connect to Ollama: {}", e), None, Some(url.clone()))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            return Err(http_error(ProviderKind::Ollama, status, &error_text));
        }

        let ollama_response: OllamaResponse = response
            .json()
            .await
            .map_err(|e| DomainMuseError::parse(e.to_string(), None))?;

        parse_domain_suggestions(&ollama_response.response, request)
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_ready(&self) -> bool {
        true
    }
}

// Ollama API structures
#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    format: &'static str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}
