//! LLM (Large Language Model) integration module
//!
//! Turns aggregated content into domain name suggestions.

pub mod generator;
pub mod providers;

// Re-export main functionality
pub use generator::DomainGenerator;

use crate::error::Result;
use crate::types::{DomainSuggestion, GenerationRequest, LlmConfig, ProviderKind};
use async_trait::async_trait;

/// Core trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate domain suggestions, in the model's order
    async fn suggest_domains(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>>;

    /// Get provider kind
    fn kind(&self) -> ProviderKind;

    /// Get model name being used
    fn model(&self) -> &str;

    /// Check if provider is configured and ready
    fn is_ready(&self) -> bool;
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>> {
    match config.provider {
        ProviderKind::Gemini => Ok(Box::new(providers::GeminiProvider::new(config)?)),
        ProviderKind::OpenAi => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        ProviderKind::Anthropic => Ok(Box::new(providers::AnthropicProvider::new(config)?)),
        ProviderKind::Ollama => Ok(Box::new(providers::OllamaProvider::new(config)?)),
    }
}
