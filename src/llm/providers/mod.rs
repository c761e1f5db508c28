//! LLM provider implementations
//!
//! Each provider is implemented in its own module; prompt construction,
//! reply parsing and HTTP error mapping are shared here.

pub mod anthropic;
pub mod gemini;
pub mod ollama;
pub mod openai;

// Re-export providers for easy access
pub use anthropic::AnthropicProvider;
pub use gemini::GeminiProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use crate::domain::DomainValidator;
use crate::error::{DomainMuseError, Result};
use crate::types::{DomainSuggestion, GenerationRequest, ProviderKind};
use serde::Deserialize;
use std::collections::HashSet;

/// Suggestion shape the prompt asks the model for
#[derive(Debug, Clone, Deserialize)]
pub struct DomainSuggestionRaw {
    #[serde(rename = "domainName", alias = "name", alias = "domain")]
    pub domain_name: String,
    #[serde(default, alias = "rationale")]
    pub reasoning: String,
}

/// Build domain generation prompt
pub fn build_domain_prompt(request: &GenerationRequest) -> String {
    format!(
        "You are a creative domain name generator. You will receive aggregated news content and generate {count} domain name suggestions based on the content.

The domain names should:
- Be relevant to the news content.
- Not exceed {max_words} words.
- Use the \".{tld}\" TLD.

For each domain name, provide a brief explanation of your reasoning.

Return ONLY a JSON array of objects with this format:
[
  {{
    \"domainName\": \"example.{tld}\",
    \"reasoning\": \"why this name works\"
  }}
]

News Content:
{content}",
        count = request.count,
        max_words = request.max_words_in_name,
        tld = request.tld,
        content = request.content,
    )
}

/// Parse domain suggestions from a model reply.
///
/// Names are normalized under the requested TLD; invalid or duplicate names
/// are dropped and the list is cut to the requested count.
pub fn parse_domain_suggestions(content: &str, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
    let json_start = content.find('[').unwrap_or(0);
    let json_content = content.get(json_start..).unwrap_or(content);

    // read one array and ignore whatever prose follows it
    let raw_suggestions: Vec<DomainSuggestionRaw> = serde_json::Deserializer::from_str(json_content)
        .into_iter::<Vec<DomainSuggestionRaw>>()
        .next()
        .unwrap_or_else(|| serde_json::from_str(json_content))
        .map_err(|e| {
            DomainMuseError::parse(
                format!("Failed to parse AI response as JSON: {}", e),
                Some(json_content.to_string()),
            )
        })?;

    let validator = DomainValidator::new(&request.tld);
    let mut seen = HashSet::new();
    let mut suggestions = Vec::new();

    for raw in raw_suggestions {
        let name = match validator.normalize(&raw.domain_name) {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(name = %raw.domain_name, error = %e, "Dropping invalid suggestion");
                continue;
            }
        };
        if !seen.insert(name.clone()) {
            continue;
        }
        suggestions.push(DomainSuggestion::new(name, raw.reasoning.trim()));
        if suggestions.len() >= usize::from(request.count) {
            break;
        }
    }

    if suggestions.is_empty() {
        return Err(DomainMuseError::parse(
            "AI response contained no usable domain names",
            Some(json_content.to_string()),
        ));
    }

    Ok(suggestions)
}

/// Map a non-success HTTP reply from a provider to an error
pub fn http_error(provider: ProviderKind, status: u16, body: &str) -> DomainMuseError {
    if body.contains("API key not valid") || matches!(status, 401 | 403) {
        return DomainMuseError::authentication(format!(
            "Your {} API key is invalid. Please check and try again.",
            provider
        ));
    }

    let message = match status {
        404 if provider == ProviderKind::Ollama => {
            "Model not found. Pull it first with `ollama pull <model>`".to_string()
        }
        429 => "Rate limit exceeded (429). Please try again later".to_string(),
        500..=599 => format!("Server error ({}). The API service is experiencing issues", status),
        _ => format!("API request failed ({}): {}", status, body),
    };
    DomainMuseError::llm_provider(provider, message, Some(status))
}
