//! Core types and structures for domain-muse

use crate::error::{DomainMuseError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Default timeout applied to a single registry lookup
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// LLM provider type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    OpenAi,
    Anthropic,
    Ollama,
}

impl ProviderKind {
    /// All providers, in default preference order
    pub const ALL: [ProviderKind; 4] = [
        ProviderKind::Gemini,
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Ollama,
    ];

    /// Model used when none is configured
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::OpenAi => "gpt-4.1-mini",
            ProviderKind::Anthropic => "claude-sonnet-4-0",
            ProviderKind::Ollama => "llama3.1",
        }
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, ProviderKind::Ollama)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Anthropic => write!(f, "anthropic"),
            ProviderKind::Ollama => write!(f, "ollama"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = DomainMuseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "ollama" => Ok(ProviderKind::Ollama),
            other => Err(DomainMuseError::config(format!(
                "Unsupported LLM provider: {}. Supported providers: gemini, openai, anthropic, ollama",
                other
            ))),
        }
    }
}

/// Result of a single availability resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityOutcome {
    Available,
    Taken,
    /// The registry state could not be observed
    Undetermined,
}

impl AvailabilityOutcome {
    /// Position in the display order (available first)
    pub fn sort_rank(&self) -> u8 {
        match self {
            AvailabilityOutcome::Available => 0,
            AvailabilityOutcome::Taken => 1,
            AvailabilityOutcome::Undetermined => 2,
        }
    }
}

impl std::fmt::Display for AvailabilityOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityOutcome::Available => write!(f, "available"),
            AvailabilityOutcome::Taken => write!(f, "taken"),
            AvailabilityOutcome::Undetermined => write!(f, "undetermined"),
        }
    }
}

/// How much content to aggregate before generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchDepth {
    #[default]
    Light,
    Deep,
}

impl FetchDepth {
    /// Maximum number of characters kept in the aggregate
    pub fn char_budget(&self) -> usize {
        match self {
            FetchDepth::Light => 4_000,
            FetchDepth::Deep => 12_000,
        }
    }
}

impl FromStr for FetchDepth {
    type Err = DomainMuseError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(FetchDepth::Light),
            "deep" => Ok(FetchDepth::Deep),
            other => Err(DomainMuseError::validation(format!(
                "Unknown fetch depth '{}', expected light or deep",
                other
            ))),
        }
    }
}

/// Generated domain suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSuggestion {
    /// Fully-qualified name, always ending with the requested TLD
    pub name: String,
    pub rationale: String,
    pub generated_at: DateTime<Utc>,
}

impl DomainSuggestion {
    pub fn new(name: impl Into<String>, rationale: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rationale: rationale.into(),
            generated_at: Utc::now(),
        }
    }
}

/// A suggestion paired with its availability check state.
///
/// `outcome` is `None` until the suggestion has been checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedSuggestion {
    pub suggestion: DomainSuggestion,
    pub outcome: Option<AvailabilityOutcome>,
}

impl CheckedSuggestion {
    pub fn unchecked(suggestion: DomainSuggestion) -> Self {
        Self {
            suggestion,
            outcome: None,
        }
    }

    pub fn with_outcome(suggestion: DomainSuggestion, outcome: AvailabilityOutcome) -> Self {
        Self {
            suggestion,
            outcome: Some(outcome),
        }
    }

    pub fn name(&self) -> &str {
        &self.suggestion.name
    }

    /// Whether the UI should offer a "check again" action
    pub fn needs_retry(&self) -> bool {
        self.outcome == Some(AvailabilityOutcome::Undetermined)
    }
}

/// Input to the suggestion generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub content: String,
    pub max_words_in_name: u8,
    /// Target TLD without the leading dot
    pub tld: String,
    pub count: u8,
}

impl GenerationRequest {
    pub const MAX_WORDS_RANGE: std::ops::RangeInclusive<u8> = 1..=5;
    pub const COUNT_RANGE: std::ops::RangeInclusive<u8> = 1..=10;
    pub const MAX_TLD_LEN: usize = 10;

    /// Create a request with the default constraints (3 words, `.com`, 3 names)
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            max_words_in_name: 3,
            tld: "com".to_string(),
            count: 3,
        }
    }

    pub fn with_tld(mut self, tld: impl Into<String>) -> Self {
        self.tld = tld.into().trim().trim_start_matches('.').to_lowercase();
        self
    }

    pub fn with_max_words(mut self, max_words: u8) -> Self {
        self.max_words_in_name = max_words;
        self
    }

    pub fn with_count(mut self, count: u8) -> Self {
        self.count = count;
        self
    }

    /// Check the request against its allowed ranges
    pub fn validate(&self) -> Result<()> {
        if self.content.trim().is_empty() {
            return Err(crate::validation_error!("content to generate from cannot be empty"));
        }
        if !Self::MAX_WORDS_RANGE.contains(&self.max_words_in_name) {
            return Err(crate::validation_error!(
                "max words in name must be within 1..=5, got {}",
                self.max_words_in_name
            ));
        }
        if !Self::COUNT_RANGE.contains(&self.count) {
            return Err(crate::validation_error!(
                "number of domains must be within 1..=10, got {}",
                self.count
            ));
        }
        if self.tld.is_empty() {
            return Err(crate::validation_error!("TLD is required"));
        }
        if self.tld.len() > Self::MAX_TLD_LEN {
            return Err(crate::validation_error!(
                "TLD '{}' is longer than {} characters",
                self.tld,
                Self::MAX_TLD_LEN
            ));
        }
        Ok(())
    }
}

/// Configuration for the availability resolver
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound for one registry lookup, connect to last byte
    pub timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: ProviderKind,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn new(provider: ProviderKind, api_key: impl Into<String>) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            api_key: api_key.into(),
            base_url: None,
            temperature: 0.7,
        }
    }
}
