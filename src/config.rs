//! Provider configuration from the environment

use crate::error::{DomainMuseError, Result};
use crate::types::{LlmConfig, ProviderKind};

/// LLM credentials discovered from environment variables
#[derive(Debug, Clone, Default)]
pub struct ProviderSettings {
    pub providers: Vec<LlmConfig>,
    /// Explicit default from `DOMAIN_MUSE_PROVIDER`
    pub preferred: Option<ProviderKind>,
}

impl ProviderSettings {
    /// Read settings from the process environment (after `.env` loading)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary key lookup
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| get(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut providers = Vec::new();

        if let Some(api_key) = get("GEMINI_API_KEY").or_else(|| get("GOOGLE_GENAI_API_KEY")) {
            let mut config = LlmConfig::new(ProviderKind::Gemini, api_key);
            if let Some(model) = get("GEMINI_MODEL") {
                config.model = model;
            }
            providers.push(config);
        }

        if let Some(api_key) = get("OPENAI_API_KEY") {
            let mut config = LlmConfig::new(ProviderKind::OpenAi, api_key);
            if let Some(model) = get("OPENAI_MODEL") {
                config.model = model;
            }
            config.base_url = get("OPENAI_BASE_URL");
            providers.push(config);
        }

        if let Some(api_key) = get("ANTHROPIC_API_KEY") {
            let mut config = LlmConfig::new(ProviderKind::Anthropic, api_key);
            if let Some(model) = get("ANTHROPIC_MODEL") {
                config.model = model;
            }
            providers.push(config);
        }

        // Ollama needs no key; opt in by naming a model.
        if let Some(model) = get("OLLAMA_MODEL") {
            let mut config = LlmConfig::new(ProviderKind::Ollama, "");
            config.model = model;
            config.base_url = get("OLLAMA_BASE_URL");
            providers.push(config);
        }

        let preferred = get("DOMAIN_MUSE_PROVIDER")
            .map(|p| p.parse::<ProviderKind>())
            .transpose()?;

        Ok(Self { providers, preferred })
    }

    /// Apply command line overrides on top of the environment.
    ///
    /// A `--api-key` without `--provider` targets the default provider.
    pub fn apply_overrides(
        &mut self,
        provider: Option<ProviderKind>,
        model: Option<String>,
        api_key: Option<String>,
    ) {
        if provider.is_some() {
            self.preferred = provider;
        }
        if model.is_none() && api_key.is_none() {
            return;
        }

        let kind = self.default_provider();
        let index = match self.providers.iter().position(|c| c.provider == kind) {
            Some(index) => index,
            None => {
                self.providers.push(LlmConfig::new(kind, ""));
                self.providers.len() - 1
            }
        };
        let config = &mut self.providers[index];
        if let Some(model) = model {
            config.model = model;
        }
        if let Some(api_key) = api_key {
            config.api_key = api_key;
        }
    }

    /// The provider tried first: explicit preference, else the first
    /// configured one in preference order, else Gemini.
    pub fn default_provider(&self) -> ProviderKind {
        if let Some(preferred) = self.preferred {
            return preferred;
        }
        ProviderKind::ALL
            .into_iter()
            .find(|kind| self.providers.iter().any(|c| c.provider == *kind))
            .unwrap_or(ProviderKind::Gemini)
    }

    /// Fail early when nothing usable is configured
    pub fn ensure_usable(&self) -> Result<()> {
        let usable = self
            .providers
            .iter()
            .any(|c| !c.provider.requires_api_key() || !c.api_key.is_empty());
        if usable {
            Ok(())
        } else {
            Err(DomainMuseError::config(
                "No LLM providers configured. Set GEMINI_API_KEY, OPENAI_API_KEY, ANTHROPIC_API_KEY or OLLAMA_MODEL, or pass --api-key.",
            ))
        }
    }
}
