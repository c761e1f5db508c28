//! Domain generator using LLM

use crate::config::ProviderSettings;
use crate::error::{DomainMuseError, Result};
use crate::llm::{create_provider, LlmProvider};
use crate::types::{DomainSuggestion, GenerationRequest, LlmConfig, ProviderKind};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

/// Domain generator that uses LLM to generate domain suggestions
#[derive(Clone)]
pub struct DomainGenerator {
    providers: Arc<RwLock<HashMap<ProviderKind, Arc<dyn LlmProvider>>>>,
    default_provider: Arc<RwLock<ProviderKind>>,
}

impl DomainGenerator {
    /// Create a new domain generator
    pub fn new() -> Self {
        Self {
            providers: Arc::new(RwLock::new(HashMap::new())),
            default_provider: Arc::new(RwLock::new(ProviderKind::Gemini)),
        }
    }

    /// Build a generator with every provider the settings describe
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        settings.ensure_usable()?;

        let generator = Self::new();
        for config in &settings.providers {
            match generator.add_provider(config) {
                Ok(()) => tracing::debug!(provider = %config.provider, model = %config.model, "Provider configured"),
                Err(e) => tracing::warn!(provider = %config.provider, error = %e, "Skipping provider"),
            }
        }

        if !generator.is_ready() {
            return Err(DomainMuseError::config("No LLM provider could be configured"));
        }
        generator.set_default_provider(settings.default_provider());
        Ok(generator)
    }

    /// Add an LLM provider from configuration
    pub fn add_provider(&self, config: &LlmConfig) -> Result<()> {
        let provider = create_provider(config)?;
        self.insert_provider(Arc::from(provider));
        Ok(())
    }

    /// Register a ready-made provider under its kind
    pub fn insert_provider(&self, provider: Arc<dyn LlmProvider>) {
        let mut providers = self.providers.write();
        providers.insert(provider.kind(), provider);
    }

    /// Set default provider; ignored if it is not configured
    pub fn set_default_provider(&self, provider: ProviderKind) {
        let providers = self.providers.read();
        if providers.contains_key(&provider) {
            *self.default_provider.write() = provider;
        }
    }

    pub fn default_provider(&self) -> ProviderKind {
        *self.default_provider.read()
    }

    /// Generate domain suggestions using default provider
    pub async fn generate(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
        let default_provider = self.default_provider();
        self.generate_with_provider(request, default_provider).await
    }

    /// Generate domain suggestions using specific provider
    pub async fn generate_with_provider(
        &self,
        request: &GenerationRequest,
        provider_kind: ProviderKind,
    ) -> Result<Vec<DomainSuggestion>> {
        request.validate()?;
        let start_time = Instant::now();

        // Clone the Arc so no lock is held across the request
        let provider = {
            let providers = self.providers.read();
            providers
                .get(&provider_kind)
                .ok_or_else(|| DomainMuseError::config(format!("Provider not configured: {}", provider_kind)))?
                .clone()
        };

        let result = provider.suggest_domains(request).await;

        match &result {
            Ok(domains) => {
                tracing::info!(
                    provider = %provider_kind,
                    model = %provider.model(),
                    domains_count = %domains.len(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Domain generation completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    provider = %provider_kind,
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Domain generation failed"
                );
            }
        }

        result
    }

    /// Generate with the default provider, falling back to the others
    pub async fn generate_with_fallback(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
        request.validate()?;
        let default_provider = self.default_provider();

        let mut order = vec![default_provider];
        order.extend(
            ProviderKind::ALL
                .into_iter()
                .filter(|kind| *kind != default_provider && self.has_provider(*kind)),
        );

        let mut last_error = None;
        for provider_kind in order {
            if !self.has_provider(provider_kind) {
                continue;
            }
            match self.generate_with_provider(request, provider_kind).await {
                Ok(result) => {
                    if provider_kind != default_provider {
                        tracing::info!(provider = %provider_kind, "Used fallback provider");
                    }
                    return Ok(result);
                }
                // invalid input fails the same way on every provider
                Err(e @ DomainMuseError::Validation { .. }) => return Err(e),
                Err(e) => last_error = Some(e),
            }
        }

        Err(last_error.unwrap_or_else(|| DomainMuseError::config("No providers configured")))
    }

    /// Get configured providers
    pub fn available_providers(&self) -> Vec<ProviderKind> {
        let providers = self.providers.read();
        ProviderKind::ALL
            .into_iter()
            .filter(|kind| providers.contains_key(kind))
            .collect()
    }

    pub fn has_provider(&self, provider: ProviderKind) -> bool {
        self.providers.read().contains_key(&provider)
    }

    /// Check if any providers are configured
    pub fn is_ready(&self) -> bool {
        !self.providers.read().is_empty()
    }
}

impl Default for DomainGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        kind: ProviderKind,
        fail: bool,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(kind: ProviderKind, fail: bool) -> Arc<Self> {
            Arc::new(Self {
                kind,
                fail,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for FakeProvider {
        async fn suggest_domains(&self, request: &GenerationRequest) -> Result<Vec<DomainSuggestion>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(DomainMuseError::llm_provider(self.kind, "boom", Some(500)));
            }
            Ok(vec![DomainSuggestion::new(
                format!("{}.{}", self.kind, request.tld),
                "from fake",
            )])
        }

        fn kind(&self) -> ProviderKind {
            self.kind
        }

        fn model(&self) -> &str {
            "fake"
        }

        fn is_ready(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_generate_uses_default_provider() {
        let generator = DomainGenerator::new();
        generator.insert_provider(FakeProvider::new(ProviderKind::OpenAi, false));
        generator.insert_provider(FakeProvider::new(ProviderKind::Ollama, false));
        generator.set_default_provider(ProviderKind::Ollama);

        let result = generator.generate(&GenerationRequest::new("news")).await.unwrap();
        assert_eq!(result[0].name, "ollama.com");
    }

    #[tokio::test]
    async fn test_fallback_after_failure() {
        let generator = DomainGenerator::new();
        let failing = FakeProvider::new(ProviderKind::Gemini, true);
        generator.insert_provider(failing.clone());
        generator.insert_provider(FakeProvider::new(ProviderKind::Anthropic, false));
        generator.set_default_provider(ProviderKind::Gemini);

        let request = GenerationRequest::new("news").with_tld("io");
        let result = generator.generate_with_fallback(&request).await.unwrap();
        assert_eq!(result[0].name, "anthropic.io");
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_all_providers_fail() {
        let generator = DomainGenerator::new();
        generator.insert_provider(FakeProvider::new(ProviderKind::Gemini, true));
        let err = generator
            .generate_with_fallback(&GenerationRequest::new("news"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainMuseError::LlmProvider { .. }));
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_provider() {
        let generator = DomainGenerator::new();
        let provider = FakeProvider::new(ProviderKind::Gemini, false);
        generator.insert_provider(provider.clone());

        let request = GenerationRequest::new("news").with_count(11);
        assert!(generator.generate_with_fallback(&request).await.is_err());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unconfigured_default_is_ignored() {
        let generator = DomainGenerator::new();
        generator.insert_provider(FakeProvider::new(ProviderKind::OpenAi, false));
        generator.set_default_provider(ProviderKind::Anthropic);
        assert_eq!(generator.default_provider(), ProviderKind::Gemini);
        assert_eq!(generator.available_providers(), vec![ProviderKind::OpenAi]);
    }

    #[test]
    fn test_from_settings_requires_a_provider() {
        assert!(DomainGenerator::from_settings(&ProviderSettings::default()).is_err());

        let settings = ProviderSettings {
            providers: vec![LlmConfig::new(ProviderKind::OpenAi, "sk-test")],
            preferred: None,
        };
        let generator = DomainGenerator::from_settings(&settings).unwrap();
        assert_eq!(generator.default_provider(), ProviderKind::OpenAi);
    }
}
