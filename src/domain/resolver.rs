//! Domain availability resolver

use crate::domain::classifier::classify_response;
use crate::domain::ranking::rank_by_availability;
use crate::domain::{RegistryLookup, WhoisLookup};
use crate::types::{AvailabilityOutcome, CheckedSuggestion, DomainSuggestion, ResolverConfig};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;

/// Resolves a domain to one of three availability outcomes.
///
/// Resolution never fails: timeouts, network errors and unsupported
/// registries all come back as [`AvailabilityOutcome::Undetermined`]. The
/// resolver keeps no state between calls.
#[derive(Clone)]
pub struct AvailabilityResolver {
    config: ResolverConfig,
    lookup: Arc<dyn RegistryLookup>,
}

impl AvailabilityResolver {
    /// Create a resolver backed by WHOIS with default configuration
    pub fn new() -> Self {
        Self::with_config(ResolverConfig::default())
    }

    /// Create a WHOIS-backed resolver with custom configuration
    pub fn with_config(config: ResolverConfig) -> Self {
        let whois = WhoisLookup::new().with_io_timeout(config.timeout);
        Self::with_lookup(config, Arc::new(whois))
    }

    /// Create a resolver over any registry lookup
    pub fn with_lookup(config: ResolverConfig, lookup: Arc<dyn RegistryLookup>) -> Self {
        Self { config, lookup }
    }

    /// Resolve a single fully-qualified domain
    pub async fn resolve(&self, domain: &str) -> AvailabilityOutcome {
        let start_time = Instant::now();
        let method = self.lookup.method_name();

        let outcome = match timeout(self.config.timeout, self.lookup.lookup(domain)).await {
            Ok(Ok(response)) => classify_response(&response),
            Ok(Err(e)) => {
                tracing::debug!(domain = %domain, method = method, error = %e, "Registry lookup failed");
                AvailabilityOutcome::Undetermined
            }
            Err(_) => {
                tracing::debug!(
                    domain = %domain,
                    method = method,
                    timeout_ms = %self.config.timeout.as_millis(),
                    "Registry lookup timed out"
                );
                AvailabilityOutcome::Undetermined
            }
        };

        tracing::debug!(
            domain = %domain,
            method = method,
            outcome = %outcome,
            duration_ms = %start_time.elapsed().as_millis(),
            "Domain resolution completed"
        );

        outcome
    }

    /// Resolve many domains concurrently.
    ///
    /// Outcomes are returned in input order regardless of completion order.
    pub async fn resolve_all(&self, domains: &[String]) -> Vec<AvailabilityOutcome> {
        let batch_start = Instant::now();
        let outcomes = join_all(domains.iter().map(|domain| self.resolve(domain))).await;

        let available = outcomes
            .iter()
            .filter(|o| **o == AvailabilityOutcome::Available)
            .count();
        let undetermined = outcomes
            .iter()
            .filter(|o| **o == AvailabilityOutcome::Undetermined)
            .count();

        tracing::info!(
            domains_requested = %domains.len(),
            available = %available,
            undetermined = %undetermined,
            batch_duration_ms = %batch_start.elapsed().as_millis(),
            "Batch resolution completed"
        );

        outcomes
    }

    /// Check every suggestion eagerly and rank the results for display
    pub async fn check_suggestions(&self, suggestions: Vec<DomainSuggestion>) -> Vec<CheckedSuggestion> {
        let names: Vec<String> = suggestions.iter().map(|s| s.name.clone()).collect();
        let outcomes = self.resolve_all(&names).await;

        let mut results: Vec<CheckedSuggestion> = suggestions
            .into_iter()
            .zip(outcomes)
            .map(|(suggestion, outcome)| CheckedSuggestion::with_outcome(suggestion, outcome))
            .collect();
        rank_by_availability(&mut results);
        results
    }

    /// Run a fresh resolution for every undetermined entry, then re-rank.
    ///
    /// Returns how many entries were checked again.
    pub async fn recheck_undetermined(&self, results: &mut [CheckedSuggestion]) -> usize {
        let pending: Vec<usize> = results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.needs_retry())
            .map(|(i, _)| i)
            .collect();
        if pending.is_empty() {
            return 0;
        }

        let names: Vec<String> = pending.iter().map(|&i| results[i].name().to_string()).collect();
        let outcomes = self.resolve_all(&names).await;
        for (index, outcome) in pending.iter().zip(outcomes) {
            results[*index].outcome = Some(outcome);
        }
        rank_by_availability(results);
        pending.len()
    }

    /// Get resolver configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl Default for AvailabilityResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{DomainMuseError, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    enum Behavior {
        Respond(&'static str),
        Fail,
        Hang,
    }

    struct ScriptedLookup {
        behavior: Behavior,
        calls: AtomicUsize,
    }

    impl ScriptedLookup {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RegistryLookup for ScriptedLookup {
        async fn lookup(&self, domain: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Respond(body) => Ok(body.to_string()),
                Behavior::Fail => Err(DomainMuseError::network("connection reset", None, Some(domain.to_string()))),
                Behavior::Hang => {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Ok(String::new())
                }
            }
        }

        fn method_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn resolver(lookup: Arc<ScriptedLookup>) -> AvailabilityResolver {
        let config = ResolverConfig {
            timeout: Duration::from_millis(50),
        };
        AvailabilityResolver::with_lookup(config, lookup)
    }

    #[tokio::test]
    async fn test_empty_response_is_available() {
        let outcome = resolver(ScriptedLookup::new(Behavior::Respond(""))).resolve("quiet.io").await;
        assert_eq!(outcome, AvailabilityOutcome::Available);
    }

    #[tokio::test]
    async fn test_lookup_error_is_undetermined() {
        let outcome = resolver(ScriptedLookup::new(Behavior::Fail)).resolve("example.com").await;
        assert_eq!(outcome, AvailabilityOutcome::Undetermined);
    }

    #[tokio::test]
    async fn test_timeout_is_undetermined() {
        let lookup = ScriptedLookup::new(Behavior::Hang);
        let outcome = resolver(lookup.clone()).resolve("slow.com").await;
        assert_eq!(outcome, AvailabilityOutcome::Undetermined);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_internal_retry() {
        let lookup = ScriptedLookup::new(Behavior::Fail);
        let _ = resolver(lookup.clone()).resolve("example.com").await;
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolution_is_idempotent() {
        let resolver = resolver(ScriptedLookup::new(Behavior::Respond("Domain Name: A.COM")));
        let first = resolver.resolve("a.com").await;
        let second = resolver.resolve("a.com").await;
        assert_eq!(first, AvailabilityOutcome::Taken);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_input_order() {
        let resolver = resolver(ScriptedLookup::new(Behavior::Respond("NOT FOUND")));
        let domains = vec!["a.com".to_string(), "b.com".to_string(), "c.com".to_string()];
        let outcomes = resolver.resolve_all(&domains).await;
        assert_eq!(outcomes, vec![AvailabilityOutcome::Available; 3]);
    }

    #[tokio::test]
    async fn test_check_suggestions_ranks_results() {
        struct ByName;

        #[async_trait]
        impl RegistryLookup for ByName {
            async fn lookup(&self, domain: &str) -> Result<String> {
                match domain {
                    "a.com" | "c.com" => Ok("No match for domain".to_string()),
                    "b.com" => Ok("Domain Name: B.COM".to_string()),
                    _ => Err(DomainMuseError::timeout("WHOIS read", 5)),
                }
            }

            fn method_name(&self) -> &'static str {
                "by-name"
            }
        }

        let resolver = AvailabilityResolver::with_lookup(ResolverConfig::default(), Arc::new(ByName));
        let suggestions = ["b.com", "a.com", "d.com", "c.com"]
            .iter()
            .map(|n| DomainSuggestion::new(*n, "why"))
            .collect();

        let results = resolver.check_suggestions(suggestions).await;
        let names: Vec<&str> = results.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a.com", "c.com", "b.com", "d.com"]);
        assert!(results[3].needs_retry());
    }

    #[tokio::test]
    async fn test_recheck_only_touches_undetermined() {
        let lookup = ScriptedLookup::new(Behavior::Respond(""));
        let resolver = resolver(lookup.clone());
        let mut results = vec![
            CheckedSuggestion::with_outcome(DomainSuggestion::new("z.com", ""), AvailabilityOutcome::Undetermined),
            CheckedSuggestion::with_outcome(DomainSuggestion::new("y.com", ""), AvailabilityOutcome::Taken),
        ];

        let rechecked = resolver.recheck_undetermined(&mut results).await;
        assert_eq!(rechecked, 1);
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
        assert_eq!(results[0].name(), "z.com");
        assert_eq!(results[0].outcome, Some(AvailabilityOutcome::Available));
        assert_eq!(results[1].outcome, Some(AvailabilityOutcome::Taken));
    }

    #[tokio::test]
    async fn test_resolve_all_runs_concurrently() {
        let lookup = ScriptedLookup::new(Behavior::Hang);
        let resolver = resolver(lookup.clone());
        let domains: Vec<String> = (0..8).map(|i| format!("d{i}.com")).collect();

        let start = Instant::now();
        let outcomes = resolver.resolve_all(&domains).await;

        // eight sequential 50ms timeouts would take at least 400ms
        assert!(start.elapsed() < Duration::from_millis(400));
        assert!(outcomes.iter().all(|o| *o == AvailabilityOutcome::Undetermined));
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 8);
    }
}
