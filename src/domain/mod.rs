//! Domain availability resolution module

pub mod classifier;
pub mod ranking;
pub mod resolver;
pub mod validator;
pub mod whois;

// Re-export main functionality
pub use classifier::{classify_response, AVAILABLE_MARKERS};
pub use ranking::rank_by_availability;
pub use resolver::AvailabilityResolver;
pub use validator::DomainValidator;
pub use whois::WhoisLookup;

use crate::error::Result;
use async_trait::async_trait;

/// A registry text lookup keyed by domain.
///
/// Implementations return the raw, unstructured response body. They do not
/// need to enforce a deadline themselves; the resolver bounds every call.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Fetch the raw registry response for a fully-qualified domain
    async fn lookup(&self, domain: &str) -> Result<String>;

    /// Get the lookup method name
    fn method_name(&self) -> &'static str;
}
