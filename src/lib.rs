//! Domain Muse - AI-suggested domain names with availability checks
//!
//! Aggregates text, asks an LLM for domain name ideas, and classifies each
//! idea as available, taken or undetermined from a WHOIS lookup.

pub mod config;
pub mod content;
pub mod domain;
pub mod error;
pub mod llm;
pub mod registry;
pub mod types;

// Re-export commonly used types
pub use error::{DomainMuseError, Result};
pub use types::{
    AvailabilityOutcome, CheckedSuggestion, DomainSuggestion, FetchDepth, GenerationRequest,
    LlmConfig, ProviderKind, ResolverConfig,
};

// Re-export main functionality
pub use config::ProviderSettings;
pub use content::{ContentAggregator, ContentSource};
pub use domain::{AvailabilityResolver, RegistryLookup, WhoisLookup};
pub use llm::DomainGenerator;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
