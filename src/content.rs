//! Content aggregation for suggestion generation
//!
//! Collects the text the model brainstorms from: inline description words,
//! files, or standard input. Without any source a shuffled set of sample
//! headlines stands in for a news feed.

use crate::error::{DomainMuseError, Result};
use crate::types::FetchDepth;
use rand::seq::SliceRandom;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Headlines used when the user supplies no content
pub const SAMPLE_HEADLINES: &[&str] = &[
    "Tech Giant Unveils Quantum Leap in AI Development; Market Reacts with Enthusiasm.",
    "Global Leaders Convene for Summit on Sustainable Energy Solutions, Announce Green New Deal.",
    "Breakthrough in Medical Science: Researchers Discover Potential Cure for Age-Old Disease.",
    "Space Exploration Firm Successfully Launches Manned Mission to Mars.",
    "Fashion World Buzzes as Iconic Brand Releases New Eco-Friendly Clothing Line.",
    "Cryptocurrency Market Sees Unprecedented Volatility Following Regulatory News.",
    "Indie Game Studio's Debut Title Becomes Overnight Sensation, Topping Sales Charts.",
    "Culinary World Astonished by New Fusion Cuisine Trends Sweeping Top Restaurants.",
];

/// One place content can come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentSource {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl ContentSource {
    /// `-` means standard input, anything else is a path
    pub fn from_path_arg(arg: &str) -> Self {
        if arg == "-" {
            ContentSource::Stdin
        } else {
            ContentSource::File(PathBuf::from(arg))
        }
    }
}

/// Builds the aggregate text handed to the generator
#[derive(Debug, Clone, Default)]
pub struct ContentAggregator {
    sources: Vec<ContentSource>,
    depth: FetchDepth,
}

impl ContentAggregator {
    pub fn new(depth: FetchDepth) -> Self {
        Self {
            sources: Vec::new(),
            depth,
        }
    }

    pub fn add_source(&mut self, source: ContentSource) -> &mut Self {
        self.sources.push(source);
        self
    }

    pub fn has_sources(&self) -> bool {
        !self.sources.is_empty()
    }

    /// Read every source and join them, capped by the fetch depth.
    pub fn aggregate(&self) -> Result<String> {
        let mut parts = Vec::with_capacity(self.sources.len());

        if self.sources.is_empty() {
            let mut headlines = SAMPLE_HEADLINES.to_vec();
            headlines.shuffle(&mut rand::thread_rng());
            tracing::info!(headlines = headlines.len(), "No content given, using sample headlines");
            parts.push(headlines.join("\n"));
        }

        for source in &self.sources {
            let text = match source {
                ContentSource::Text(text) => text.clone(),
                ContentSource::File(path) => read_file(path)?,
                ContentSource::Stdin => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .map_err(|e| DomainMuseError::io(e.to_string(), Some("<stdin>".to_string())))?;
                    buf
                }
            };
            let text = text.trim();
            if !text.is_empty() {
                parts.push(text.to_string());
            }
        }

        let joined = parts.join("\n\n");
        if joined.trim().is_empty() {
            return Err(DomainMuseError::validation("No content to generate domain names from"));
        }

        let content = truncate_chars(&joined, self.depth.char_budget());
        tracing::debug!(
            sources = self.sources.len(),
            depth = ?self.depth,
            chars = content.chars().count(),
            "Content aggregated"
        );
        Ok(content)
    }
}

fn read_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| DomainMuseError::io(e.to_string(), Some(path.display().to_string())))
}

/// Keep at most `max` characters, cutting on a char boundary
fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
