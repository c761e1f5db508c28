//! Domain name validation utilities

use crate::error::{DomainMuseError, Result};
use regex::Regex;

/// Validates and normalizes generated names against a target TLD
pub struct DomainValidator {
    tld: String,
}

impl DomainValidator {
    /// Create a validator for names under `tld` (with or without leading dot)
    pub fn new(tld: &str) -> Self {
        Self {
            tld: tld.trim().trim_start_matches('.').to_lowercase(),
        }
    }

    /// Turn raw model output into a fully-qualified name under the TLD.
    ///
    /// Bare labels get the suffix appended; URLs and `www.` prefixes are
    /// stripped; names under another TLD are rejected.
    pub fn normalize(&self, raw: &str) -> Result<String> {
        let mut domain: String = raw
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();

        for prefix in ["https://", "http://", "www."] {
            if let Some(rest) = domain.strip_prefix(prefix) {
                domain = rest.to_string();
            }
        }
        let domain = domain.trim_end_matches('/').trim_end_matches('.');

        let domain = if domain.contains('.') {
            domain.to_string()
        } else {
            format!("{}.{}", domain, self.tld)
        };

        self.validate(&domain)?;
        Ok(domain)
    }

    /// Validate a fully-qualified domain under the TLD
    pub fn validate(&self, domain: &str) -> Result<()> {
        self.validate_format(domain)?;
        self.validate_length(domain)?;
        self.validate_characters(domain)?;

        let label = domain
            .strip_suffix(&format!(".{}", self.tld))
            .ok_or_else(|| DomainMuseError::validation(format!("'{}' does not use the .{} TLD", domain, self.tld)))?;

        self.validate_label(label)
    }

    fn validate_format(&self, domain: &str) -> Result<()> {
        if domain.is_empty() {
            return Err(DomainMuseError::validation("Domain name cannot be empty"));
        }

        if domain.starts_with('-') || domain.starts_with('.') {
            return Err(DomainMuseError::validation("Domain cannot start with a hyphen or dot"));
        }

        if domain.contains("..") {
            return Err(DomainMuseError::validation("Domain cannot contain consecutive dots"));
        }

        Ok(())
    }

    fn validate_length(&self, domain: &str) -> Result<()> {
        if domain.len() > 253 {
            return Err(DomainMuseError::validation("Domain name too long (max 253 characters)"));
        }

        Ok(())
    }

    fn validate_characters(&self, domain: &str) -> Result<()> {
        let valid_chars = Regex::new(r"^[a-z0-9.-]+$")
            .map_err(|e| DomainMuseError::internal(e.to_string()))?;

        if !valid_chars.is_match(domain) {
            return Err(DomainMuseError::validation(format!("'{}' contains invalid characters", domain)));
        }

        Ok(())
    }

    /// The registrable label must be a single LDH label
    fn validate_label(&self, label: &str) -> Result<()> {
        if label.is_empty() {
            return Err(DomainMuseError::validation("Domain name part cannot be empty"));
        }

        if label.contains('.') {
            return Err(DomainMuseError::validation(format!("'{}' is a subdomain, not a registrable name", label)));
        }

        if label.len() > 63 {
            return Err(DomainMuseError::validation("Domain label too long (max 63 characters)"));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(DomainMuseError::validation("Domain label cannot start or end with hyphen"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_validation() {
        let validator = DomainValidator::new("com");

        assert!(validator.validate("example.com").is_ok());
        assert!(validator.validate("test-domain.com").is_ok());

        assert!(validator.validate("").is_err());
        assert!(validator.validate("example.org").is_err());
        assert!(validator.validate("sub.example.com").is_err());
        assert!(validator.validate("-invalid.com").is_err());
        assert!(validator.validate("invalid-.com").is_err());
        assert!(validator.validate("ex_ample.com").is_err());
    }

    #[test]
    fn test_bare_name_gets_tld() {
        let validator = DomainValidator::new(".io");
        assert_eq!(validator.normalize("QuantumLeap").unwrap(), "quantumleap.io");
        assert_eq!(validator.normalize(" quantum leap ").unwrap(), "quantumleap.io");
    }

    #[test]
    fn test_url_noise_is_stripped() {
        let validator = DomainValidator::new("com");
        assert_eq!(validator.normalize("https://www.MarsMission.com/").unwrap(), "marsmission.com");
        assert_eq!(validator.normalize("greennewdeal.com.").unwrap(), "greennewdeal.com");
    }

    #[test]
    fn test_other_tld_is_rejected() {
        let validator = DomainValidator::new("com");
        assert!(validator.normalize("fusionfeast.net").is_err());
    }

    #[test]
    fn test_multi_label_tld() {
        let validator = DomainValidator::new("co.uk");
        assert_eq!(validator.normalize("teabrand").unwrap(), "teabrand.co.uk");
        assert!(validator.validate("teabrand.co.uk").is_ok());
    }
}
