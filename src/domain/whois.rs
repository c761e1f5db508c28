//! Raw WHOIS lookups over TCP/43

use crate::domain::RegistryLookup;
use crate::error::{DomainMuseError, Result};
use crate::registry::servers::{
    parse_iana_referral, server_address, tld_of, whois_server, IANA_WHOIS_SERVER,
};
use crate::types::DEFAULT_LOOKUP_TIMEOUT;
use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Pure Rust WHOIS client (no external `whois` binary required).
#[derive(Debug, Clone)]
pub struct WhoisLookup {
    /// Fixed server to query instead of the TLD table
    server_override: Option<String>,
    /// Where referrals for unknown TLDs are asked
    iana_server: String,
    io_timeout: Duration,
}

impl WhoisLookup {
    pub fn new() -> Self {
        Self {
            server_override: None,
            iana_server: IANA_WHOIS_SERVER.to_string(),
            io_timeout: DEFAULT_LOOKUP_TIMEOUT,
        }
    }

    /// Send every query to one server (`host` or `host:port`)
    pub fn with_server(server: impl Into<String>) -> Self {
        Self {
            server_override: Some(server.into()),
            ..Self::new()
        }
    }

    /// Ask a different server for unknown-TLD referrals
    pub fn with_iana_server(mut self, server: impl Into<String>) -> Self {
        self.iana_server = server.into();
        self
    }

    /// Deadline for each connect, write and read step
    pub fn with_io_timeout(mut self, io_timeout: Duration) -> Self {
        self.io_timeout = io_timeout;
        self
    }

    /// Find the WHOIS server responsible for the domain's TLD
    async fn server_for(&self, domain: &str) -> Result<String> {
        if let Some(server) = &self.server_override {
            return Ok(server.clone());
        }

        let tld = tld_of(domain)
            .ok_or_else(|| DomainMuseError::validation(format!("'{}' has no TLD", domain)))?;

        if let Some(server) = whois_server(&tld) {
            return Ok(server.to_string());
        }

        // Unknown TLD: ask IANA for the authoritative server.
        let iana = self.query(&self.iana_server, &tld).await?;
        parse_iana_referral(&iana).ok_or_else(|| DomainMuseError::unsupported_registry(tld))
    }

    async fn query(&self, server: &str, query: &str) -> Result<String> {
        let addr = server_address(server);
        let secs = self.io_timeout.as_secs();

        let mut stream = timeout(self.io_timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| DomainMuseError::timeout("WHOIS connect", secs))?
            .map_err(|e| DomainMuseError::network(format!("WHOIS connect failed: {}", e), None, Some(addr.clone())))?;

        timeout(self.io_timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| DomainMuseError::timeout("WHOIS write", secs))?
            .map_err(|e| DomainMuseError::network(format!("WHOIS write failed: {}", e), None, Some(addr.clone())))?;

        let mut buf = Vec::new();
        timeout(self.io_timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| DomainMuseError::timeout("WHOIS read", secs))?
            .map_err(|e| DomainMuseError::network(format!("WHOIS read failed: {}", e), None, Some(addr)))?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for WhoisLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryLookup for WhoisLookup {
    async fn lookup(&self, domain: &str) -> Result<String> {
        let domain = domain.trim().trim_end_matches('.').to_lowercase();
        // one query per line on the wire
        if domain.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(DomainMuseError::validation(format!(
                "'{}' contains whitespace or control characters",
                domain.escape_debug()
            )));
        }
        let server = self.server_for(&domain).await?;
        tracing::debug!(domain = %domain, server = %server, "Querying WHOIS");
        self.query(&server, &domain).await
    }

    fn method_name(&self) -> &'static str {
        "whois"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncBufReadExt;
    use tokio::net::TcpListener;

    /// Serve one canned WHOIS answer and hand back the query that was sent
    async fn serve_once(response: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let handle = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let mut reader = tokio::io::BufReader::new(socket);
            let mut line = String::new();
            reader.read_line(&mut line).await.unwrap();
            reader.get_mut().write_all(response.as_bytes()).await.unwrap();
            reader.get_mut().shutdown().await.unwrap();
            line
        });
        (addr, handle)
    }

    #[tokio::test]
    async fn test_lookup_returns_raw_text() {
        let (addr, server) = serve_once("Domain Name: GOOGLE.COM\r\nRegistrar: MarkMonitor Inc.\r\n").await;
        let lookup = WhoisLookup::with_server(addr);

        let body = lookup.lookup("Google.com").await.unwrap();
        assert!(body.contains("MarkMonitor"));
        assert_eq!(server.await.unwrap(), "google.com\r\n");
    }

    #[tokio::test]
    async fn test_lookup_empty_body() {
        let (addr, _server) = serve_once("").await;
        let body = WhoisLookup::with_server(addr).lookup("nothing.dev").await.unwrap();
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        // bind then drop to get a port nobody listens on
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let err = WhoisLookup::with_server(addr)
            .with_io_timeout(Duration::from_secs(1))
            .lookup("example.com")
            .await
            .unwrap_err();
        assert!(err.is_lookup_failure());
    }

    #[tokio::test]
    async fn test_domain_without_tld_is_rejected() {
        let err = WhoisLookup::new().lookup("localhost").await.unwrap_err();
        assert!(matches!(err, DomainMuseError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_embedded_line_break_never_reaches_server() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        let lookup = WhoisLookup::with_server(addr);

        for input in ["evil.com\r\n-h other help", "a.com b.com", "tab\tname.com", "nul\0.com"] {
            let err = lookup.lookup(input).await.unwrap_err();
            assert!(matches!(err, DomainMuseError::Validation { .. }));
        }

        let accepted = tokio::time::timeout(Duration::from_millis(100), listener.accept()).await;
        assert!(accepted.is_err(), "server should not be contacted");
    }

    #[tokio::test]
    async fn test_unknown_tld_without_referral_is_unsupported() {
        let (iana, server) = serve_once("% IANA WHOIS server\r\n% This query returned 0 objects.\r\n").await;
        let lookup = WhoisLookup::new().with_iana_server(iana);

        let err = lookup.lookup("startup.zzzz").await.unwrap_err();
        assert!(matches!(err, DomainMuseError::UnsupportedRegistry { ref tld } if tld == "zzzz"));
        assert!(err.is_lookup_failure());
        assert_eq!(server.await.unwrap(), "zzzz\r\n");
    }

    #[tokio::test]
    async fn test_unknown_tld_resolves_undetermined() {
        use crate::domain::AvailabilityResolver;
        use crate::types::{AvailabilityOutcome, ResolverConfig};
        use std::sync::Arc;

        let (iana, _server) = serve_once("% This query returned 0 objects.\r\n").await;
        let resolver = AvailabilityResolver::with_lookup(
            ResolverConfig::default(),
            Arc::new(WhoisLookup::new().with_iana_server(iana)),
        );
        assert_eq!(resolver.resolve("startup.zzzz").await, AvailabilityOutcome::Undetermined);
    }
}
