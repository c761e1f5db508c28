//! Central WHOIS server table.
//!
//! A small static mapping for high-usage TLDs. Anything else goes through
//! IANA discovery at lookup time.

/// Root WHOIS service used to discover per-TLD servers
pub const IANA_WHOIS_SERVER: &str = "whois.iana.org";

/// Standard WHOIS port
pub const WHOIS_PORT: u16 = 43;

/// Get the WHOIS server for a TLD (lowercase, without leading dot).
pub fn whois_server(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "ai" => Some("whois.nic.ai"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        "app" | "dev" => Some("whois.nic.google"),
        "tech" => Some("whois.nic.tech"),
        "info" => Some("whois.nic.info"),
        "de" => Some("whois.denic.de"),
        "uk" => Some("whois.nic.uk"),
        _ => None,
    }
}

/// Extract the TLD of a fully-qualified domain, lowercased.
pub fn tld_of(domain: &str) -> Option<String> {
    let domain = domain.trim().trim_end_matches('.');
    let (_, tld) = domain.rsplit_once('.')?;
    if tld.is_empty() {
        return None;
    }
    Some(tld.to_lowercase())
}

/// Append the standard port unless the server already names one.
pub fn server_address(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{server}:{WHOIS_PORT}")
    }
}

/// Pull the `whois:` or `refer:` server out of an IANA answer.
pub fn parse_iana_referral(iana: &str) -> Option<String> {
    field_value(iana, "whois:").or_else(|| field_value(iana, "refer:"))
}

fn field_value(text: &str, key: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .find_map(|line| {
            let lower = line.to_lowercase();
            if lower.starts_with(key) {
                line.get(key.len()..).map(|v| v.trim().to_string())
            } else {
                None
            }
        })
        .filter(|s| !s.is_empty())
}
