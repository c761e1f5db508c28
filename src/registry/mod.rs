//! Registry service knowledge shared across modules.
//!
//! Keeps the WHOIS endpoint table in one place so the resolver and the CLI
//! agree on which TLDs are covered without discovery.

pub mod servers;
