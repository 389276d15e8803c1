//! DNS-over-HTTPS providers.

use clap::ValueEnum;
use serde::Serialize;
use strum_macros::EnumIter;

/// A public DoH service speaking the JSON API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DnsProvider {
    /// Cloudflare (1.1.1.1)
    #[value(name = "cloudflare")]
    Cloudflare,
    /// Google Public DNS (8.8.8.8)
    #[value(name = "google")]
    Google,
    /// Quad9 (9.9.9.9)
    #[value(name = "quad9")]
    Quad9,
    /// Cisco OpenDNS (208.67.222.222)
    #[value(name = "opendns")]
    OpenDns,
}

impl DnsProvider {
    /// The JSON query endpoint for this provider.
    pub fn endpoint(&self) -> &'static str {
        match self {
            DnsProvider::Cloudflare => "https://cloudflare-dns.com/dns-query",
            DnsProvider::Google => "https://dns.google/resolve",
            DnsProvider::Quad9 => "https://dns.quad9.net/dns-query",
            DnsProvider::OpenDns => "https://doh.opendns.com/dns-query",
        }
    }

    /// Stable lowercase identifier, as accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            DnsProvider::Cloudflare => "cloudflare",
            DnsProvider::Google => "google",
            DnsProvider::Quad9 => "quad9",
            DnsProvider::OpenDns => "opendns",
        }
    }

    /// Human-readable name including the well-known anycast address.
    pub fn label(&self) -> &'static str {
        match self {
            DnsProvider::Cloudflare => "Cloudflare (1.1.1.1)",
            DnsProvider::Google => "Google (8.8.8.8)",
            DnsProvider::Quad9 => "Quad9 (9.9.9.9)",
            DnsProvider::OpenDns => "OpenDNS (208.67.222.222)",
        }
    }
}

impl std::fmt::Display for DnsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
