//! Configuration constants.
//!
//! This module defines the bounds, defaults and timeouts used by the resolution
//! pipeline and by the CLI caller.

use std::time::Duration;

// Name resolution
/// Deepest CNAME hop that is still queried.
/// A chain is followed through depths 0..=10; a hostname reached at depth 11 is
/// reported as unresolvable without issuing another query.
pub const MAX_CNAME_DEPTH: usize = 10;

/// Per-query timeout for DNS-over-HTTPS lookups in seconds.
/// A provider that does not answer within this window counts as "no answer".
pub const DOH_TIMEOUT_SECS: u64 = 5;

/// Media type requested from DoH providers (JSON API, not RFC 8484 wire format).
pub const DOH_ACCEPT: &str = "application/dns-json";

// Redirect handling
/// Default number of redirect hops to follow before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 10;
/// Smallest redirect bound the CLI accepts.
pub const MIN_MAX_REDIRECTS: usize = 1;
/// Largest redirect bound the CLI accepts.
pub const MAX_MAX_REDIRECTS: usize = 50;

// Per-hop HTTP timeout
/// Default per-hop fetch timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 3000;
/// Smallest per-hop timeout the CLI accepts, in milliseconds.
pub const MIN_TIMEOUT_MS: u64 = 250;
/// Largest per-hop timeout the CLI accepts, in milliseconds.
pub const MAX_TIMEOUT_MS: u64 = 60_000;
/// Multiplier applied to the timeout when a timed-out resolution is retried.
pub const RETRY_TIMEOUT_FACTOR: u64 = 3;

/// Idle keep-alive connections are dropped after this long.
pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// Pinned clients kept per fetcher; the oldest is dropped beyond this.
pub const MAX_PINNED_CLIENTS: usize = 32;

// Caller-side input gate
/// Longest input the CLI treats as a plausible URL.
pub const MAX_URL_INPUT_LENGTH: usize = 2000;

/// Default number of input URLs resolved at the same time by the CLI.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// User-Agent sent on every target request. Identifies this tool rather than
/// impersonating a browser.
pub const DEFAULT_USER_AGENT: &str = concat!("url_resolver/", env!("CARGO_PKG_VERSION"));

/// Environment variable consulted for the default DoH provider.
pub const DNS_PROVIDER_ENV: &str = "URL_RESOLVER_DNS_PROVIDER";
