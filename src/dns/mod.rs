//! DNS resolution over DNS-over-HTTPS.
//!
//! This module provides:
//! - The fixed set of public DoH providers
//! - The JSON wire types and a single-query transport (`DohTransport`)
//! - Hostname to address resolution with CNAME following
//!
//! Nothing is cached: each call goes to the provider again.

mod doh;
mod provider;
mod resolution;

// Re-export public API
pub use doh::{
    DohAnswer, DohClient, DohResponse, DohTransport, RecordType, RR_TYPE_A, RR_TYPE_AAAA,
    RR_TYPE_CNAME,
};
pub use provider::DnsProvider;
pub use resolution::{resolve_from_depth, resolve_via_doh};
