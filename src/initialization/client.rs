//! HTTP client initialization.
//!
//! This module builds the two kinds of reqwest clients the resolver needs: one for
//! DoH queries and one per connection target for page fetches.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::{Certificate, ClientBuilder};

use crate::config::{DOH_TIMEOUT_SECS, POOL_IDLE_TIMEOUT};

/// Initializes the HTTP client used for DNS-over-HTTPS queries.
///
/// Creates a `reqwest::Client` with:
/// - A per-request timeout of `DOH_TIMEOUT_SECS`
/// - Redirect following disabled (a DoH endpoint that redirects is broken)
/// - The configured User-Agent
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_doh_client(user_agent: &str) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(Duration::from_secs(DOH_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(user_agent)
        .build()
}

/// Initializes an HTTP client for fetching redirect hops.
///
/// Creates a `reqwest::Client` with redirects disabled so the chain can be tracked
/// hop by hop, HTTP/1.1 only, and keep-alive pooling. No client-level timeout is
/// set; the fetcher enforces its own per-hop deadline.
///
/// With `pin = Some((host, ip))`, connections for `host` go to `ip` while the URL,
/// `Host` header and TLS server name keep using `host`. Port 0 tells reqwest to use
/// the port from the URL.
///
/// `root_certificates` are trusted in addition to the built-in web PKI roots.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_fetch_client(
    user_agent: &str,
    pin: Option<(&str, IpAddr)>,
    root_certificates: &[Certificate],
) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .user_agent(user_agent)
        .http1_only()
        .pool_idle_timeout(POOL_IDLE_TIMEOUT);

    if let Some((host, ip)) = pin {
        builder = builder.resolve(host, SocketAddr::new(ip, 0));
    }
    for certificate in root_certificates {
        builder = builder.add_root_certificate(certificate.clone());
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_doh_client() {
        assert!(init_doh_client("url_resolver/test").is_ok());
    }

    #[test]
    fn test_init_fetch_client_with_and_without_pin() {
        assert!(init_fetch_client("url_resolver/test", None, &[]).is_ok());
        let ip: IpAddr = "192.0.2.1".parse().unwrap();
        assert!(init_fetch_client("url_resolver/test", Some(("example.com", ip)), &[]).is_ok());
        let ip6: IpAddr = "2001:db8::1".parse().unwrap();
        assert!(init_fetch_client("url_resolver/test", Some(("example.com", ip6)), &[]).is_ok());
    }
}
