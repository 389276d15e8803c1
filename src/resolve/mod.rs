//! Redirect chain resolution.
//!
//! Follows a URL hop by hop: each hop's hostname is resolved over DoH, the request
//! is pinned to that address, and 3xx responses are followed manually through
//! their `Location` header until a non-redirect response, a failure, or the
//! redirect limit.

mod location;
mod result;

use std::net::IpAddr;
use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

use crate::config::Config;
use crate::dns::{resolve_via_doh, DnsProvider, DohClient, DohTransport};
use crate::error_handling::{
    classify_fetch_error, max_redirects_message, ErrorKind, FetchError, InitializationError,
    ResolveError,
};
use crate::fetch::{HttpTransport, PinnedFetcher};
use crate::initialization::init_doh_client;

pub use location::{redirect_target, validate_url};
pub use result::ResolveResult;

use result::Chain;

/// How the hop loop stopped.
enum ChainEnd {
    /// Non-redirect response, redirect without `Location`, or unresolvable `Location`
    Settled,
    /// Redirect limit reached
    Exhausted,
    /// The fetch of the current URL failed
    FetchFailed(FetchError),
}

/// Follows redirect chains with DoH resolution and pinned fetches.
///
/// Holds no per-call state; one resolver can serve concurrent `resolve_url` calls.
pub struct UrlResolver<D = DohClient, H = PinnedFetcher> {
    doh: D,
    http: H,
    default_provider: DnsProvider,
}

impl UrlResolver<DohClient, PinnedFetcher> {
    /// Builds the production resolver from CLI configuration.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if an HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, InitializationError> {
        let doh = DohClient::new(init_doh_client(&config.user_agent)?);
        let http = PinnedFetcher::new(config.user_agent.clone())?;
        Ok(Self::new(doh, http, config.dns_provider))
    }
}

impl<D: DohTransport, H: HttpTransport> UrlResolver<D, H> {
    /// Creates a resolver over the given transports.
    pub fn new(doh: D, http: H, default_provider: DnsProvider) -> Self {
        Self {
            doh,
            http,
            default_provider,
        }
    }

    /// Provider used when a call does not name one.
    pub fn default_provider(&self) -> DnsProvider {
        self.default_provider
    }

    #[cfg(test)]
    pub(crate) fn http(&self) -> &H {
        &self.http
    }

    /// Resolves `raw_url` to its final destination.
    ///
    /// `raw_url` is normalized with [`validate_url`] first. At most `max_redirects`
    /// fetches are made, each bounded by `timeout`. `provider` overrides the
    /// resolver's default for this call.
    ///
    /// Never fails: every failure is reported through the `error` and `error_kind`
    /// fields of the returned record.
    pub async fn resolve_url(
        &self,
        raw_url: &str,
        max_redirects: usize,
        timeout: Duration,
        provider: Option<DnsProvider>,
    ) -> ResolveResult {
        let provider = provider.unwrap_or(self.default_provider);
        let mut chain = Chain::new(validate_url(raw_url));
        debug!("[Resolve] Starting {} via {provider}", chain.original_url());

        match self
            .follow(&mut chain, max_redirects, timeout, provider)
            .await
        {
            Ok(ChainEnd::Settled) => {
                let final_ip = self.final_address(&chain.current_url, provider).await;
                info!(
                    "[Resolve] {} -> {} ({} redirects)",
                    chain.original_url(),
                    chain.current_url,
                    chain.redirect_count
                );
                chain.finish(final_ip, Some(provider), None)
            }
            Ok(ChainEnd::Exhausted) => {
                warn!(
                    "[Resolve] Redirect limit {max_redirects} reached for {}",
                    chain.original_url()
                );
                chain.finish(
                    None,
                    None,
                    Some((
                        ErrorKind::MaxRedirectsExceeded,
                        max_redirects_message(max_redirects),
                    )),
                )
            }
            Ok(ChainEnd::FetchFailed(error)) => {
                let classified = classify_fetch_error(&error);
                let final_ip = self.final_address(&chain.current_url, provider).await;
                chain.finish(final_ip, Some(provider), Some(classified))
            }
            Err(error) => {
                warn!("[Resolve] {}: {error}", chain.current_url);
                chain.finish(None, None, Some((ErrorKind::InvalidUrl, error.to_string())))
            }
        }
    }

    async fn follow(
        &self,
        chain: &mut Chain,
        max_redirects: usize,
        timeout: Duration,
        provider: DnsProvider,
    ) -> Result<ChainEnd, ResolveError> {
        while chain.redirect_count < max_redirects {
            let url = Url::parse(&chain.current_url)?;
            let host = url
                .host_str()
                .ok_or_else(|| ResolveError::MissingHost(chain.current_url.clone()))?;

            let pinned_ip = match resolve_via_doh(&self.doh, host, provider).await {
                Some(address) => {
                    debug!("[Fetch] Using IP {address} for {host}");
                    parse_address(&address)
                }
                None => {
                    debug!("[Fetch] No DoH result, using original hostname: {host}");
                    None
                }
            };

            let response = match self.http.fetch(&url, pinned_ip, host, timeout).await {
                Ok(response) => response,
                Err(error) => {
                    warn!("[Fetch] {}: {error}", chain.current_url);
                    return Ok(ChainEnd::FetchFailed(error));
                }
            };
            debug!(
                "[Fetch] {} -> {} {}",
                chain.current_url, response.status_code, response.status_text
            );

            if !response.is_redirect() {
                return Ok(ChainEnd::Settled);
            }

            let Some(location) = response.location() else {
                debug!(
                    "[Resolve] Redirect status {} for {} but no Location header",
                    response.status_code, chain.current_url
                );
                return Ok(ChainEnd::Settled);
            };

            match redirect_target(&url, location) {
                Some(next_url) => {
                    debug!("[Resolve] Redirecting to {next_url}");
                    chain.advance(next_url);
                }
                None => {
                    warn!("[Resolve] Could not resolve Location {location:?} against {url}");
                    return Ok(ChainEnd::Settled);
                }
            }
        }

        Ok(ChainEnd::Exhausted)
    }

    /// DoH address of the URL's host, if the URL parses and the host resolves.
    async fn final_address(&self, url: &str, provider: DnsProvider) -> Option<String> {
        let url = Url::parse(url).ok()?;
        let host = url.host_str()?;
        resolve_via_doh(&self.doh, host, provider).await
    }
}

fn parse_address(address: &str) -> Option<IpAddr> {
    match address.parse() {
        Ok(ip) => Some(ip),
        Err(_) => {
            warn!("[Fetch] DoH returned a non-address record {address:?}, not pinning");
            None
        }
    }
}
