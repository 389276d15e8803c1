//! HTTP fetches pinned to a resolved IP address.
//!
//! The connection goes to the pinned address; the URL host, the `Host` header and the
//! TLS server name stay the original hostname, so virtual hosting and certificate
//! validation behave as if the system resolver had returned that address.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::net::IpAddr;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{debug, trace};
use reqwest::header::HOST;
use reqwest::Certificate;
use url::Url;

use super::outcome::FetchOutcome;
use crate::config::{RequestHeaders, MAX_PINNED_CLIENTS};
use crate::error_handling::{fetch_error_from_reqwest, FetchError, InitializationError, TransportErrorKind};
use crate::initialization::init_fetch_client;

/// A single GET of one URL, returning status and headers only.
pub trait HttpTransport: Send + Sync {
    /// Fetches `url`, connecting to `pinned_ip` when given and to the URL's own host
    /// otherwise, sending `host_header` as `Host`. Fails with [`FetchError::Timeout`]
    /// when response headers have not arrived within `timeout`.
    fn fetch(
        &self,
        url: &Url,
        pinned_ip: Option<IpAddr>,
        host_header: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<FetchOutcome, FetchError>> + Send;
}

/// reqwest-backed [`HttpTransport`] with keep-alive pools per connection target.
///
/// Unpinned requests share one client. Each `(hostname, ip)` pin gets its own client,
/// created on first use, so repeated hops to the same pinned host reuse idle
/// connections. At most `MAX_PINNED_CLIENTS` pinned clients are kept; the oldest is
/// dropped first.
pub struct PinnedFetcher {
    user_agent: String,
    root_certificates: Vec<Certificate>,
    direct: reqwest::Client,
    pinned: Mutex<PinnedClients>,
}

impl PinnedFetcher {
    /// Creates a fetcher sending `user_agent` on every request.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the shared client cannot be built.
    pub fn new(user_agent: impl Into<String>) -> Result<Self, InitializationError> {
        Self::with_root_certificates(user_agent, Vec::new())
    }

    /// Like [`PinnedFetcher::new`], additionally trusting `root_certificates` for
    /// HTTPS targets (private CAs, self-signed test servers).
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the shared client cannot be built.
    pub fn with_root_certificates(
        user_agent: impl Into<String>,
        root_certificates: Vec<Certificate>,
    ) -> Result<Self, InitializationError> {
        let user_agent = user_agent.into();
        let direct = init_fetch_client(&user_agent, None, &root_certificates)?;
        Ok(Self {
            user_agent,
            root_certificates,
            direct,
            pinned: Mutex::new(PinnedClients::new(MAX_PINNED_CLIENTS)),
        })
    }

    fn client_for(&self, host: &str, pinned_ip: Option<IpAddr>) -> Result<reqwest::Client, FetchError> {
        let Some(ip) = pinned_ip else {
            return Ok(self.direct.clone());
        };

        let mut pinned = self.pinned.lock().unwrap_or_else(PoisonError::into_inner);
        let key = (host.to_string(), ip);
        if let Some(client) = pinned.get(&key) {
            return Ok(client);
        }

        let client = init_fetch_client(&self.user_agent, Some((host, ip)), &self.root_certificates)
            .map_err(|e| FetchError::Transport {
                kind: TransportErrorKind::Other,
                message: format!("failed to build client pinned to {ip}: {e}"),
            })?;
        pinned.insert(key, client.clone());
        Ok(client)
    }

    /// Number of pinned clients currently cached.
    pub fn pinned_client_count(&self) -> usize {
        self.pinned
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

type PinKey = (String, IpAddr);

/// Pinned clients in insertion order, bounded by `capacity`.
struct PinnedClients {
    capacity: usize,
    clients: HashMap<PinKey, reqwest::Client>,
    order: VecDeque<PinKey>,
}

impl PinnedClients {
    fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            clients: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    fn get(&self, key: &PinKey) -> Option<reqwest::Client> {
        self.clients.get(key).cloned()
    }

    fn insert(&mut self, key: PinKey, client: reqwest::Client) {
        if self.clients.insert(key.clone(), client).is_none() {
            self.order.push_back(key);
        }
        while self.order.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.clients.remove(&oldest);
            debug!("[Fetch] Dropped pinned client for {} -> {}", oldest.0, oldest.1);
        }
    }

    fn len(&self) -> usize {
        self.clients.len()
    }
}

impl HttpTransport for PinnedFetcher {
    async fn fetch(
        &self,
        url: &Url,
        pinned_ip: Option<IpAddr>,
        host_header: &str,
        timeout: Duration,
    ) -> Result<FetchOutcome, FetchError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "unsupported scheme in {url}"
            )));
        }
        let host = url
            .host_str()
            .ok_or_else(|| FetchError::InvalidUrl(format!("{url} has no host")))?;

        // An IP-literal URL already names its connection target
        let pinned_ip = pinned_ip.filter(|_| url.domain().is_some());
        let client = self.client_for(host, pinned_ip)?;

        let target = pinned_ip.map_or_else(|| host.to_string(), |ip| ip.to_string());
        debug!("[Fetch] GET {url} via {target} (Host: {host_header})");
        trace!("[Fetch] Request headers: {:?}", RequestHeaders::as_vec());

        let request = RequestHeaders::apply_to_request_builder(client.get(url.clone()))
            .header(HOST, host_header);

        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let response = match tokio::time::timeout(timeout, request.send()).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => return Err(fetch_error_from_reqwest(&e)),
            Err(_) => return Err(FetchError::Timeout { timeout_ms }),
        };

        let outcome = FetchOutcome::from_response(&response);
        debug!(
            "[Fetch] Response: {} {}",
            outcome.status_code, outcome.status_text
        );
        drain_body(response, timeout);
        Ok(outcome)
    }
}

/// Reads and discards the body in the background so the connection returns to its pool.
fn drain_body(mut response: reqwest::Response, timeout: Duration) {
    tokio::spawn(async move {
        let drained = tokio::time::timeout(timeout, async {
            while let Ok(Some(_)) = response.chunk().await {}
        })
        .await;
        if drained.is_err() {
            debug!("[Fetch] Body drain for {} abandoned", response.url());
        }
    });
}
