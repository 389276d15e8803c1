//! The record returned for every resolution.

use serde::Serialize;

use crate::dns::DnsProvider;
use crate::error_handling::ErrorKind;

/// Outcome of one `resolve_url` call.
///
/// `trace` starts with `original_url`, ends with `final_url`, and holds
/// `redirect_count + 1` entries. `final_ip` and `provider` may be filled even when
/// `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveResult {
    /// Normalized input URL
    pub original_url: String,
    /// Last URL reached
    pub final_url: String,
    /// Redirects followed
    pub redirect_count: usize,
    /// Every URL visited, in order
    pub trace: Vec<String>,
    /// Address the final host resolved to over DoH
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_ip: Option<String>,
    /// Provider used for resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<DnsProvider>,
    /// Human-readable failure message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl ResolveResult {
    /// True when the chain ended without an error, whatever the final status code.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Whether the failure was a hop timeout, the case worth retrying with a longer one.
    pub fn is_timeout(&self) -> bool {
        self.error_kind == Some(ErrorKind::Timeout)
    }
}

/// Accumulates the chain while it is being followed.
#[derive(Debug)]
pub(crate) struct Chain {
    original_url: String,
    pub(crate) current_url: String,
    pub(crate) redirect_count: usize,
    trace: Vec<String>,
}

impl Chain {
    pub(crate) fn new(original_url: String) -> Self {
        Self {
            current_url: original_url.clone(),
            redirect_count: 0,
            trace: vec![original_url.clone()],
            original_url,
        }
    }

    pub(crate) fn original_url(&self) -> &str {
        &self.original_url
    }

    pub(crate) fn advance(&mut self, next_url: String) {
        self.redirect_count += 1;
        self.trace.push(next_url.clone());
        self.current_url = next_url;
    }

    pub(crate) fn finish(
        self,
        final_ip: Option<String>,
        provider: Option<DnsProvider>,
        error: Option<(ErrorKind, String)>,
    ) -> ResolveResult {
        let (error_kind, error) = match error {
            Some((kind, message)) => (Some(kind), Some(message)),
            None => (None, None),
        };
        ResolveResult {
            original_url: self.original_url,
            final_url: self.current_url,
            redirect_count: self.redirect_count,
            trace: self.trace,
            final_ip,
            provider,
            error,
            error_kind,
        }
    }
}
