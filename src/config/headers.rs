//! Request header set sent to target servers.
//!
//! Every hop carries the same browser-like headers so that servers answer the
//! resolver the way they would answer a person clicking the link.

use reqwest::header::{HeaderName, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};

/// `Accept` header value
pub const HEADER_ACCEPT_VALUE: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
/// `Accept-Language` header value
pub const HEADER_ACCEPT_LANGUAGE_VALUE: &str = "en-US,en;q=0.9";
/// `DNT` header value
pub const HEADER_DNT_VALUE: &str = "1";
/// `Cache-Control` header value
pub const HEADER_CACHE_CONTROL_VALUE: &str = "no-cache";

/// Do Not Track header name (not among reqwest's predefined constants).
pub const HEADER_DNT: HeaderName = HeaderName::from_static("dnt");

/// Fixed browser-like request headers.
///
/// `Host` and `User-Agent` are not part of this set: `Host` depends on the hop and the
/// User-Agent is configurable, so the fetcher adds both itself.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Returns headers as (name, value) tuples, mostly useful for logging.
    pub(crate) fn as_vec() -> Vec<(String, String)> {
        vec![
            ("accept".to_string(), HEADER_ACCEPT_VALUE.to_string()),
            (
                "accept-language".to_string(),
                HEADER_ACCEPT_LANGUAGE_VALUE.to_string(),
            ),
            ("dnt".to_string(), HEADER_DNT_VALUE.to_string()),
            (
                "cache-control".to_string(),
                HEADER_CACHE_CONTROL_VALUE.to_string(),
            ),
        ]
    }

    /// Applies the standard request headers to a `reqwest::RequestBuilder`.
    pub(crate) fn apply_to_request_builder(
        builder: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        builder
            .header(ACCEPT, HEADER_ACCEPT_VALUE)
            .header(ACCEPT_LANGUAGE, HEADER_ACCEPT_LANGUAGE_VALUE)
            .header(HEADER_DNT, HEADER_DNT_VALUE)
            .header(CACHE_CONTROL, HEADER_CACHE_CONTROL_VALUE)
    }
}
