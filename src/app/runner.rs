//! Per-input resolution as the CLI performs it.

use std::time::Duration;

use log::info;

use crate::config::{Config, RETRY_TIMEOUT_FACTOR};
use crate::dns::DohTransport;
use crate::error_handling::ErrorKind;
use crate::fetch::HttpTransport;
use crate::resolve::{ResolveResult, UrlResolver};

use super::url::looks_like_url;

/// Message reported for inputs rejected before resolution.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid URL";

/// Gates, resolves and optionally retries one CLI input.
///
/// Inputs failing [`looks_like_url`] never reach the resolver. When
/// `config.retry_on_timeout` is set, a timed-out resolution is run again from scratch
/// with the timeout multiplied by `RETRY_TIMEOUT_FACTOR`.
pub async fn resolve_input<D: DohTransport, H: HttpTransport>(
    resolver: &UrlResolver<D, H>,
    input: &str,
    config: &Config,
) -> ResolveResult {
    let input = input.trim();
    if !looks_like_url(input) {
        return rejected(input);
    }

    let result = resolver
        .resolve_url(input, config.max_redirects, config.timeout(), None)
        .await;
    if !(config.retry_on_timeout && result.is_timeout()) {
        return result;
    }

    let longer = config.timeout_ms.saturating_mul(RETRY_TIMEOUT_FACTOR);
    info!("Retrying {input} with a {longer}ms timeout");
    resolver
        .resolve_url(input, config.max_redirects, Duration::from_millis(longer), None)
        .await
}

fn rejected(input: &str) -> ResolveResult {
    ResolveResult {
        original_url: input.to_string(),
        final_url: input.to_string(),
        redirect_count: 0,
        trace: vec![input.to_string()],
        final_ip: None,
        provider: None,
        error: Some(INVALID_INPUT_MESSAGE.to_string()),
        error_kind: Some(ErrorKind::InvalidUrl),
    }
}
