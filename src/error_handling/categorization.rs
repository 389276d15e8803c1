//! Error categorization.
//!
//! Maps networking failures onto [`TransportErrorKind`] and fetch failures onto the
//! user-facing [`ErrorKind`] and message stored on a resolution result.

use std::error::Error as StdError;
use std::io;

use super::types::{ErrorKind, FetchError, TransportErrorKind};

/// Fixed message for hostnames the system resolver could not find.
pub const DOMAIN_NOT_FOUND_MESSAGE: &str = "Domain not found";
/// Fixed message for refused connections.
pub const CONNECTION_REFUSED_MESSAGE: &str = "Connection refused";

/// Fragments the resolver layers below reqwest use when a name lookup fails.
/// hyper-util labels the connect phase "dns error"; std's getaddrinfo wrapper
/// reports "failed to lookup address information".
const NAME_RESOLUTION_MARKERS: &[&str] = &[
    "dns error",
    "failed to lookup address",
    "name or service not known",
    "nodename nor servname",
    "no such host",
];

/// Renders an error and all of its sources, outermost first, separated by `": "`.
pub fn error_chain_message(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // hyper and reqwest frequently repeat the inner message verbatim
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// Categorizes a `reqwest::Error` into a [`TransportErrorKind`].
///
/// reqwest's own timeout flag wins; otherwise the source chain decides, see
/// [`categorize_error_chain`].
pub fn categorize_reqwest_error(error: &reqwest::Error) -> TransportErrorKind {
    if error.is_timeout() {
        return TransportErrorKind::TimedOut;
    }
    categorize_error_chain(error)
}

/// Categorizes an error by walking it and all of its sources.
///
/// The whole chain is inspected before deciding. Precedence is timed out, then name
/// not resolved, then connection refused, then other.
pub fn categorize_error_chain(error: &(dyn StdError + 'static)) -> TransportErrorKind {
    let mut timed_out = false;
    let mut name_not_resolved = false;
    let mut refused = false;

    let mut source = Some(error);
    while let Some(cause) = source {
        if let Some(io_error) = cause.downcast_ref::<io::Error>() {
            match io_error.kind() {
                io::ErrorKind::TimedOut => timed_out = true,
                io::ErrorKind::ConnectionRefused => refused = true,
                _ => {}
            }
        }
        let text = cause.to_string().to_lowercase();
        if NAME_RESOLUTION_MARKERS
            .iter()
            .any(|marker| text.contains(marker))
        {
            name_not_resolved = true;
        }
        source = cause.source();
    }

    if timed_out {
        TransportErrorKind::TimedOut
    } else if name_not_resolved {
        TransportErrorKind::NameNotResolved
    } else if refused {
        TransportErrorKind::ConnectionRefused
    } else {
        TransportErrorKind::Other
    }
}

/// Converts a `reqwest::Error` raised while fetching into a [`FetchError`].
pub fn fetch_error_from_reqwest(error: &reqwest::Error) -> FetchError {
    FetchError::Transport {
        kind: categorize_reqwest_error(error),
        message: error_chain_message(error),
    }
}

/// Classifies a fetch failure into the error kind and message reported to the caller.
///
/// Precedence is fixed: timeout, then domain-not-found, then connection-refused,
/// then the underlying message passed through unchanged.
pub fn classify_fetch_error(error: &FetchError) -> (ErrorKind, String) {
    if error.is_timeout() {
        return (ErrorKind::Timeout, error.to_string());
    }
    match error {
        FetchError::Transport {
            kind: TransportErrorKind::NameNotResolved,
            ..
        } => (ErrorKind::DomainNotFound, DOMAIN_NOT_FOUND_MESSAGE.to_string()),
        FetchError::Transport {
            kind: TransportErrorKind::ConnectionRefused,
            ..
        } => (
            ErrorKind::ConnectionRefused,
            CONNECTION_REFUSED_MESSAGE.to_string(),
        ),
        FetchError::InvalidUrl(_) => (ErrorKind::InvalidUrl, error.to_string()),
        _ => (ErrorKind::Transport, error.to_string()),
    }
}

/// Message for a chain that hit its redirect bound.
pub fn max_redirects_message(max_redirects: usize) -> String {
    format!("Max redirects exceeded ({max_redirects})")
}
