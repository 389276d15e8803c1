//! Error type definitions.
//!
//! This module defines the initialization errors, the fetch-level transport error
//! taxonomy, and the user-facing error kinds reported on a resolution result.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use serde::Serialize;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Transport-level failure classes, derived from the networking stack's own errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportErrorKind {
    /// The stack gave up waiting (connect or read timeout below our own deadline).
    TimedOut,
    /// The hostname could not be resolved by the system resolver.
    NameNotResolved,
    /// The peer actively refused the TCP connection.
    ConnectionRefused,
    /// Anything else (TLS failures, resets, protocol errors).
    Other,
}

/// Failure of a single pinned fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The hard per-hop deadline expired before response headers arrived.
    #[error("Timeout after {timeout_ms}ms")]
    Timeout {
        /// The deadline that expired
        timeout_ms: u64,
    },

    /// The connection or exchange failed.
    #[error("{message}")]
    Transport {
        /// Classified failure
        kind: TransportErrorKind,
        /// Full error chain, outermost first
        message: String,
    },

    /// The URL handed to the fetcher could not be used for a request.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Whether this failure is a timeout, either ours or the stack's.
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            FetchError::Timeout { .. }
                | FetchError::Transport {
                    kind: TransportErrorKind::TimedOut,
                    ..
                }
        )
    }

    /// The transport classification, if this is a transport failure.
    pub fn transport_kind(&self) -> Option<TransportErrorKind> {
        match self {
            FetchError::Transport { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Errors that abort the redirect orchestration before a result is assembled.
///
/// These never leave `resolve_url`; they are converted into an error result at
/// its outer boundary.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The current URL of the chain does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The URL parses but has no host to resolve or connect to.
    #[error("Invalid URL: {0} has no host")]
    MissingHost(String),
}

/// User-facing error categories attached to a resolution result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// A hop exceeded its timeout.
    Timeout,
    /// The target hostname does not exist.
    DomainNotFound,
    /// The target refused the connection.
    ConnectionRefused,
    /// Any other transport failure, message passed through.
    Transport,
    /// The redirect bound was reached.
    MaxRedirectsExceeded,
    /// The chain contained a URL that could not be parsed.
    InvalidUrl,
}

/// Informational events counted across a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// The URL redirected at least once.
    Redirected,
    /// No final IP could be resolved over DoH.
    NoFinalIp,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorKind {
    /// Label used in batch summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Timeout => "Timeout",
            ErrorKind::DomainNotFound => "Domain not found",
            ErrorKind::ConnectionRefused => "Connection refused",
            ErrorKind::Transport => "Transport error",
            ErrorKind::MaxRedirectsExceeded => "Max redirects exceeded",
            ErrorKind::InvalidUrl => "Invalid URL",
        }
    }
}

impl InfoType {
    /// Label used in batch summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::Redirected => "Redirected",
            InfoType::NoFinalIp => "No final IP",
        }
    }
}
