//! Error handling and batch statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch, orchestration)
//! - Classification of transport failures into user-facing error kinds
//! - Outcome counters for multi-URL runs
//!
//! DNS-side failures never appear here: they collapse to "no address"
//! inside the DNS module and never surface as errors.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    classify_fetch_error, error_chain_message, fetch_error_from_reqwest, max_redirects_message,
};
pub use stats::ProcessingStats;
pub use types::{
    ErrorKind, FetchError, InfoType, InitializationError, ResolveError, TransportErrorKind,
};
