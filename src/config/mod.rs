//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (bounds, defaults, timeouts)
//! - The fixed request header set sent to target servers
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub(crate) use headers::RequestHeaders;
pub use headers::{
    HEADER_ACCEPT_LANGUAGE_VALUE, HEADER_ACCEPT_VALUE, HEADER_CACHE_CONTROL_VALUE, HEADER_DNT,
    HEADER_DNT_VALUE,
};
pub use types::{Config, LogFormat, LogLevel, OutputFormat};
