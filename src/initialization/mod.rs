//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - The logger
//! - HTTP clients for DoH queries and for redirect-hop fetches

mod client;
mod logger;

// Re-export public API
pub use client::{init_doh_client, init_fetch_client};
pub use logger::init_logger_with;
