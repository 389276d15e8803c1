//! Single-hop HTTP fetching.
//!
//! This module provides the [`HttpTransport`] seam used by the redirect resolver and
//! its reqwest implementation, [`PinnedFetcher`], which connects to an externally
//! resolved IP address while presenting the original hostname.

mod outcome;
mod pinned;

// Re-export public API
pub use outcome::{FetchOutcome, HeaderField};
pub use pinned::{HttpTransport, PinnedFetcher};
