//! Caller-side helpers used by the CLI.
//!
//! This module provides the input gate, the per-input runner with timeout retry,
//! report rendering, and the end-of-run summary.

mod report;
mod runner;
mod statistics;
mod url;

// Re-export public API
pub use report::{render, render_plain};
pub use runner::resolve_input;
pub use statistics::{format_summary, print_batch_summary};
pub use url::looks_like_url;
