//! url_resolver library: final-destination resolution for URLs
//!
//! This library follows a URL's redirect chain hop by hop. Every hostname is resolved
//! through a public DNS-over-HTTPS provider, each request connects to that address while
//! presenting the original hostname, and the result records the full trace, the final
//! URL, and the final host's address.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use url_resolver::{Config, DnsProvider, UrlResolver};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = UrlResolver::from_config(&Config::default())?;
//! let result = resolver
//!     .resolve_url("bit.ly/example", 10, Duration::from_millis(3000), Some(DnsProvider::Google))
//!     .await;
//! println!("{} -> {} via {:?}", result.original_url, result.final_url, result.final_ip);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod config;
mod dns;
mod error_handling;
mod fetch;
pub mod initialization;
mod resolve;

// Re-export public API
pub use app::{
    format_summary, looks_like_url, print_batch_summary, render, render_plain, resolve_input,
};
pub use config::{Config, LogFormat, LogLevel, OutputFormat};
pub use dns::{
    resolve_via_doh, DnsProvider, DohAnswer, DohClient, DohResponse, DohTransport, RecordType,
};
pub use error_handling::{
    ErrorKind, FetchError, InfoType, InitializationError, ProcessingStats, TransportErrorKind,
};
pub use fetch::{FetchOutcome, HeaderField, HttpTransport, PinnedFetcher};
pub use resolve::{validate_url, ResolveResult, UrlResolver};
pub use run::{run_batch, BatchReport};

// Internal run module (resolves every input of one CLI invocation)
mod run {
    use std::time::Instant;

    use anyhow::{Context, Result};
    use futures::stream::{self, StreamExt};
    use log::info;

    use crate::app::resolve_input;
    use crate::config::Config;
    use crate::error_handling::ProcessingStats;
    use crate::resolve::{ResolveResult, UrlResolver};

    /// Results of a batch run.
    pub struct BatchReport {
        /// One result per input, in input order
        pub results: Vec<ResolveResult>,
        /// Outcome counters over `results`
        pub stats: ProcessingStats,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl BatchReport {
        /// Number of results without an error.
        pub fn successful(&self) -> usize {
            self.results.iter().filter(|r| r.is_success()).count()
        }

        /// Number of results carrying an error.
        pub fn failed(&self) -> usize {
            self.results.len() - self.successful()
        }
    }

    /// Resolves every URL in `config.urls`.
    ///
    /// Up to `config.max_concurrency` inputs are in flight at once; results keep the
    /// input order. `config` is expected to be clamped already.
    ///
    /// # Errors
    ///
    /// Fails only if the HTTP clients cannot be initialized. Per-URL failures are
    /// reported inside the results.
    pub async fn run_batch(config: Config) -> Result<BatchReport> {
        let start = Instant::now();
        let resolver =
            UrlResolver::from_config(&config).context("Failed to initialize HTTP clients")?;
        info!(
            "Resolving {} URL(s) via {} (max {} redirects, {}ms per hop)",
            config.urls.len(),
            config.dns_provider.label(),
            config.max_redirects,
            config.timeout_ms
        );

        let stats = ProcessingStats::new();
        let results: Vec<ResolveResult> = stream::iter(config.urls.iter())
            .map(|input| resolve_input(&resolver, input, &config))
            .buffered(config.max_concurrency.max(1))
            .inspect(|result| stats.record(result))
            .collect()
            .await;

        Ok(BatchReport {
            results,
            stats,
            elapsed_seconds: start.elapsed().as_secs_f64(),
        })
    }
}
