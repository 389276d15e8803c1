//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    DEFAULT_MAX_CONCURRENCY, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT,
    DNS_PROVIDER_ENV, MAX_MAX_REDIRECTS, MAX_TIMEOUT_MS, MIN_MAX_REDIRECTS, MIN_TIMEOUT_MS,
};
use crate::dns::DnsProvider;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How resolution results are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Plain,
    /// One JSON object per line
    Json,
}

/// Resolver configuration, parsed from the command line.
///
/// The library itself never clamps; callers that accept user input should go
/// through [`Config::clamped`] before handing values to the resolver.
///
/// # Examples
///
/// ```bash
/// url_resolver bit.ly/example
/// url_resolver https://t.co/abc --dns-provider quad9 --max-redirects 20
/// url_resolver a.example b.example --output json --retry-on-timeout
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "url_resolver",
    version,
    about = "Follows a URL to its final destination, resolving every hop over DNS-over-HTTPS."
)]
pub struct Config {
    /// URLs to resolve (scheme optional, https is assumed)
    #[arg(required = true, num_args = 1..)]
    pub urls: Vec<String>,

    /// Maximum redirect hops to follow (clamped to 1-50)
    #[arg(long, default_value_t = DEFAULT_MAX_REDIRECTS)]
    pub max_redirects: usize,

    /// Per-hop HTTP timeout in milliseconds (clamped to 250-60000)
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,

    /// DNS-over-HTTPS provider
    #[arg(
        long,
        value_enum,
        env = DNS_PROVIDER_ENV,
        default_value_t = DnsProvider::Cloudflare
    )]
    pub dns_provider: DnsProvider,

    /// Retry once with a tripled timeout when a hop times out
    #[arg(long)]
    pub retry_on_timeout: bool,

    /// Number of URLs resolved concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Output format: plain|json
    #[arg(long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// HTTP User-Agent header value
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            dns_provider: DnsProvider::Cloudflare,
            retry_on_timeout: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            output: OutputFormat::Plain,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Returns a copy with the numeric options forced into their accepted ranges.
    pub fn clamped(mut self) -> Self {
        self.max_redirects = self.max_redirects.clamp(MIN_MAX_REDIRECTS, MAX_MAX_REDIRECTS);
        self.timeout_ms = self.timeout_ms.clamp(MIN_TIMEOUT_MS, MAX_TIMEOUT_MS);
        self.max_concurrency = self.max_concurrency.max(1);
        self
    }

    /// Per-hop timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.timeout_ms, 3000);
        assert_eq!(config.dns_provider, DnsProvider::Cloudflare);
        assert!(!config.retry_on_timeout);
        assert_eq!(config.output, OutputFormat::Plain);
        assert!(config.user_agent.starts_with("url_resolver/"));
    }

    #[test]
    fn test_clamped_raises_values_below_range() {
        let config = Config {
            max_redirects: 0,
            timeout_ms: 10,
            max_concurrency: 0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.max_redirects, 1);
        assert_eq!(config.timeout_ms, 250);
        assert_eq!(config.max_concurrency, 1);
    }

    #[test]
    fn test_clamped_lowers_values_above_range() {
        let config = Config {
            max_redirects: 500,
            timeout_ms: 600_000,
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.max_redirects, 50);
        assert_eq!(config.timeout_ms, 60_000);
    }

    #[test]
    fn test_clamped_keeps_values_in_range() {
        let config = Config {
            max_redirects: 7,
            timeout_ms: 1500,
            ..Default::default()
        }
        .clamped();
        assert_eq!(config.max_redirects, 7);
        assert_eq!(config.timeout(), Duration::from_millis(1500));
    }

    #[test]
    fn test_parse_cli_arguments() {
        let config = Config::try_parse_from([
            "url_resolver",
            "example.com",
            "https://bit.ly/x",
            "--dns-provider",
            "quad9",
            "--timeout-ms",
            "900",
            "--output",
            "json",
        ])
        .expect("arguments should parse");
        assert_eq!(config.urls, vec!["example.com", "https://bit.ly/x"]);
        assert_eq!(config.dns_provider, DnsProvider::Quad9);
        assert_eq!(config.timeout_ms, 900);
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn test_parse_cli_requires_url() {
        assert!(Config::try_parse_from(["url_resolver"]).is_err());
    }

    #[test]
    fn test_parse_cli_rejects_non_numeric_timeout() {
        let result = Config::try_parse_from(["url_resolver", "example.com", "--timeout-ms", "soon"]);
        assert!(result.is_err());
    }
}
