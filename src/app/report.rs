//! Rendering of resolution results for the terminal.

use std::fmt::Write as _;

use crate::config::OutputFormat;
use crate::resolve::ResolveResult;

/// Renders `result` in the requested output format.
///
/// # Errors
///
/// Returns an error only if JSON serialization fails.
pub fn render(result: &ResolveResult, format: OutputFormat) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Plain => Ok(render_plain(result)),
        OutputFormat::Json => serde_json::to_string(result),
    }
}

/// Human-readable report.
///
/// The redirect chain is listed only when at least one redirect happened; the final
/// URL only on success.
pub fn render_plain(result: &ResolveResult) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    match &result.error {
        Some(error) => {
            let _ = writeln!(out, "Error: {error}");
        }
        None => {
            let _ = writeln!(out, "Resolved URL");
        }
    }
    let _ = writeln!(out, "  {:<15}{}", "Original:", result.original_url);

    if result.trace.len() > 1 {
        let _ = writeln!(out, "  Redirect chain:");
        for (index, url) in result.trace.iter().enumerate() {
            let _ = writeln!(out, "    {}. {url}", index + 1);
        }
    }

    if result.error.is_none() {
        let _ = writeln!(out, "  {:<15}{}", "Final URL:", result.final_url);
    }
    if let Some(ip) = &result.final_ip {
        let _ = writeln!(out, "  {:<15}{ip}", "IP address:");
    }
    if let Some(provider) = result.provider {
        let _ = writeln!(out, "  {:<15}{}", "Resolved with:", provider.label());
    }
    if result.is_timeout() {
        let _ = writeln!(out, "  Hint: --retry-on-timeout retries with a longer timeout");
    }

    out
}
