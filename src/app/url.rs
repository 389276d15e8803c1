//! Input gate for user-supplied URLs.

use log::warn;
use url::{Host, Url};

use crate::config::MAX_URL_INPUT_LENGTH;

/// Checks whether `text` is worth handing to the resolver.
///
/// Rejects text longer than `MAX_URL_INPUT_LENGTH` or containing whitespace. The
/// candidate gets an `https://` prefix when it has no http(s) scheme, must parse with
/// an `http` or `https` scheme, and its host must be `localhost`, contain a `.`, or be
/// an IP literal. Logs a warning for every rejection.
pub fn looks_like_url(text: &str) -> bool {
    if text.len() > MAX_URL_INPUT_LENGTH {
        warn!(
            "Skipping input exceeding maximum length ({} > {}): {}...",
            text.len(),
            MAX_URL_INPUT_LENGTH,
            text.chars().take(50).collect::<String>()
        );
        return false;
    }
    if text.chars().any(char::is_whitespace) {
        warn!("Skipping input containing whitespace: {text:?}");
        return false;
    }

    let candidate = if text.starts_with("http://") || text.starts_with("https://") {
        text.to_string()
    } else {
        format!("https://{text}")
    };

    let parsed = match Url::parse(&candidate) {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("Skipping invalid URL: {text}");
            return false;
        }
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        warn!("Skipping unsupported scheme for URL: {text}");
        return false;
    }

    let plausible = match parsed.host() {
        Some(Host::Domain(domain)) => {
            domain.eq_ignore_ascii_case("localhost") || domain.contains('.')
        }
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    };
    if !plausible {
        warn!("Skipping URL without a plausible host: {text}");
    }
    plausible
}

#[cfg(test)]
mod tests {
    use super::looks_like_url;

    #[test]
    fn test_looks_like_url_accepts_bare_domain() {
        assert!(looks_like_url("example.com"));
        assert!(looks_like_url("bit.ly/3abc"));
    }

    #[test]
    fn test_looks_like_url_accepts_schemes() {
        assert!(looks_like_url("https://example.com/path?q=1"));
        assert!(looks_like_url("http://example.com"));
    }

    #[test]
    fn test_looks_like_url_accepts_localhost_and_ips() {
        assert!(looks_like_url("localhost:8080"));
        assert!(looks_like_url("http://127.0.0.1:3000/x"));
        assert!(looks_like_url("[2001:db8::1]"));
    }

    #[test]
    fn test_looks_like_url_rejects_single_label_host() {
        assert!(!looks_like_url("intranet"));
        assert!(!looks_like_url("https://intranet/path"));
    }

    #[test]
    fn test_looks_like_url_rejects_whitespace() {
        assert!(!looks_like_url("example.com/a b"));
        assert!(!looks_like_url("not a url at all!!!"));
        assert!(!looks_like_url("example.com\t"));
    }

    #[test]
    fn test_looks_like_url_rejects_other_schemes() {
        // Gets an https:// prefix and no longer has a usable host
        assert!(!looks_like_url("ftp://example.com"));
        assert!(!looks_like_url("javascript:alert(1)"));
    }

    #[test]
    fn test_looks_like_url_rejects_empty_and_malformed() {
        assert!(!looks_like_url(""));
        assert!(!looks_like_url("https://"));
        assert!(!looks_like_url("://example.com"));
    }

    #[test]
    fn test_looks_like_url_length_limit() {
        let at_limit = format!("example.com/{}", "a".repeat(2000 - "example.com/".len()));
        assert_eq!(at_limit.len(), 2000);
        assert!(looks_like_url(&at_limit));

        let over = format!("{at_limit}a");
        assert!(!looks_like_url(&over));
    }
}
