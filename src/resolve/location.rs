//! Input normalization and `Location` handling.

use url::Url;

/// Normalizes user input into the URL a resolution starts from.
///
/// Trims surrounding whitespace, removes embedded CR, LF and tab characters, and
/// prefixes `https://` unless the input already starts with `http://` or `https://`.
/// Empty input stays empty. Applying it twice gives the same result as once.
pub fn validate_url(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let clean: String = url
        .trim()
        .chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect();

    if clean.starts_with("http://") || clean.starts_with("https://") {
        clean
    } else {
        format!("https://{clean}")
    }
}

/// Computes the next URL of a chain from a `Location` value.
///
/// Values starting with `http` are taken verbatim, values starting with `/` are
/// appended to the origin of `current`, anything else is resolved relative to
/// `current`. Returns `None` when relative resolution fails.
pub fn redirect_target(current: &Url, location: &str) -> Option<String> {
    if location.starts_with("http") {
        Some(location.to_string())
    } else if location.starts_with('/') {
        Some(format!(
            "{}{}",
            current.origin().ascii_serialization(),
            location
        ))
    } else {
        current.join(location).ok().map(String::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://short.example:8443/a/b?x=1").unwrap()
    }

    #[test]
    fn test_validate_url_trims_and_adds_https() {
        assert_eq!(validate_url("  example.com\n"), "https://example.com");
    }

    #[test]
    fn test_validate_url_keeps_scheme() {
        assert_eq!(validate_url("https://example.com"), "https://example.com");
        assert_eq!(validate_url("http://example.com/x"), "http://example.com/x");
    }

    #[test]
    fn test_validate_url_removes_embedded_control_characters() {
        assert_eq!(
            validate_url("exa\r\nmple.com/pa\tth"),
            "https://example.com/path"
        );
    }

    #[test]
    fn test_validate_url_is_idempotent() {
        for input in [
            "  example.com\n",
            "https://example.com",
            "\thttp://a.example/\r\n",
            "bit.ly/x?y=1",
            "HTTPS://upper.example",
            "x \ny",
        ] {
            let once = validate_url(input);
            assert_eq!(validate_url(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_validate_url_empty() {
        assert_eq!(validate_url(""), "");
    }

    #[test]
    fn test_redirect_target_absolute_is_verbatim() {
        assert_eq!(
            redirect_target(&base(), "http://other.example/landing").as_deref(),
            Some("http://other.example/landing")
        );
    }

    #[test]
    fn test_redirect_target_root_relative_uses_origin() {
        assert_eq!(
            redirect_target(&base(), "/next?y=2").as_deref(),
            Some("https://short.example:8443/next?y=2")
        );
    }

    #[test]
    fn test_redirect_target_relative_path() {
        assert_eq!(
            redirect_target(&base(), "c/d").as_deref(),
            Some("https://short.example:8443/a/c/d")
        );
        assert_eq!(
            redirect_target(&base(), "?page=3").as_deref(),
            Some("https://short.example:8443/a/b?page=3")
        );
    }

    #[test]
    fn test_redirect_target_unresolvable() {
        // Backslashes count as slashes in http(s) URLs, making this an invalid host
        assert_eq!(redirect_target(&base(), "\\\\["), None);
    }
}
