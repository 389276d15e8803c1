//! Status line and headers of a single fetched response.

use std::collections::BTreeMap;

use serde::Serialize;

/// A header value as received: one line, or several lines with the same name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum HeaderField {
    /// The header appeared once
    Single(String),
    /// The header appeared several times, in order
    Multiple(Vec<String>),
}

impl HeaderField {
    /// First value of the header.
    pub fn first(&self) -> Option<&str> {
        match self {
            HeaderField::Single(value) => Some(value),
            HeaderField::Multiple(values) => values.first().map(String::as_str),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            HeaderField::Single(existing) => {
                *self = HeaderField::Multiple(vec![std::mem::take(existing), value]);
            }
            HeaderField::Multiple(values) => values.push(value),
        }
    }
}

/// Status and headers of one response. The body is never kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchOutcome {
    /// Numeric status code
    pub status_code: u16,
    /// Reason phrase for the status code (empty for unknown codes)
    pub status_text: String,
    /// Response headers keyed by lower-cased name
    pub headers: BTreeMap<String, HeaderField>,
}

impl FetchOutcome {
    /// Creates an outcome with no headers.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            headers: BTreeMap::new(),
        }
    }

    /// Adds one header line; repeated names accumulate into [`HeaderField::Multiple`].
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.append_header(name, value.into());
        self
    }

    fn append_header(&mut self, name: &str, value: String) {
        let name = name.to_ascii_lowercase();
        match self.headers.get_mut(&name) {
            Some(field) => field.push(value),
            None => {
                self.headers.insert(name, HeaderField::Single(value));
            }
        }
    }

    /// Captures status and headers of a reqwest response.
    pub fn from_response(response: &reqwest::Response) -> Self {
        let status = response.status();
        let mut outcome = Self::new(status.as_u16(), status.canonical_reason().unwrap_or(""));
        for (name, value) in response.headers() {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            outcome.append_header(name.as_str(), value);
        }
        outcome
    }

    /// Whether the status is in the 3xx range.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    /// Looks up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&HeaderField> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    /// First `Location` value, if any.
    pub fn location(&self) -> Option<&str> {
        self.header("location").and_then(HeaderField::first)
    }
}
