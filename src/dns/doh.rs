//! DNS-over-HTTPS queries (JSON API).
//!
//! One GET per query, no retries. Every failure collapses to `None`; the cause is only
//! visible in the log.

use std::future::Future;

use log::{debug, warn};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};

use super::provider::DnsProvider;
use crate::config::DOH_ACCEPT;
use crate::error_handling::error_chain_message;

/// Raw RR type number of an A record.
pub const RR_TYPE_A: u16 = 1;
/// Raw RR type number of a CNAME record.
pub const RR_TYPE_CNAME: u16 = 5;
/// Raw RR type number of an AAAA record.
pub const RR_TYPE_AAAA: u16 = 28;

/// Record types this resolver asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    /// IPv4 address
    A,
    /// IPv6 address
    Aaaa,
}

impl RecordType {
    /// Value of the `type` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordType::A => "A",
            RecordType::Aaaa => "AAAA",
        }
    }

    /// Raw RR type number of the address records this query returns.
    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => RR_TYPE_A,
            RecordType::Aaaa => RR_TYPE_AAAA,
        }
    }
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of the `Answer` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohAnswer {
    /// Raw RR type number (1 = A, 5 = CNAME, 28 = AAAA)
    #[serde(rename = "type")]
    pub record_type: u16,
    /// Record value: address literal, or a hostname for CNAME
    pub data: String,
}

impl DohAnswer {
    /// Convenience constructor.
    pub fn new(record_type: u16, data: impl Into<String>) -> Self {
        Self {
            record_type,
            data: data.into(),
        }
    }
}

/// Body of a DoH JSON response. Only `Answer` is read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DohResponse {
    #[serde(rename = "Answer", default, skip_serializing_if = "Option::is_none")]
    answer: Option<Vec<DohAnswer>>,
}

impl DohResponse {
    /// Builds a response holding the given answers.
    pub fn from_answers(answers: Vec<DohAnswer>) -> Self {
        Self {
            answer: Some(answers),
        }
    }

    /// Answer records in response order; empty when the field was absent.
    pub fn answers(&self) -> &[DohAnswer] {
        self.answer.as_deref().unwrap_or_default()
    }

    /// First answer of the given raw RR type.
    pub fn first_of_type(&self, record_type: u16) -> Option<&DohAnswer> {
        self.answers()
            .iter()
            .find(|answer| answer.record_type == record_type)
    }
}

/// A single best-effort DoH query.
///
/// Implementations must not retry and must report every failure as `None`.
pub trait DohTransport: Send + Sync {
    /// Queries `record_type` records for `hostname` at `provider`.
    fn query(
        &self,
        hostname: &str,
        record_type: RecordType,
        provider: DnsProvider,
    ) -> impl Future<Output = Option<DohResponse>> + Send;
}

/// reqwest-backed DoH transport.
#[derive(Debug, Clone)]
pub struct DohClient {
    client: reqwest::Client,
    endpoint_override: Option<String>,
}

impl DohClient {
    /// Queries each provider at its own public endpoint.
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            endpoint_override: None,
        }
    }

    /// Sends every query to `endpoint`, whatever provider is selected.
    pub fn with_endpoint(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint_override: Some(endpoint.into()),
        }
    }

    fn endpoint_for(&self, provider: DnsProvider) -> &str {
        self.endpoint_override
            .as_deref()
            .unwrap_or_else(|| provider.endpoint())
    }
}

impl DohTransport for DohClient {
    async fn query(
        &self,
        hostname: &str,
        record_type: RecordType,
        provider: DnsProvider,
    ) -> Option<DohResponse> {
        let response = match self
            .client
            .get(self.endpoint_for(provider))
            .query(&[("name", hostname), ("type", record_type.as_str())])
            .header(ACCEPT, DOH_ACCEPT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    "[DoH] Error for {hostname} ({record_type}) via {provider}: {}",
                    error_chain_message(&e)
                );
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("[DoH] Failed for {hostname} ({record_type}) via {provider}: HTTP {status}");
            return None;
        }

        match response.json::<DohResponse>().await {
            Ok(body) => {
                debug!(
                    "[DoH] {hostname} ({record_type}) via {provider}: {} answer(s)",
                    body.answers().len()
                );
                Some(body)
            }
            Err(e) => {
                warn!(
                    "[DoH] Malformed response for {hostname} ({record_type}) via {provider}: {}",
                    error_chain_message(&e)
                );
                None
            }
        }
    }
}
