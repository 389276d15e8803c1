//! Hostname resolution over DoH with CNAME following.
//!
//! Per hostname: A first, then AAAA, following a CNAME found in either answer.
//! Chains are walked iteratively and abandoned past `MAX_CNAME_DEPTH`.

use log::debug;

use super::doh::{DohResponse, DohTransport, RecordType, RR_TYPE_CNAME};
use super::provider::DnsProvider;
use crate::config::MAX_CNAME_DEPTH;

/// Outcome of querying one hostname.
#[derive(Debug, PartialEq, Eq)]
enum Lookup {
    Address(String),
    Alias(String),
    Nothing,
}

/// Strips one trailing dot from a CNAME target.
pub fn canonicalize_cname(data: &str) -> &str {
    data.strip_suffix('.').unwrap_or(data)
}

fn pick(response: &DohResponse, record_type: RecordType) -> Option<Lookup> {
    if let Some(record) = response.first_of_type(record_type.code()) {
        return Some(Lookup::Address(record.data.clone()));
    }
    response
        .first_of_type(RR_TYPE_CNAME)
        .map(|cname| Lookup::Alias(canonicalize_cname(&cname.data).to_string()))
}

async fn lookup_once<D: DohTransport>(doh: &D, hostname: &str, provider: DnsProvider) -> Lookup {
    for record_type in [RecordType::A, RecordType::Aaaa] {
        let found = doh
            .query(hostname, record_type, provider)
            .await
            .and_then(|response| pick(&response, record_type));
        if let Some(lookup) = found {
            return lookup;
        }
    }
    Lookup::Nothing
}

/// Resolves `hostname` to a single address through `provider`.
///
/// Returns the first A record, else follows a CNAME from the A answer, else the
/// first AAAA record, else a CNAME from the AAAA answer. `None` means no usable
/// record, a provider failure, or a CNAME chain deeper than `MAX_CNAME_DEPTH`;
/// callers cannot and need not tell these apart.
pub async fn resolve_via_doh<D: DohTransport>(
    doh: &D,
    hostname: &str,
    provider: DnsProvider,
) -> Option<String> {
    resolve_from_depth(doh, hostname, provider, 0).await
}

/// Same as [`resolve_via_doh`], entering the chain at `depth`.
///
/// A hostname reached at a depth above `MAX_CNAME_DEPTH` is not queried.
pub async fn resolve_from_depth<D: DohTransport>(
    doh: &D,
    hostname: &str,
    provider: DnsProvider,
    depth: usize,
) -> Option<String> {
    let mut current = hostname.to_string();

    for depth in depth..=MAX_CNAME_DEPTH {
        debug!("[DoH] Resolving {current} via {provider} (depth {depth})");
        match lookup_once(doh, &current, provider).await {
            Lookup::Address(address) => {
                debug!("[DoH] Resolved {hostname} -> {address}");
                return Some(address);
            }
            Lookup::Alias(cname) => {
                debug!("[DoH] {current} is CNAME -> {cname}, following...");
                current = cname;
            }
            Lookup::Nothing => {
                debug!("[DoH] No A/AAAA/CNAME record for {current}");
                return None;
            }
        }
    }

    debug!("[DoH] Max CNAME depth reached for {current}");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dns::doh::{DohAnswer, RR_TYPE_A, RR_TYPE_AAAA};

    #[test]
    fn test_canonicalize_strips_one_dot() {
        assert_eq!(canonicalize_cname("example.org."), "example.org");
        assert_eq!(canonicalize_cname("example.org.."), "example.org.");
        assert_eq!(canonicalize_cname("example.org"), "example.org");
    }

    #[test]
    fn test_pick_prefers_address_over_cname() {
        let response = DohResponse::from_answers(vec![
            DohAnswer::new(RR_TYPE_CNAME, "alias.example."),
            DohAnswer::new(RR_TYPE_A, "192.0.2.1"),
        ]);
        assert_eq!(
            pick(&response, RecordType::A),
            Some(Lookup::Address("192.0.2.1".to_string()))
        );
    }

    #[test]
    fn test_pick_ignores_other_address_family() {
        let response = DohResponse::from_answers(vec![DohAnswer::new(RR_TYPE_AAAA, "2001:db8::1")]);
        assert_eq!(pick(&response, RecordType::A), None);
    }
}
