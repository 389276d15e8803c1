//! Integration tests for the url_resolver library.
//!
//! These tests drive `UrlResolver` end to end against local mock servers: one
//! `httptest` server plays the DoH JSON endpoint, others play the target hosts.
//! Target hostnames under `.test` exist only in the mock DoH server, so a request
//! can only reach its target if the connection is pinned to the DoH answer.

use std::net::TcpListener;
use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server, ServerBuilder};
use serde_json::json;

use url_resolver::config::DEFAULT_USER_AGENT;
use url_resolver::{DnsProvider, DohClient, ErrorKind, PinnedFetcher, UrlResolver};

const TIMEOUT: Duration = Duration::from_secs(5);

/// Answers every A query for `name` with `answers`.
fn answer_a(doh: &Server, name: &'static str, answers: serde_json::Value) {
    doh.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/dns-query"),
            request::query(url_decoded(contains(("name", name)))),
            request::query(url_decoded(contains(("type", "A")))),
        ])
        .times(..)
        .respond_with(json_encoded(json!({ "Status": 0, "Answer": answers }))),
    );
}

/// Answers every query for `name`, of any type, with NXDOMAIN.
fn answer_nxdomain(doh: &Server, name: &'static str) {
    doh.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/dns-query"),
            request::query(url_decoded(contains(("name", name)))),
        ])
        .times(..)
        .respond_with(json_encoded(json!({ "Status": 3 }))),
    );
}

fn loopback_a() -> serde_json::Value {
    json!([{ "name": "x", "type": 1, "TTL": 60, "data": "127.0.0.1" }])
}

fn resolver(doh: &Server) -> UrlResolver<DohClient, PinnedFetcher> {
    let doh_client = DohClient::with_endpoint(reqwest::Client::new(), doh.url_str("/dns-query"));
    let fetcher = PinnedFetcher::new(DEFAULT_USER_AGENT).expect("fetcher should build");
    UrlResolver::new(doh_client, fetcher, DnsProvider::Cloudflare)
}

/// Targets answer on IPv4 loopback, where the DoH answers pin them.
fn local_server() -> Server {
    ServerBuilder::new()
        .bind_addr("127.0.0.1:0".parse().unwrap())
        .run()
        .expect("target server should bind")
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

#[tokio::test]
async fn test_redirect_chain_is_followed_over_pinned_connections() {
    let doh = Server::run();
    answer_a(&doh, "short.test", loopback_a());
    answer_a(
        &doh,
        "landing.test",
        json!([{ "type": 5, "data": "edge.test." }]),
    );
    answer_a(&doh, "edge.test", loopback_a());

    let target = local_server();
    let port = target.addr().port();
    target.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/go"),
            request::headers(contains(("host", "short.test"))),
        ])
        .respond_with(
            status_code(301).append_header("Location", format!("http://landing.test:{port}/page")),
        ),
    );
    target.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/page"),
            request::headers(contains(("host", "landing.test"))),
        ])
        .respond_with(status_code(302).append_header("Location", "/final?x=1")),
    );
    target.expect(
        Expectation::matching(all_of![
            request::method_path("GET", "/final"),
            request::headers(contains(("host", "landing.test"))),
        ])
        .respond_with(status_code(200).body("landed")),
    );

    let start = format!("http://short.test:{port}/go");
    let result = resolver(&doh)
        .resolve_url(&start, 10, TIMEOUT, None)
        .await;

    assert_eq!(result.error, None);
    assert_eq!(result.redirect_count, 2);
    assert_eq!(
        result.trace,
        vec![
            start.clone(),
            format!("http://landing.test:{port}/page"),
            format!("http://landing.test:{port}/final?x=1"),
        ]
    );
    assert_eq!(result.final_url, format!("http://landing.test:{port}/final?x=1"));
    assert_eq!(result.final_ip.as_deref(), Some("127.0.0.1"));
    assert_eq!(result.provider, Some(DnsProvider::Cloudflare));
}

#[tokio::test]
async fn test_redirect_loop_stops_at_limit() {
    let doh = Server::run();
    answer_a(&doh, "loop.test", loopback_a());

    let target = local_server();
    target.expect(
        Expectation::matching(request::method_path("GET", "/loop"))
            .times(3)
            .respond_with(status_code(302).append_header("Location", "/loop")),
    );

    let start = format!("http://loop.test:{}/loop", target.addr().port());
    let result = resolver(&doh)
        .resolve_url(&start, 3, TIMEOUT, Some(DnsProvider::Google))
        .await;

    assert_eq!(result.error.as_deref(), Some("Max redirects exceeded (3)"));
    assert_eq!(result.error_kind, Some(ErrorKind::MaxRedirectsExceeded));
    assert_eq!(result.redirect_count, 3);
    assert_eq!(result.trace.len(), 4);
    assert_eq!(result.final_ip, None);
    assert_eq!(result.provider, None);
}

#[tokio::test]
async fn test_not_found_is_a_final_destination() {
    let doh = Server::run();
    answer_a(&doh, "gone.test", loopback_a());

    let target = local_server();
    target.expect(
        Expectation::matching(request::method_path("GET", "/missing"))
            .respond_with(status_code(404)),
    );

    let start = format!("http://gone.test:{}/missing", target.addr().port());
    let result = resolver(&doh)
        .resolve_url(&start, 10, TIMEOUT, None)
        .await;

    assert!(result.is_success());
    assert_eq!(result.final_url, start);
    assert_eq!(result.redirect_count, 0);
    assert_eq!(result.final_ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_slow_hop_times_out_with_address() {
    let doh = Server::run();
    answer_a(&doh, "slow.test", loopback_a());

    let target = local_server();
    target.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(delay_and_then(Duration::from_millis(1500), status_code(200))),
    );

    let start = format!("http://slow.test:{}/", target.addr().port());
    let result = resolver(&doh)
        .resolve_url(&start, 10, Duration::from_millis(250), None)
        .await;

    assert_eq!(result.error.as_deref(), Some("Timeout after 250ms"));
    assert_eq!(result.error_kind, Some(ErrorKind::Timeout));
    assert_eq!(result.final_ip.as_deref(), Some("127.0.0.1"));
    assert_eq!(result.trace, vec![start]);
}

#[tokio::test]
async fn test_refused_connection_is_reported() {
    let doh = Server::run();
    answer_a(&doh, "refused.test", loopback_a());

    let start = format!("http://refused.test:{}/", closed_port());
    let result = resolver(&doh)
        .resolve_url(&start, 10, TIMEOUT, None)
        .await;

    assert_eq!(result.error.as_deref(), Some("Connection refused"));
    assert_eq!(result.error_kind, Some(ErrorKind::ConnectionRefused));
    assert_eq!(result.final_ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn test_unresolvable_domain_is_reported() {
    let doh = Server::run();
    answer_nxdomain(&doh, "nothing.invalid");

    // No DoH answer: the fetch falls back to the system resolver, which fails too
    let result = resolver(&doh)
        .resolve_url("nothing.invalid", 10, TIMEOUT, None)
        .await;

    assert_eq!(result.original_url, "https://nothing.invalid");
    assert_eq!(result.error.as_deref(), Some("Domain not found"));
    assert_eq!(result.error_kind, Some(ErrorKind::DomainNotFound));
    assert_eq!(result.final_ip, None);
}

#[tokio::test]
async fn test_unreachable_doh_falls_back_to_system_resolution() {
    // IP-literal targets connect without any DNS, so the chain still completes
    let target = Server::run();
    target.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(200)),
    );
    let doh_client =
        DohClient::with_endpoint(reqwest::Client::new(), format!("http://127.0.0.1:{}/", closed_port()));
    let fetcher = PinnedFetcher::new(DEFAULT_USER_AGENT).expect("fetcher should build");
    let resolver = UrlResolver::new(doh_client, fetcher, DnsProvider::Quad9);

    let result = resolver
        .resolve_url(&target.url_str("/"), 10, TIMEOUT, None)
        .await;

    assert!(result.is_success());
    assert_eq!(result.final_ip, None);
    assert_eq!(result.provider, Some(DnsProvider::Quad9));
}

#[test]
fn test_caller_helpers_and_error_types_are_exported_at_crate_root() {
    use url_resolver::{looks_like_url, FetchError, TransportErrorKind};

    assert!(looks_like_url("short.test/abc"));
    assert!(!looks_like_url("intranet"));

    let err = FetchError::Transport {
        kind: TransportErrorKind::ConnectionRefused,
        message: "connection refused".to_string(),
    };
    assert_eq!(err.transport_kind(), Some(TransportErrorKind::ConnectionRefused));
}
