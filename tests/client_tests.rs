//! Liveness probe and the typed wallet client, against a scripted transport

mod common;

use common::*;
use nodewallet::core::paths::api;
use nodewallet::core::probe::probe;
use nodewallet::{ClientError, Endpoint, ProbeOutcome, TransportError, WalletClient};
use std::time::Duration;

fn node_a() -> Endpoint {
    Endpoint::new(NODE_A, NODE_A)
}

#[tokio::test]
async fn probe_outcomes() {
    let transport = MockTransport::new();
    let timeout = Duration::from_millis(5000);

    transport.respond(url(NODE_A, ""), 200, "");
    assert_eq!(probe(&transport, &node_a(), timeout).await, ProbeOutcome::Reachable);

    transport.respond(url(NODE_A, ""), 500, "boom");
    assert_eq!(probe(&transport, &node_a(), timeout).await, ProbeOutcome::Unreachable);

    // Only exactly 200 counts
    transport.respond(url(NODE_A, ""), 204, "");
    assert_eq!(probe(&transport, &node_a(), timeout).await, ProbeOutcome::Unreachable);

    transport.fail(url(NODE_A, ""), TransportError::Failed("refused".into()));
    assert_eq!(probe(&transport, &node_a(), timeout).await, ProbeOutcome::Unreachable);

    transport.fail(url(NODE_A, ""), TransportError::TimedOut);
    assert_eq!(probe(&transport, &node_a(), timeout).await, ProbeOutcome::TimedOut);

    assert!(transport.requests().iter().all(|r| r.method == "GET" && r.timeout == Some(timeout)));
}

#[test]
fn probe_outcome_errors() {
    assert_eq!(ProbeOutcome::Reachable.error(), None);
    assert_eq!(ProbeOutcome::Unreachable.error(), Some(ClientError::EndpointUnreachable));
    assert_eq!(ProbeOutcome::TimedOut.error(), Some(ClientError::EndpointTimedOut));
}

#[tokio::test]
async fn client_routes_are_relative_to_base() {
    let transport = MockTransport::new();
    let endpoint = Endpoint::new("a", "http://node.local:9000/");
    let client = WalletClient::new(&transport, &endpoint);

    let _ = client.generate().await;
    let _ = client.derive("k").await;
    let _ = client.balance("addr").await;
    let _ = client.transactions("addr").await;

    let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    assert_eq!(
        urls,
        vec![
            format!("http://node.local:9000/{}", api::WALLET),
            format!("http://node.local:9000/{}", api::WALLET_BY_PRIVATE_KEY),
            format!("http://node.local:9000/{}", api::WALLET_AMOUNT),
            format!("http://node.local:9000/{}", api::LIST_TRANSACTION),
        ]
    );
}

#[tokio::test]
async fn client_maps_failures() {
    let transport = MockTransport::new();
    let endpoint = node_a();
    let client = WalletClient::new(&transport, &endpoint);

    transport.respond(url(NODE_A, api::WALLET), 503, "busy");
    assert_eq!(
        client.generate().await,
        Err(ClientError::ServerRejected { status: 503, body: "busy".into() })
    );

    transport.fail(url(NODE_A, api::WALLET), TransportError::Failed("reset".into()));
    assert_eq!(client.generate().await, Err(ClientError::TransportFailure("reset".into())));

    assert_eq!(client.balance("").await, Err(ClientError::MissingRequiredInput("blockchain_address")));
    assert_eq!(transport.count(), 2);
}

#[tokio::test]
async fn balance_reply_tolerates_missing_message() {
    let transport = MockTransport::new();
    let endpoint = node_a();
    transport.respond(url(NODE_A, api::WALLET_AMOUNT), 200, r#"{"amount": 3.5}"#);

    let reply = WalletClient::new(&transport, &endpoint).balance("addr").await.expect("balance");

    assert_eq!(reply.amount, serde_json::json!(3.5));
    assert_eq!(reply.message, "");
}
