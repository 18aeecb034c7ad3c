//! End to end: real HTTP against a dev node on an ephemeral port
//!
//! These tests verify:
//! 1. A reachable node activates and the full click flow works over reqwest
//! 2. A node that never answers times out within the probe budget
//! 3. Config files and NODEWALLET_* variables layer correctly

mod common;

use common::*;
use nodewallet::{
    ClientConfig, Control, DevNode, DevNodeConfig, EndpointDef, Field, HandlerTable, HttpTransport, Notice,
    ProbeOutcome, SelectOutcome, Surface, WalletApp,
};
use once_cell::sync::Lazy;
use std::rc::Rc;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tempfile::TempDir;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner())
}

struct LiveApp {
    app: WalletApp<RecordingSurface, HttpTransport, HandlerTable>,
    surface: Rc<RecordingSurface>,
    table: HandlerTable,
    queue: TaskQueue,
}

impl LiveApp {
    fn new(config: ClientConfig) -> Self {
        let surface = Rc::new(RecordingSurface::new());
        let table = HandlerTable::new();
        let queue = TaskQueue::new();
        let app = WalletApp::new(config, surface.clone(), Rc::new(HttpTransport::new()), table.clone(), queue.spawner());
        Self { app, surface, table, queue }
    }

    async fn click(&self, control: Control) {
        self.table.activate(control);
        self.queue.drain().await;
    }
}

#[tokio::test]
async fn wallet_flow_against_dev_node() {
    let (addr, shutdown, handle) = DevNode::spawn(DevNodeConfig::default().with_port(0)).await.expect("spawn");
    let node = format!("http://{}", addr);
    let live = LiveApp::new(ClientConfig::empty().with_endpoint(EndpointDef::same(&node)));

    let outcome = live.app.select(&node).await;
    assert!(matches!(outcome, SelectOutcome::Active { probe: ProbeOutcome::Reachable, .. }));

    // New wallet, then its balance
    live.click(Control::LoadRandom).await;
    let sender = live.surface.value(Field::Address);
    assert_eq!(sender.len(), 40);
    live.click(Control::GetBalance).await;
    assert_eq!(live.surface.value(Field::Balance), "100");

    // Deriving from the same private key yields the same address
    live.surface.set_field(Field::Address, "");
    live.click(Control::LoadPrivateKey).await;
    assert_eq!(live.surface.value(Field::Address), sender);

    // Transfer, then both sides of the ledger
    live.surface.set_field(Field::RecipientAddress, "f".repeat(40).as_str());
    live.surface.set_field(Field::Amount, "30");
    live.click(Control::Submit).await;
    assert_eq!(live.surface.notices().last(), Some(&Notice::Sent));

    live.click(Control::GetBalance).await;
    assert_eq!(live.surface.value(Field::Balance), "70");

    live.click(Control::ListTransactions).await;
    let view = live.surface.history().expect("history");
    assert_eq!(view.len(), 1);
    assert_eq!(view.blocks[0].from(), sender);
    assert_eq!(view.blocks[0].value(), "30");

    assert!(live.surface.diagnostics().is_empty(), "{:?}", live.surface.diagnostics());

    shutdown.trigger();
    handle.await.expect("join").expect("serve");
}

#[tokio::test]
async fn dev_node_rejects_overdraft() {
    let (addr, shutdown, handle) = DevNode::spawn(DevNodeConfig::default().with_port(0).with_starting_balance(10.0))
        .await
        .expect("spawn");
    let node = format!("http://{}", addr);
    let live = LiveApp::new(ClientConfig::empty().with_endpoint(EndpointDef::same(&node)));
    live.app.select(&node).await;

    live.click(Control::LoadRandom).await;
    live.click(Control::GetBalance).await;
    live.surface.set_field(Field::RecipientAddress, "e".repeat(40).as_str());
    live.surface.set_field(Field::Amount, "11");
    live.click(Control::Submit).await;

    assert_eq!(live.surface.notices().last(), Some(&Notice::SendFailed));
    assert_eq!(live.surface.diagnostics().len(), 1);

    shutdown.trigger();
    handle.await.expect("join").expect("serve");
}

#[tokio::test]
async fn silent_node_times_out() {
    // Accepts connections, never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let hold = tokio::spawn(async move {
        let mut open = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            open.push(socket);
        }
    });

    let node = format!("http://{}", addr);
    let live = LiveApp::new(
        ClientConfig::empty().with_endpoint(EndpointDef::same(&node)).with_probe_timeout_ms(200),
    );

    let started = Instant::now();
    let outcome = live.app.select(&node).await;

    assert_eq!(outcome, SelectOutcome::Gated(ProbeOutcome::TimedOut));
    assert!(started.elapsed() < Duration::from_secs(3));
    assert_eq!(live.surface.notices(), vec![Notice::ConnectionTimedOut]);
    hold.abort();
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let node = format!("http://127.0.0.1:{}", port);
    let live = LiveApp::new(ClientConfig::empty().with_endpoint(EndpointDef::same(&node)));

    assert_eq!(live.app.select(&node).await, SelectOutcome::Gated(ProbeOutcome::Unreachable));
    assert_eq!(live.surface.notices(), vec![Notice::ConnectionFailed]);
}

// =============================================================================
// Config layering
// =============================================================================

#[test]
fn config_file_then_env() {
    let _guard = lock_env();
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"endpoints": [{"id": "main", "url": "http://10.0.0.1:8080"}], "probe_timeout_ms": 750}"#)
        .expect("write");

    std::env::remove_var("NODEWALLET_ENDPOINTS");
    std::env::set_var("NODEWALLET_GATE_ON_PROBE", "off");
    std::env::remove_var("NODEWALLET_PROBE_TIMEOUT_MS");

    let config = ClientConfig::load(&path).expect("load").with_env();
    let registry = config.registry();
    assert_eq!(registry.resolve("main").map(|e| e.base_url.as_str()), Some("http://10.0.0.1:8080/"));
    assert_eq!(config.probe_timeout_ms, 750);
    assert!(!config.gate_on_probe);

    std::env::set_var("NODEWALLET_ENDPOINTS", "http://a:1, http://b:2,");
    std::env::set_var("NODEWALLET_PROBE_TIMEOUT_MS", "1200");
    let config = ClientConfig::load(&path).expect("load").with_env();
    assert_eq!(config.registry().len(), 2);
    assert_eq!(config.probe_timeout_ms, 1200);

    std::env::remove_var("NODEWALLET_ENDPOINTS");
    std::env::remove_var("NODEWALLET_GATE_ON_PROBE");
    std::env::remove_var("NODEWALLET_PROBE_TIMEOUT_MS");
}

#[test]
fn bad_config_file_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").expect("write");

    assert!(ClientConfig::load(&path).is_err());
    assert!(ClientConfig::load(&dir.path().join("missing.json")).is_err());
}
