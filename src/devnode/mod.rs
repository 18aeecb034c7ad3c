//! Dev node - local stand-in for the wallet service
//!
//! Serves the same routes a real node exposes so the client can be exercised
//! end to end without one. Keys are hex strings derived with SHA-256; they are
//! placeholders, not a signature scheme.
//!
//! | Route | Method | Body | Reply |
//! |-------|--------|------|-------|
//! | `/` | GET | - | `{status, service}` |
//! | `/walletByPrivatekey` | POST | form `privatekey` | `{public_key, blockchain_address}` |
//! | `/wallet` | POST | - | `{public_key, private_key, blockchain_address}` |
//! | `/wallet/amount` | POST | `{blockchain_address}` | `{amount, message}` |
//! | `/transaction` | POST | transfer | echoed transfer, 400 on rejection |
//! | `/ListTransaction` | POST | `{blockchain_address}` | `{data, message}` |

mod ledger;
mod routes;

pub use ledger::{derive_keys, generate_keys, Ledger, LedgerError};
pub use routes::create_router;

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::runtime::Shutdown;

#[derive(Debug, Clone)]
pub struct DevNodeConfig {
    pub name: String,
    pub port: u16,
    /// Balance credited to an address the first time it is seen
    pub starting_balance: f64,
}

impl Default for DevNodeConfig {
    fn default() -> Self { Self { name: "nodewallet-dev".into(), port: 8080, starting_balance: 100.0 } }
}

impl DevNodeConfig {
    pub fn with_port(mut self, port: u16) -> Self { self.port = port; self }
    pub fn with_starting_balance(mut self, amount: f64) -> Self { self.starting_balance = amount; self }
}

/// Shared router state
#[derive(Clone)]
pub struct DevState {
    pub name: String,
    pub ledger: Arc<Mutex<Ledger>>,
}

pub struct DevNode {
    config: DevNodeConfig,
    state: DevState,
}

impl DevNode {
    pub fn new(config: DevNodeConfig) -> Self {
        let state = DevState { name: config.name.clone(), ledger: Arc::new(Mutex::new(Ledger::new(config.starting_balance))) };
        Self { config, state }
    }

    pub fn state(&self) -> &DevState { &self.state }

    pub fn router(&self) -> axum::Router { create_router(self.state.clone()) }

    /// Serve on an already-bound listener until `shutdown` fires
    pub async fn serve(self, listener: TcpListener, shutdown: Shutdown) -> anyhow::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("Dev node {} listening on http://{}", self.config.name, addr);
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;
        tracing::info!("Dev node stopped");
        Ok(())
    }

    /// Bind `127.0.0.1:<port>` (0 = ephemeral) and serve in the background
    pub async fn spawn(config: DevNodeConfig) -> anyhow::Result<(SocketAddr, Shutdown, JoinHandle<anyhow::Result<()>>)> {
        let listener = TcpListener::bind(("127.0.0.1", config.port)).await?;
        let addr = listener.local_addr()?;
        let shutdown = Shutdown::new();
        let node = DevNode::new(config);
        let handle = tokio::spawn(node.serve(listener, shutdown.clone()));
        Ok((addr, shutdown, handle))
    }
}
