//! Nodewallet: wallet client for a remote chain node.
//!
//! # Architecture
//!
//! ```text
//! Front end (browser page | terminal console)
//!   │
//!   ├── Surface      (fields, notices, confirm, history view)
//!   ├── ControlHost  (where click handlers live)
//!   └── Transport    (fetch | reqwest)
//!         │
//!         ▼
//! WalletApp
//!   ├── EndpointRegistry  (closed set of nodes)
//!   ├── probe             (5 s liveness check)
//!   ├── SessionHandle     (the one active endpoint)
//!   ├── BindingManager    (Once / Rebind policies)
//!   └── Operations ──► WalletClient (derive, generate, balance, history, submit)
//! ```
//!
//! # Features
//!
//! - `native` - reqwest transport, terminal console, dev node (axum)
//! - `wasm` - browser front end (DOM, fetch, wasm-bindgen)
//!
//! # Usage
//!
//! ```ignore
//! use nodewallet::{ClientConfig, HandlerTable, WalletApp};
//!
//! let app = WalletApp::new(ClientConfig::default(), surface, transport, HandlerTable::new(), spawner);
//! app.select("http://127.0.0.1:8080").await;
//! ```

// =============================================================================
// Shared modules (compile everywhere)
// =============================================================================
pub mod app;
pub mod client;
pub mod config;
pub mod core;

// =============================================================================
// Native-only modules (terminal, dev node, tokio)
// =============================================================================
#[cfg(feature = "native")]
pub mod devnode;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod native;
#[cfg(feature = "native")]
pub mod runtime;

// =============================================================================
// WASM-only modules (browser, wasm-bindgen)
// =============================================================================
#[cfg(feature = "wasm")]
pub mod wasm;

// =============================================================================
// Re-exports: Shared
// =============================================================================
pub use app::{AbortReason, Field, Notice, Operations, SelectOutcome, Spawner, SubmitOutcome, Surface, WalletApp};
pub use client::{ClientError, HttpResponse, RequestBody, Transport, TransportError, WalletClient};
pub use config::ClientConfig;
pub use core::binding::{BindingManager, BindingPolicy, Control, ControlHost, HandlerTable};
pub use core::endpoint::{Endpoint, EndpointDef, EndpointRegistry};
pub use core::history::HistoryView;
pub use core::probe::ProbeOutcome;
pub use core::session::{Session, SessionHandle};

// =============================================================================
// Re-exports: Native
// =============================================================================
#[cfg(feature = "native")]
pub use devnode::{create_router, DevNode, DevNodeConfig};
#[cfg(feature = "native")]
pub use native::{local_spawner, HttpTransport, TerminalSurface};
#[cfg(feature = "native")]
pub use runtime::{install_signal_handlers, Shutdown};
