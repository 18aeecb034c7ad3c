//! App: UI-event-to-network orchestration
//!
//! ```text
//! select(value)
//!   │
//!   ├── EndpointRegistry::resolve ── None → diagnostic, nothing else
//!   │
//!   ├── SessionHandle::begin_selection (ticket)
//!   │
//!   ├── probe (bounded); a newer ticket → Superseded, nothing else
//!   │
//!   ├── notice
//!   │
//!   ├── SessionHandle::activate (or deactivate when gated)
//!   │
//!   └── BindingManager
//!         ├── Rebind: derive, generate   (capture endpoint)
//!         └── Once:   balance, history, submit (read session on click)
//!                          │
//!                          ▼
//!                     Operations ──► WalletClient ──► Transport
//!                          │
//!                          ▼
//!                       Surface (fields, notices, history view)
//! ```

pub mod operations;
pub mod submit;
mod wallet_app;

pub use operations::Operations;
pub use submit::{AbortReason, SubmitOutcome};
pub use wallet_app::{SelectOutcome, WalletApp};

use futures::future::LocalBoxFuture;
use std::fmt;
use std::rc::Rc;

use crate::core::history::HistoryView;
use crate::core::paths::dom;

/// Text of the go/no-go prompt shown before a transfer
pub const CONFIRM_SEND_PROMPT: &str = "Send this transaction?";

/// Fire-and-forget task on the local event loop
pub type LocalTask = LocalBoxFuture<'static, ()>;

/// Spawns a local task without waiting for it
pub type Spawner = Rc<dyn Fn(LocalTask)>;

/// Input/output fields of the wallet form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PrivateKey,
    PublicKey,
    Address,
    Balance,
    RecipientAddress,
    Amount,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::PrivateKey,
        Field::PublicKey,
        Field::Address,
        Field::Balance,
        Field::RecipientAddress,
        Field::Amount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::PrivateKey => "private_key",
            Field::PublicKey => "public_key",
            Field::Address => "address",
            Field::Balance => "balance",
            Field::RecipientAddress => "recipient",
            Field::Amount => "amount",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.as_str() == value.trim())
    }

    pub fn element_id(&self) -> &'static str {
        match self {
            Field::PrivateKey => dom::PRIVATE_KEY,
            Field::PublicKey => dom::PUBLIC_KEY,
            Field::Address => dom::ADDRESS,
            Field::Balance => dom::BALANCE,
            Field::RecipientAddress => dom::RECIPIENT_ADDRESS,
            Field::Amount => dom::AMOUNT,
        }
    }
}

/// Blocking, user-visible notices
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Connected(String),
    ConnectionFailed,
    ConnectionTimedOut,
    AddressRequired,
    NoActiveEndpoint,
    BalanceLoaded(String),
    HistoryLoaded(String),
    Cancelled,
    IncompleteTransfer,
    InvalidAmount,
    Sent,
    SendFailed,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Connected(url) => write!(f, "Connected to {}", url),
            Notice::ConnectionFailed => write!(f, "Connection failed, check the server configuration!"),
            Notice::ConnectionTimedOut => write!(f, "Connection timed out, check the network or server configuration!"),
            Notice::AddressRequired => write!(f, "Load a blockchain address first!"),
            Notice::NoActiveEndpoint => write!(f, "Select a reachable endpoint first"),
            Notice::BalanceLoaded(message) => write!(f, "Query succeeded! {}", message),
            Notice::HistoryLoaded(message) => write!(f, "Query succeeded! {}", message),
            Notice::Cancelled => write!(f, "Cancelled"),
            Notice::IncompleteTransfer => write!(f, "Fill in the recipient and amount!"),
            Notice::InvalidAmount => write!(f, "Enter a valid amount"),
            Notice::Sent => write!(f, "Sent successfully"),
            Notice::SendFailed => write!(f, "Send failed"),
        }
    }
}

/// The UI as the orchestration layer sees it
pub trait Surface {
    fn field(&self, field: Field) -> String;
    fn set_field(&self, field: Field, value: &str);
    /// Blocking notice (alert)
    fn notify(&self, notice: &Notice);
    /// Blocking go/no-go prompt
    fn confirm(&self, prompt: &str) -> bool;
    /// Non-blocking diagnostic log line
    fn diagnostic(&self, message: &str);
    /// Replace the rendered history with `view`
    fn render_history(&self, view: &HistoryView);
}
