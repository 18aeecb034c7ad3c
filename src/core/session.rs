//! Session - explicit activation state
//!
//! At most one endpoint is active. Reselection replaces the whole session;
//! nothing keeps a reference to the previous one except handlers that were
//! deliberately bound with a captured endpoint (and those are rebound).

use super::endpoint::Endpoint;
use std::cell::RefCell;
use std::rc::Rc;

/// One activation of an endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub generation: u64,
    pub endpoint: Endpoint,
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    current: Option<Session>,
    /// Ticket of the most recent selection, settled or not
    latest_selection: u64,
}

/// Shared handle to the active session (single event-loop thread)
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    state: Rc<RefCell<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self { Self::default() }

    /// Replace the active session with a fresh one for `endpoint`
    pub fn activate(&self, endpoint: Endpoint) -> Session {
        let mut state = self.state.borrow_mut();
        state.generation += 1;
        let session = Session { generation: state.generation, endpoint };
        state.current = Some(session.clone());
        session
    }

    /// Take a ticket for a selection that is about to probe. Any earlier ticket is superseded.
    pub fn begin_selection(&self) -> u64 {
        let mut state = self.state.borrow_mut();
        state.latest_selection += 1;
        state.latest_selection
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.state.borrow().latest_selection == ticket
    }

    pub fn deactivate(&self) {
        self.state.borrow_mut().current = None;
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().current.clone()
    }

    pub fn endpoint(&self) -> Option<Endpoint> {
        self.state.borrow().current.as_ref().map(|s| s.endpoint.clone())
    }

    pub fn is_active(&self) -> bool {
        self.state.borrow().current.is_some()
    }
}
